use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord};
use shared::Candle;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Brazilian number and date/time formats used by the exchange exports
pub mod brazilian_format {
    use anyhow::{anyhow, Result};
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    // Parses decimals like "1.234,56" or "123,45" into f64
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim().replace('.', "").replace(',', ".");

        f64::from_str(&normalized).map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    // Trade counts use '.' as thousands separator and have no fraction
    pub fn parse_count(s: &str) -> Result<i64> {
        s.trim()
            .replace('.', "")
            .parse::<i64>()
            .map_err(|e| anyhow!("Failed to parse count '{}': {}", s, e))
    }

    // Parses date "dd/mm/yyyy" and time "HH:MM:SS" (UTC) into unix seconds
    pub fn parse_unix_time(date_str: &str, time_str: &str) -> Result<i64> {
        let date = NaiveDate::parse_from_str(date_str, "%d/%m/%Y")
            .map_err(|e| anyhow!("Failed to parse date '{}': {}", date_str, e))?;
        let time = NaiveTime::parse_from_str(time_str, "%H:%M:%S")
            .map_err(|e| anyhow!("Failed to parse time '{}': {}", time_str, e))?;

        Ok(date.and_time(time).and_utc().timestamp())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_decimal() {
            assert_eq!(parse_decimal("123,45").unwrap(), 123.45);
            assert_eq!(parse_decimal("1.234,56").unwrap(), 1234.56);
            assert_eq!(parse_decimal("600.822.115,84").unwrap(), 600822115.84);
            assert!(parse_decimal("abc").is_err());
        }

        #[test]
        fn test_parse_count() {
            assert_eq!(parse_count("24.228").unwrap(), 24228);
            assert_eq!(parse_count("1000").unwrap(), 1000);
            assert!(parse_count("1,5").is_err());
        }

        #[test]
        fn test_parse_unix_time() {
            assert_eq!(parse_unix_time("01/01/1970", "00:01:00").unwrap(), 60);
            assert_eq!(parse_unix_time("30/12/2024", "18:20:00").unwrap(), 1_735_582_800);
            assert_eq!(parse_unix_time("31/12/1969", "23:59:00").unwrap(), -60);
        }

        #[test]
        fn test_parse_unix_time_invalid() {
            assert!(parse_unix_time("32/12/2024", "18:20:00").is_err());
            assert!(parse_unix_time("30/12/2024", "25:20:00").is_err());
            assert!(parse_unix_time("2024/12/30", "18:20:00").is_err());
        }
    }
}

const COLUMNS: [&str; 8] = ["Data", "Hora", "Abertura", "Máximo", "Mínimo", "Fechamento", "Volume", "Quantidade"];

pub struct BrazilianCsvParser;

impl BrazilianCsvParser {
    // CSV Header: Ativo;Data;Hora;Abertura;Máximo;Mínimo;Fechamento;Volume;Quantidade
    // Example Row: WINFUT;30/12/2024;18:20:00;124.080;124.090;123.938;123.983;600.822.115,84;24.228
    pub fn load_candles_from_csv(file_path: &Path) -> Result<Vec<Candle>, EngineError> {
        let file = File::open(file_path)?;
        Self::read_candles(BufReader::new(file))
    }

    pub fn read_candles<R: Read>(reader: R) -> Result<Vec<Candle>, EngineError> {
        let mut rdr = ReaderBuilder::new().delimiter(b';').has_headers(true).from_reader(reader);

        let headers = rdr.headers()?.clone();
        let positions = COLUMNS
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|header| header == *name)
                    .ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' column", name)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut candles = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;
            candles.push(Self::parse_record(&record, &positions).map_err(|e| {
                EngineError::CsvDataFormatError(format!("line {}: {}", line, e))
            })?);
        }
        tracing::debug!(count = candles.len(), "Parsed candles from CSV");
        Ok(candles)
    }

    fn parse_record(record: &StringRecord, positions: &[usize]) -> anyhow::Result<Candle> {
        let field = |column: usize| {
            record
                .get(positions[column])
                .ok_or_else(|| anyhow::anyhow!("Missing '{}' field", COLUMNS[column]))
        };
        let decimal = |column: usize| -> anyhow::Result<f64> {
            brazilian_format::parse_decimal(field(column)?)
                .map_err(|e| anyhow::anyhow!("Error parsing '{}': {}", COLUMNS[column], e))
        };

        Ok(Candle {
            time: brazilian_format::parse_unix_time(field(0)?, field(1)?)?,
            open: decimal(2)?,
            high: decimal(3)?,
            low: decimal(4)?,
            close: decimal(5)?,
            volume: decimal(6)?,
            taker_volume: 0.0,
            number_of_trades: brazilian_format::parse_count(field(7)?)
                .map_err(|e| anyhow::anyhow!("Error parsing 'Quantidade': {}", e))?,
            missing: false,
        })
    }
}
