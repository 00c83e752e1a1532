use super::{read_prefix, BlockCodec, CodecError, MetaCodec, COUNT_LEN};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use shared::{AxisKind, Indicator, IndicatorMeta, IndicatorSeries, IndicatorValue, SeriesKind, Slots, BLOCK_SIZE};
use std::collections::HashMap;

/// Reserved bytes for each of the name, kind and axis fields, terminator
/// included.
pub const TEXT_FIELD_LEN: usize = 20;
const TEXT_FIELDS: [&str; 3] = ["name", "kind", "axis"];
const VALUE_STRIDE: usize = 8 + 1;
/// Bytes per series record; independent of how many values a series holds.
pub const SERIES_STRIDE: usize = TEXT_FIELDS.len() * TEXT_FIELD_LEN + BLOCK_SIZE as usize * VALUE_STRIDE;

impl<C: MetaCodec> BlockCodec<C> {
    pub fn encode_indicator(&self, indicator: &Indicator) -> Result<Bytes, CodecError> {
        let meta = self.meta.encode_meta(&indicator.meta)?;

        let mut buf = BytesMut::with_capacity(COUNT_LEN + SERIES_STRIDE * indicator.series.len() + meta.len());
        buf.put_u64(indicator.series.len() as u64);
        for (name, series) in &indicator.series {
            put_text_field(&mut buf, TEXT_FIELDS[0], name)?;
            put_text_field(&mut buf, TEXT_FIELDS[1], series.kind.as_str())?;
            put_text_field(&mut buf, TEXT_FIELDS[2], series.axis.as_str())?;
            for value in &series.values {
                buf.put_f64(value.value);
                buf.put_u8(value.missing as u8);
            }
        }
        buf.put_slice(&meta);

        tracing::debug!(
            uid = %indicator.meta.uid,
            block = indicator.meta.block,
            series = indicator.series.len(),
            bytes = buf.len(),
            "Encoded indicator set"
        );
        Ok(buf.freeze())
    }

    pub fn decode_indicator(&self, data: &[u8]) -> Result<Indicator, CodecError> {
        let (count, prefix) = read_prefix(data, SERIES_STRIDE)?;

        let mut records = &data[COUNT_LEN..prefix];
        let mut series = HashMap::with_capacity(count);
        for record in 0..count {
            let name = take_text_field(&mut records, record, TEXT_FIELDS[0])?;
            let kind = SeriesKind::from(take_text_field(&mut records, record, TEXT_FIELDS[1])?);
            let axis = AxisKind::from(take_text_field(&mut records, record, TEXT_FIELDS[2])?);
            let values = Slots::from_fn(|_| IndicatorValue {
                value: records.get_f64(),
                missing: records.get_u8() == 1,
            });
            // A repeated name replaces the earlier record.
            series.insert(name, IndicatorSeries::new(values, kind, axis));
        }
        let meta: IndicatorMeta = self.meta.decode_meta(&data[prefix..])?;

        tracing::debug!(
            uid = %meta.uid,
            block = meta.block,
            series = series.len(),
            bytes = data.len(),
            "Decoded indicator set"
        );
        Ok(Indicator { series, meta })
    }
}

/// Writes `text` left-justified into a zero-padded field. At least one
/// padding byte must remain to act as the terminator.
fn put_text_field(buf: &mut BytesMut, field: &'static str, text: &str) -> Result<(), CodecError> {
    let bytes = text.as_bytes();
    if bytes.len() >= TEXT_FIELD_LEN {
        return Err(CodecError::FieldTooLong {
            field,
            value: text.to_string(),
            len: bytes.len(),
            max: TEXT_FIELD_LEN - 1,
        });
    }
    if bytes.contains(&0) {
        return Err(CodecError::FieldContainsNul { field, value: text.to_string() });
    }
    buf.put_slice(bytes);
    buf.put_bytes(0, TEXT_FIELD_LEN - bytes.len());
    Ok(())
}

fn take_text_field(records: &mut &[u8], record: usize, field: &'static str) -> Result<String, CodecError> {
    let span = &records[..TEXT_FIELD_LEN];
    let end = span
        .iter()
        .position(|&b| b == 0)
        .ok_or(CodecError::MissingTerminator { record, field })?;
    let text = String::from_utf8_lossy(&span[..end]).into_owned();
    records.advance(TEXT_FIELD_LEN);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_indicator_set, encode_indicator_set, JsonMetaCodec};

    fn test_meta() -> IndicatorMeta {
        IndicatorMeta {
            uid: "test_indicat_uid_name".to_string(),
            block: 534_859,
            complete: true,
            last_update: 1_685_903_959,
            symbol: "AAPLUSD".to_string(),
            interval: 3600,
            base_interval: 60,
            name: "nice".to_string(),
            parameters: vec![200, 103],
        }
    }

    fn sample_indicator(series_count: usize) -> Indicator {
        let mut indicator = Indicator::new(test_meta());
        for s in 0..series_count {
            let values = Slots::from_fn(|i| IndicatorValue {
                value: (i * (s + 1)) as f64 / 3.0,
                missing: (i + s) % 5 == 0,
            });
            indicator
                .series
                .insert(format!("series{s}"), IndicatorSeries::new(values, SeriesKind::LINE_CHART, AxisKind::CUSTOM_AXIS));
        }
        indicator
    }

    fn assert_same_series(a: &Indicator, b: &Indicator) {
        assert_eq!(a.series.len(), b.series.len());
        for (name, series) in &a.series {
            let other = b.series.get(name).unwrap_or_else(|| panic!("series {name} missing after decode"));
            assert_eq!(series.kind, other.kind);
            assert_eq!(series.axis, other.axis);
            assert_eq!(other.values.len(), BLOCK_SIZE as usize);
            for (x, y) in series.values.iter().zip(other.values.iter()) {
                assert_eq!(x.value.to_bits(), y.value.to_bits());
                assert_eq!(x.missing, y.missing);
            }
        }
    }

    #[test]
    fn test_indicator_binary_round_trip() {
        for series_count in [1, 2, 4] {
            let indicator = sample_indicator(series_count);
            let bytes = encode_indicator_set(&indicator).unwrap();
            let decoded = decode_indicator_set(&bytes).unwrap();
            assert_same_series(&indicator, &decoded);
            assert_eq!(decoded.meta, indicator.meta);
        }
    }

    #[test]
    fn test_round_trip_without_series() {
        let indicator = Indicator::new(test_meta());
        let bytes = encode_indicator_set(&indicator).unwrap();
        assert_eq!(&bytes[..8], &[0; 8]);
        let decoded = decode_indicator_set(&bytes).unwrap();
        assert!(decoded.series.is_empty());
        assert_eq!(decoded.meta, indicator.meta);
    }

    #[test]
    fn test_round_trip_mixed_tags() {
        let mut indicator = sample_indicator(1);
        let values = Slots::filled(IndicatorValue::new(f64::NEG_INFINITY));
        indicator.series.insert("histogram".to_string(), IndicatorSeries::new(values, SeriesKind::BAR_CHART, AxisKind::PRICE_AXIS));
        let values = Slots::filled(IndicatorValue::MISSING);
        indicator.series.insert(
            "nineteen_bytes_name".to_string(),
            IndicatorSeries::new(values, SeriesKind::from("SCATTER".to_string()), AxisKind::from(String::new())),
        );

        let decoded = decode_indicator_set(&encode_indicator_set(&indicator).unwrap()).unwrap();
        assert_same_series(&indicator, &decoded);
        assert_eq!(decoded.series["nineteen_bytes_name"].kind.as_str(), "SCATTER");
        assert_eq!(decoded.series["nineteen_bytes_name"].axis.as_str(), "");
    }

    #[test]
    fn test_encoded_layout() {
        let indicator = sample_indicator(1);
        let bytes = encode_indicator_set(&indicator).unwrap();
        let meta = JsonMetaCodec.encode_meta(&indicator.meta).unwrap();

        assert_eq!(SERIES_STRIDE, 5000 * 9 + 60);
        assert_eq!(bytes.len(), 8 + SERIES_STRIDE + meta.len());
        assert_eq!(&bytes[..8], &1u64.to_be_bytes());
        assert_eq!(&bytes[8..15], b"series0");
        assert!(bytes[15..28].iter().all(|&b| b == 0));
        assert_eq!(&bytes[28..38], b"LINE_CHART");
        assert_eq!(&bytes[48..59], b"CUSTOM_AXIS");
        // First value: 0.0, missing.
        assert_eq!(&bytes[68..76], &0f64.to_be_bytes());
        assert_eq!(bytes[76], 1);
        assert_eq!(&bytes[77..85], &(1.0f64 / 3.0).to_be_bytes());
        assert_eq!(bytes[85], 0);
    }

    #[test]
    fn test_encode_rejects_oversized_text() {
        let mut indicator = Indicator::new(test_meta());
        let values = Slots::filled(IndicatorValue::MISSING);
        indicator.series.insert(
            "twenty_bytes_name_xx".to_string(),
            IndicatorSeries::new(values.clone(), SeriesKind::LINE_CHART, AxisKind::PRICE_AXIS),
        );
        let err = encode_indicator_set(&indicator).unwrap_err();
        assert!(matches!(err, CodecError::FieldTooLong { field: "name", len: 20, max: 19, .. }));

        indicator.series.clear();
        indicator.series.insert("nul".to_string(), IndicatorSeries::new(values, SeriesKind::from("A\0B".to_string()), AxisKind::PRICE_AXIS));
        let err = encode_indicator_set(&indicator).unwrap_err();
        assert!(matches!(err, CodecError::FieldContainsNul { field: "kind", .. }));
    }

    #[test]
    fn test_decode_missing_terminator() {
        let mut bytes = encode_indicator_set(&sample_indicator(2)).unwrap().to_vec();
        // Fill the axis field of the second record without a terminator.
        let axis = 8 + SERIES_STRIDE + 2 * TEXT_FIELD_LEN;
        bytes[axis..axis + TEXT_FIELD_LEN].fill(b'x');
        let err = decode_indicator_set(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::MissingTerminator { record: 1, field: "axis" }));
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = encode_indicator_set(&sample_indicator(2)).unwrap();
        let err = decode_indicator_set(&bytes[..8 + SERIES_STRIDE]).unwrap_err();
        assert!(matches!(err, CodecError::BufferTooShort { needed, .. } if needed == 8 + 2 * SERIES_STRIDE));

        let err = decode_indicator_set(&bytes[..8 + 2 * SERIES_STRIDE]).unwrap_err();
        assert!(matches!(err, CodecError::MetadataDecode(_)));
    }

    #[test]
    fn test_duplicate_names_keep_last_record() {
        let indicator = sample_indicator(2);
        let mut bytes = encode_indicator_set(&indicator).unwrap().to_vec();
        // Rename the second record to match the first.
        let first_name = bytes[8..8 + TEXT_FIELD_LEN].to_vec();
        let second = 8 + SERIES_STRIDE;
        bytes[second..second + TEXT_FIELD_LEN].copy_from_slice(&first_name);

        let decoded = decode_indicator_set(&bytes).unwrap();
        assert_eq!(decoded.series.len(), 1);
        let name = String::from_utf8(first_name.into_iter().take_while(|&b| b != 0).collect()).unwrap();
        let first_value = f64::from_be_bytes(bytes[second + 60 + 9..second + 60 + 17].try_into().unwrap());
        assert_eq!(decoded.series[&name].values[1].value, first_value);
    }
}
