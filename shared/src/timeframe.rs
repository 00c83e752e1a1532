use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported slot intervals. `seconds()` is the value stored in block
/// metadata.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeFrame {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "3m")]
    Minute3,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "45m")]
    Minute45,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "8h")]
    Hour8,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "3d")]
    Day3,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 14] = [
        TimeFrame::Minute1,
        TimeFrame::Minute3,
        TimeFrame::Minute5,
        TimeFrame::Minute15,
        TimeFrame::Minute30,
        TimeFrame::Minute45,
        TimeFrame::Hour1,
        TimeFrame::Hour2,
        TimeFrame::Hour4,
        TimeFrame::Hour6,
        TimeFrame::Hour8,
        TimeFrame::Hour12,
        TimeFrame::Day1,
        TimeFrame::Day3,
    ];

    pub const fn seconds(self) -> i64 {
        const MINUTE: i64 = 60;
        const HOUR: i64 = 60 * MINUTE;
        const DAY: i64 = 24 * HOUR;
        match self {
            TimeFrame::Minute1 => MINUTE,
            TimeFrame::Minute3 => 3 * MINUTE,
            TimeFrame::Minute5 => 5 * MINUTE,
            TimeFrame::Minute15 => 15 * MINUTE,
            TimeFrame::Minute30 => 30 * MINUTE,
            TimeFrame::Minute45 => 45 * MINUTE,
            TimeFrame::Hour1 => HOUR,
            TimeFrame::Hour2 => 2 * HOUR,
            TimeFrame::Hour4 => 4 * HOUR,
            TimeFrame::Hour6 => 6 * HOUR,
            TimeFrame::Hour8 => 8 * HOUR,
            TimeFrame::Hour12 => 12 * HOUR,
            TimeFrame::Day1 => DAY,
            TimeFrame::Day3 => 3 * DAY,
        }
    }

    pub fn from_seconds(seconds: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|tf| tf.seconds() == seconds)
    }

    /// The finer interval this one is aggregated from. `Minute1` is the
    /// finest and has none.
    pub const fn base(self) -> Option<TimeFrame> {
        match self {
            TimeFrame::Minute1 => None,
            TimeFrame::Minute3 | TimeFrame::Minute5 => Some(TimeFrame::Minute1),
            TimeFrame::Minute15 => Some(TimeFrame::Minute5),
            TimeFrame::Minute30 | TimeFrame::Minute45 | TimeFrame::Hour1 => Some(TimeFrame::Minute15),
            TimeFrame::Hour2 => Some(TimeFrame::Hour1),
            TimeFrame::Hour4 | TimeFrame::Hour6 => Some(TimeFrame::Hour2),
            TimeFrame::Hour8 => Some(TimeFrame::Hour4),
            TimeFrame::Hour12 => Some(TimeFrame::Hour6),
            TimeFrame::Day1 => Some(TimeFrame::Hour12),
            TimeFrame::Day3 => Some(TimeFrame::Day1),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1m",
            TimeFrame::Minute3 => "3m",
            TimeFrame::Minute5 => "5m",
            TimeFrame::Minute15 => "15m",
            TimeFrame::Minute30 => "30m",
            TimeFrame::Minute45 => "45m",
            TimeFrame::Hour1 => "1h",
            TimeFrame::Hour2 => "2h",
            TimeFrame::Hour4 => "4h",
            TimeFrame::Hour6 => "6h",
            TimeFrame::Hour8 => "8h",
            TimeFrame::Hour12 => "12h",
            TimeFrame::Day1 => "1d",
            TimeFrame::Day3 => "3d",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tf| tf.label() == s)
            .ok_or_else(|| format!("unknown time frame '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds() {
        assert_eq!(TimeFrame::Minute1.seconds(), 60);
        assert_eq!(TimeFrame::Minute45.seconds(), 2700);
        assert_eq!(TimeFrame::Hour12.seconds(), 43_200);
        assert_eq!(TimeFrame::Day1.seconds(), 86_400);
        assert_eq!(TimeFrame::Day3.seconds(), 259_200);
    }

    #[test]
    fn test_base_divides_interval() {
        for tf in TimeFrame::ALL {
            if let Some(base) = tf.base() {
                assert!(base < tf);
                assert_eq!(tf.seconds() % base.seconds(), 0, "{} from {}", tf, base);
            }
        }
        assert_eq!(TimeFrame::Minute1.base(), None);
        assert_eq!(TimeFrame::Hour1.base(), Some(TimeFrame::Minute15));
    }

    #[test]
    fn test_labels_round_trip() {
        for tf in TimeFrame::ALL {
            assert_eq!(tf.to_string().parse::<TimeFrame>(), Ok(tf));
            assert_eq!(TimeFrame::from_seconds(tf.seconds()), Some(tf));
            assert_eq!(serde_json::to_string(&tf).unwrap(), format!("\"{}\"", tf.label()));
        }
        assert!("2m".parse::<TimeFrame>().is_err());
        assert_eq!(TimeFrame::from_seconds(61), None);
    }
}
