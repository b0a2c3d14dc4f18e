//! Core data types for claims-metrics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::MetricsError;

/// Model prediction type.
pub type Score = f64;

/// Observed outcome type (claim frequency, severity, ...).
pub type Label = f64;

/// Exposure weight type.
pub type Weight = f64;

/// Train/test assignment of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleLabel {
    /// Row belongs to the training sample
    Train,
    /// Row belongs to the hold-out sample
    Test,
}

impl SampleLabel {
    /// Both labels, in reporting order.
    pub const ALL: [SampleLabel; 2] = [SampleLabel::Train, SampleLabel::Test];

    /// String form used in output columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleLabel::Train => "train",
            SampleLabel::Test => "test",
        }
    }

    /// Whether this is the training label.
    pub fn is_train(&self) -> bool {
        matches!(self, SampleLabel::Train)
    }
}

impl fmt::Display for SampleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleLabel {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(SampleLabel::Train),
            "test" => Ok(SampleLabel::Test),
            other => Err(MetricsError::invalid_input(format!(
                "sample label must be \"train\" or \"test\", got {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_label_display() {
        assert_eq!(SampleLabel::Train.to_string(), "train");
        assert_eq!(SampleLabel::Test.to_string(), "test");
    }

    #[test]
    fn test_sample_label_parse() {
        assert_eq!("train".parse::<SampleLabel>().unwrap(), SampleLabel::Train);
        assert_eq!("test".parse::<SampleLabel>().unwrap(), SampleLabel::Test);
        assert!("validation".parse::<SampleLabel>().is_err());
    }

    #[test]
    fn test_sample_label_serde() {
        let json = serde_json::to_string(&SampleLabel::Test).unwrap();
        assert_eq!(json, "\"test\"");
        let back: SampleLabel = serde_json::from_str("\"train\"").unwrap();
        assert_eq!(back, SampleLabel::Train);
    }
}
