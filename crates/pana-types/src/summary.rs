use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Summary length tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySize {
    Bulleted,
    #[default]
    Short,
    Long,
}

impl SummarySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummarySize::Bulleted => "bulleted",
            SummarySize::Short => "short",
            SummarySize::Long => "long",
        }
    }

    /// Target word count for the tier, if any
    pub fn word_target(&self) -> Option<u32> {
        match self {
            SummarySize::Bulleted => None,
            SummarySize::Short => Some(500),
            SummarySize::Long => Some(1000),
        }
    }
}

impl fmt::Display for SummarySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown summary size '{0}' (expected bulleted, short or long)")]
pub struct UnknownSize(pub String);

impl FromStr for SummarySize {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bulleted" => Ok(SummarySize::Bulleted),
            "short" => Ok(SummarySize::Short),
            "long" => Ok(SummarySize::Long),
            _ => Err(UnknownSize(s.to_string())),
        }
    }
}

/// Cached summary as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub page_path: String,
    pub summary: String,
    pub size: SummarySize,
    pub generated_at: DateTime<Utc>,
}

impl SummaryRecord {
    pub fn new(page_path: impl Into<String>, summary: impl Into<String>, size: SummarySize) -> Self {
        Self {
            page_path: page_path.into(),
            summary: summary.into(),
            size,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes_case_insensitively() {
        assert_eq!("Long".parse::<SummarySize>().unwrap(), SummarySize::Long);
        assert_eq!(" bulleted ".parse::<SummarySize>().unwrap(), SummarySize::Bulleted);
        assert!("medium".parse::<SummarySize>().is_err());
    }

    #[test]
    fn default_is_short() {
        assert_eq!(SummarySize::default(), SummarySize::Short);
        assert_eq!(SummarySize::Short.word_target(), Some(500));
        assert_eq!(SummarySize::Bulleted.word_target(), None);
    }

    #[test]
    fn record_wire_shape() {
        let record = SummaryRecord::new("docs/intro.md", "text", SummarySize::Long);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["pagePath"], "docs/intro.md");
        assert_eq!(json["size"], "long");
        assert!(json["generatedAt"].is_string());
    }
}
