//! Domain entities. Pure data structures for the form and its results.
//!
//! No HTTP/terminal types here; adapters map into these.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Document chosen by the user. Bytes are shared so state snapshots stay cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Target language for the translated summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Fr,
    Es,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Hi, Language::Fr, Language::Es];

    /// Wire code sent in the `language` form field.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Fr => "fr",
            Language::Es => "es",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Fr => "French",
            Language::Es => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "Unsupported language '{}'. Choose one of: en, hi, fr, es.",
                    s
                ))
            })
    }
}

/// Readability score as returned by the service: a number, a free-form string, or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadabilityScore {
    Number(serde_json::Number),
    Text(String),
    #[default]
    Missing,
}

/// Largest float magnitude still printed as an integer.
const MAX_INTEGRAL_FLOAT: f64 = 9_007_199_254_740_992.0;

impl fmt::Display for ReadabilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // integral floats print without a fractional part: 0.0 shows as "0"
            ReadabilityScore::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < MAX_INTEGRAL_FLOAT => {
                    write!(f, "{}", v as i64)
                }
                _ => write!(f, "{}", n),
            },
            ReadabilityScore::Text(s) => f.write_str(s),
            ReadabilityScore::Missing => Ok(()),
        }
    }
}

/// Result of one summarize call. Always replaced as a whole, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    /// Summary as HTML (keywords may be wrapped in `<b>`). Never rendered as markup.
    pub summary_html: String,
    pub bullets: String,
    pub faq: String,
    pub keywords: Vec<String>,
    pub citations: Vec<String>,
    pub readability_score: ReadabilityScore,
}

impl AnalysisResult {
    /// The result sections are shown together, and only once a summary exists.
    pub fn is_displayable(&self) -> bool {
        !self.summary_html.is_empty()
    }
}

/// All state owned by the form controller. Published as snapshots on every change.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub file: Option<SelectedFile>,
    pub language: Language,
    pub result: AnalysisResult,
    pub question: String,
    pub answer: String,
    /// True only while a summarize request is in flight.
    pub loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_code() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!(" HI ".parse::<Language>().unwrap(), Language::Hi);
        assert!(matches!(
            "de".parse::<Language>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_language_default_is_english() {
        assert_eq!(Language::default(), Language::En);
        assert_eq!(Language::default().code(), "en");
    }

    #[test]
    fn test_readability_score_keeps_number_formatting() {
        let int: ReadabilityScore = serde_json::from_str("72").unwrap();
        let float: ReadabilityScore = serde_json::from_str("0.15").unwrap();
        let text: ReadabilityScore = serde_json::from_str(r#""easy""#).unwrap();
        assert_eq!(int.to_string(), "72");
        assert_eq!(float.to_string(), "0.15");
        assert_eq!(text.to_string(), "easy");
    }

    #[test]
    fn test_readability_score_integral_float_prints_as_integer() {
        let zero: ReadabilityScore = serde_json::from_str("0.0").unwrap();
        let negative: ReadabilityScore = serde_json::from_str("-2.0").unwrap();
        let polarity: ReadabilityScore = serde_json::from_str("-0.25").unwrap();
        assert_eq!(zero.to_string(), "0");
        assert_eq!(negative.to_string(), "-2");
        assert_eq!(polarity.to_string(), "-0.25");
    }

    #[test]
    fn test_readability_score_null_is_missing() {
        let score: ReadabilityScore = serde_json::from_str("null").unwrap();
        assert_eq!(score, ReadabilityScore::Missing);
        assert_eq!(score.to_string(), "");
        assert_eq!(ReadabilityScore::default(), ReadabilityScore::Missing);
    }

    #[test]
    fn test_result_displayable_only_with_summary() {
        let mut result = AnalysisResult {
            bullets: "- a".to_string(),
            keywords: vec!["lease".to_string()],
            ..Default::default()
        };
        assert!(!result.is_displayable());
        result.summary_html = "<p>ok</p>".to_string();
        assert!(result.is_displayable());
    }
}
