//! Data models for the client dashboard.
//!
//! This module contains the person record as returned by the person API,
//! plus the small enums that drive the client list view.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a person record.
///
/// The API sends numeric ids, but older payloads carried them as strings,
/// so both are accepted. Anything that does not read as a number sorts as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Integer(0)
    }
}

impl RecordId {
    /// Numeric value used for ordering.
    pub fn sort_key(&self) -> f64 {
        let value = match self {
            RecordId::Integer(n) => *n as f64,
            RecordId::Float(f) => *f,
            RecordId::Text(s) => parse_numeric_text(s).unwrap_or(0.0),
        };

        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

/// Read a text id the way the web client coerces it to a number: blank is
/// `0`, `0x`/`0o`/`0b` prefixes select the radix, anything else must be a
/// plain decimal literal.
fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0, |acc: f64, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    // `f64::from_str` also takes "inf" and "NaN", which are not numbers here.
    let is_decimal_literal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if is_decimal_literal {
        trimmed.parse::<f64>().ok()
    } else {
        None
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Integer(n) => write!(f, "{}", n),
            RecordId::Float(v) => write!(f, "{}", v),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Integer(id)
    }
}

/// Gender of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

/// Free-form key/value pair attached to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// A client record, in the shape the person API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identification: String,
    /// Age in years. `null` or a missing age reads as NaN.
    #[serde(default = "missing_age", deserialize_with = "deserialize_age")]
    pub age: f64,
    pub gender: Gender,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub drives: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wears_glasses: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub diabetic: bool,
    #[serde(default)]
    pub other_disease: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_attributes: Vec<AdditionalAttribute>,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn missing_age() -> f64 {
    f64::NAN
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl Person {
    /// Whether the record carries a non-empty "other disease" description.
    pub fn has_other_disease(&self) -> bool {
        self.other_disease
            .as_deref()
            .map(|d| !d.is_empty())
            .unwrap_or(false)
    }

    /// Short comma-separated list of the conditions a person has.
    pub fn condition_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        if self.drives {
            labels.push("drives");
        }
        if self.wears_glasses {
            labels.push("glasses");
        }
        if self.diabetic {
            labels.push("diabetic");
        }
        if let Some(disease) = self.other_disease.as_deref().filter(|d| !d.is_empty()) {
            labels.push(disease);
        }
        labels
    }
}

/// Status selector of the client list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Every client
    #[default]
    All,
    /// Only active clients
    Active,
    /// Only inactive clients
    Inactive,
}

impl StatusFilter {
    /// Whether a record with the given status passes the filter.
    pub fn accepts(self, active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => active,
            StatusFilter::Inactive => !active,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "All"),
            StatusFilter::Active => write!(f, "Active"),
            StatusFilter::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Order of the client list by id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Oldest first
    Asc,
    /// Newest first (default)
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ascending"),
            SortDirection::Desc => write!(f, "descending"),
        }
    }
}
