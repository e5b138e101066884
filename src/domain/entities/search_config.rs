//! Run input describing one job search.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::AppError;

/// Posting-date window accepted by the remote search API.
///
/// Serialized with the canonical literals `all`, `today`, `3days`, `week`
/// and `month`. A few spellings seen in older inputs are accepted as aliases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePosted {
    #[serde(rename = "all", alias = "anytime", alias = "any")]
    All,
    #[serde(rename = "today", alias = "24h")]
    Today,
    #[default]
    #[serde(rename = "3days", alias = "3 days")]
    ThreeDays,
    #[serde(rename = "week", alias = "past week")]
    Week,
    #[serde(rename = "month", alias = "past month")]
    Month,
}

impl DatePosted {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePosted::All => "all",
            DatePosted::Today => "today",
            DatePosted::ThreeDays => "3days",
            DatePosted::Week => "week",
            DatePosted::Month => "month",
        }
    }
}

/// `locationName` may be a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationInput {
    One(String),
    Many(Vec<String>),
}

impl LocationInput {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            LocationInput::One(location) => vec![location.clone()],
            LocationInput::Many(locations) => locations.clone(),
        }
    }
}

/// Search criteria for one run.
///
/// Immutable once parsed. Keys the pipeline does not know are kept in
/// [`SearchConfig::extra`] and forwarded to the remote API untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub include_keyword: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<LocationInput>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_locations: Vec<String>,

    /// Overrides the built-in source list when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "must name at least one source"))]
    pub sources: Option<Vec<String>>,

    #[serde(default = "default_pages_to_fetch")]
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub pages_to_fetch: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub date_posted: DatePosted,

    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub min_salary: Option<f64>,

    #[serde(default)]
    pub only_remote: bool,

    #[serde(default = "default_true")]
    pub exclude_freshers: bool,

    #[serde(default)]
    pub send_notification: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_pages_to_fetch() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            include_keyword: String::new(),
            location_name: None,
            additional_locations: Vec::new(),
            sources: None,
            pages_to_fetch: default_pages_to_fetch(),
            date_posted: DatePosted::default(),
            company_name: None,
            min_salary: None,
            only_remote: false,
            exclude_freshers: true,
            send_notification: false,
            extra: Map::new(),
        }
    }
}

impl SearchConfig {
    /// Parses and validates run input from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the bytes are not a JSON object of
    /// the expected shape or a field fails validation.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, AppError> {
        let config: SearchConfig = serde_json::from_slice(bytes).map_err(|e| {
            AppError::bad_request(
                "Run input is not a valid search configuration",
                serde_json::json!({ "reason": e.to_string() }),
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Primary locations followed by the additional ones, untrimmed.
    pub fn all_locations(&self) -> Vec<String> {
        let mut locations = self
            .location_name
            .as_ref()
            .map(LocationInput::to_vec)
            .unwrap_or_default();
        locations.extend(self.additional_locations.iter().cloned());
        locations
    }
}
