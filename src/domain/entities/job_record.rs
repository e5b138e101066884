//! Job postings as returned by the search API and as kept after filtering.

use serde::Deserialize;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

const TITLE_KEYS: &[&str] = &["title", "jobTitle"];
const URL_KEYS: &[&str] = &["url", "link", "jobUrl", "applyLink"];
const COMPANY_KEYS: &[&str] = &["company", "companyName"];
const LOCATION_KEYS: &[&str] = &["location", "locationName"];
const SALARY_KEYS: &[&str] = &["salary", "minSalary"];

/// One posting exactly as the remote API returned it.
///
/// The record is an open JSON object. Only the handful of fields needed for
/// filtering and deduplication are interpreted; everything else passes
/// through untouched.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct RawJobRecord(Map<String, Value>);

impl RawJobRecord {
    /// Wraps a JSON value, or returns `None` if it is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn title(&self) -> Option<&str> {
        self.first_text(TITLE_KEYS)
    }

    pub fn url(&self) -> Option<&str> {
        self.first_text(URL_KEYS)
    }

    pub fn company(&self) -> Option<&str> {
        self.first_text(COMPANY_KEYS)
    }

    pub fn location(&self) -> Option<&str> {
        self.first_text(LOCATION_KEYS)
    }

    /// Numeric salary, if one can be read.
    ///
    /// Accepts JSON numbers and strings holding a plain number such as
    /// `"85000"` or `"85,000"`. Ranges, currency signs and units (`"$120K"`,
    /// `"10 LPA"`) count as missing.
    pub fn salary(&self) -> Option<f64> {
        SALARY_KEYS
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => parse_plain_number(s),
                _ => None,
            })
    }

    /// First non-blank string among `keys`.
    fn first_text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// Parses a string that is nothing but a number, allowing thousands separators.
fn parse_plain_number(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Identity used to collapse duplicate postings: `(url-or-title, source)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DedupKey {
    pub identity: String,
    pub source: String,
}

/// A posting that passed every active filter, stamped with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredJobRecord {
    pub source: String,
    pub record: RawJobRecord,
}

impl FilteredJobRecord {
    pub fn new(source: impl Into<String>, record: RawJobRecord) -> Self {
        Self {
            source: source.into(),
            record,
        }
    }

    /// Falls back to the title when the posting carries no URL. A posting
    /// with neither gets an empty identity.
    pub fn dedup_key(&self) -> DedupKey {
        let identity = self
            .record
            .url()
            .or_else(|| self.record.title())
            .unwrap_or_default()
            .to_string();

        DedupKey {
            identity,
            source: self.source.clone(),
        }
    }

    /// The record's fields followed by `source`.
    pub fn to_json(&self) -> Value {
        let mut map = self.record.fields().clone();
        map.shift_remove("source");
        map.insert("source".to_string(), Value::String(self.source.clone()));
        Value::Object(map)
    }
}

impl Serialize for FilteredJobRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.record.fields();
        let len = fields.len() + usize::from(!fields.contains_key("source"));
        let mut map = serializer.serialize_map(Some(len))?;

        for (key, value) in fields.iter().filter(|(k, _)| k.as_str() != "source") {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("source", &self.source)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawJobRecord {
        RawJobRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(RawJobRecord::from_value(json!("title")).is_none());
        assert!(RawJobRecord::from_value(json!([1, 2])).is_none());
        assert!(RawJobRecord::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_field_aliases() {
        let job = record(json!({
            "jobTitle": "Backend Engineer",
            "link": "https://jobs.example.com/1",
            "companyName": "Acme",
            "locationName": "Remote, EU"
        }));

        assert_eq!(job.title(), Some("Backend Engineer"));
        assert_eq!(job.url(), Some("https://jobs.example.com/1"));
        assert_eq!(job.company(), Some("Acme"));
        assert_eq!(job.location(), Some("Remote, EU"));
    }

    #[test]
    fn test_blank_text_counts_as_missing() {
        let job = record(json!({ "url": "  ", "title": "Dev" }));
        assert_eq!(job.url(), None);
        assert_eq!(job.title(), Some("Dev"));
    }

    #[test]
    fn test_salary_parsing() {
        assert_eq!(record(json!({ "salary": 50 })).salary(), Some(50.0));
        assert_eq!(record(json!({ "salary": " 85,000 " })).salary(), Some(85000.0));
        assert_eq!(record(json!({ "salary": "72000.5" })).salary(), Some(72000.5));
        assert_eq!(record(json!({ "salary": "competitive" })).salary(), None);
        assert_eq!(record(json!({ "salary": null })).salary(), None);
        assert_eq!(record(json!({})).salary(), None);
    }

    #[test]
    fn test_salary_with_units_counts_as_missing() {
        for text in ["$120K", "120k", "12.5k", "10 LPA", "$50,000 - $70,000", "NaN", "inf"] {
            assert_eq!(record(json!({ "salary": text })).salary(), None, "{text}");
        }
    }

    #[test]
    fn test_dedup_key_prefers_url() {
        let with_url = FilteredJobRecord::new(
            "indeed",
            record(json!({ "url": "https://x/1", "title": "Dev" })),
        );
        assert_eq!(with_url.dedup_key().identity, "https://x/1");
        assert_eq!(with_url.dedup_key().source, "indeed");

        let title_only = FilteredJobRecord::new("indeed", record(json!({ "title": "Dev" })));
        assert_eq!(title_only.dedup_key().identity, "Dev");

        let anonymous = FilteredJobRecord::new("indeed", record(json!({ "company": "Acme" })));
        assert_eq!(anonymous.dedup_key().identity, "");
    }

    #[test]
    fn test_serialization_appends_source() {
        let job = FilteredJobRecord::new(
            "linkedin",
            record(json!({ "title": "Dev", "source": "upstream", "salary": 10 })),
        );

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value, json!({ "title": "Dev", "salary": 10, "source": "linkedin" }));
        assert_eq!(job.to_json(), value);

        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["title", "salary", "source"]);
    }
}
