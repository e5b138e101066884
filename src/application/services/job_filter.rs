//! Post-fetch filtering of job postings.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::entities::{FilteredJobRecord, RawJobRecord, SearchConfig};

/// Titles that mark entry-level postings.
static FRESHER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)fresher|intern|graduate").unwrap());

/// Predicate chain applied to every fetched posting.
///
/// A posting is kept only if every active rule passes. Rules whose field is
/// missing from the posting pass, except the company rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub exclude_freshers: bool,
    pub only_remote: bool,
    pub min_salary: Option<f64>,
    /// Stored lowercased.
    pub company_name: Option<String>,
}

impl JobFilter {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            exclude_freshers: config.exclude_freshers,
            only_remote: config.only_remote,
            min_salary: config.min_salary,
            company_name: config
                .company_name
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_lowercase),
        }
    }

    /// Returns whether `record` passes every active rule.
    pub fn matches(&self, record: &RawJobRecord) -> bool {
        if self.exclude_freshers && record.title().is_some_and(|t| FRESHER_REGEX.is_match(t)) {
            return false;
        }

        if self.only_remote
            && record
                .location()
                .is_some_and(|l| !l.to_lowercase().contains("remote"))
        {
            return false;
        }

        if let Some(min) = self.min_salary
            && record.salary().is_some_and(|salary| salary < min)
        {
            return false;
        }

        if let Some(ref company) = self.company_name {
            let matches_company = record
                .company()
                .is_some_and(|c| c.to_lowercase().contains(company.as_str()));
            if !matches_company {
                return false;
            }
        }

        true
    }

    /// Keeps the passing records, in input order, stamped with `source`.
    ///
    /// Input records are not modified; passing ones are cloned.
    pub fn apply(&self, records: &[RawJobRecord], source: &str) -> Vec<FilteredJobRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .map(|record| FilteredJobRecord::new(source, record.clone()))
            .collect()
    }
}
