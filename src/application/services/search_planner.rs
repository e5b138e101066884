//! Expansion of one search configuration into atomic requests.

use crate::domain::entities::{AtomicRequest, SearchConfig};

/// Expands a [`SearchConfig`] into the cartesian product
/// `source × location × page`.
///
/// Holds the built-in source list used when the run input does not
/// override it. Pure: no I/O.
#[derive(Debug, Clone)]
pub struct SearchPlanner {
    default_sources: Vec<String>,
}

impl SearchPlanner {
    pub fn new(default_sources: Vec<String>) -> Self {
        Self { default_sources }
    }

    /// Sources for this run: the input override if present, otherwise the defaults.
    pub fn sources<'a>(&'a self, config: &'a SearchConfig) -> &'a [String] {
        config.sources.as_deref().unwrap_or(&self.default_sources)
    }

    /// Locations for this run, primary first, then additional ones.
    ///
    /// Falls back to a single empty location (no location filter) when none are given.
    pub fn locations(config: &SearchConfig) -> Vec<String> {
        let locations = config.all_locations();
        if locations.is_empty() {
            vec![String::new()]
        } else {
            locations
        }
    }

    /// Builds the ordered request list: source-major, then location, then page.
    ///
    /// `keyword` is the already-normalized keyword shared by every request.
    pub fn expand(&self, config: &SearchConfig, keyword: &str) -> Vec<AtomicRequest> {
        let sources = self.sources(config);
        let locations = Self::locations(config);
        let pages = config.pages_to_fetch;

        let mut requests = Vec::with_capacity(sources.len() * locations.len() * pages as usize);

        for source in sources {
            for location in &locations {
                for page in 1..=pages {
                    requests.push(AtomicRequest {
                        source: source.clone(),
                        location: location.trim().to_string(),
                        page,
                        keyword: keyword.to_string(),
                        date_posted: config.date_posted,
                    });
                }
            }
        }

        requests
    }
}
