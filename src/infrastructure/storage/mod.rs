//! Local filesystem storage.
//!
//! Layout under the storage root:
//!
//! ```text
//! <root>/datasets/<name>/items.jsonl
//! <root>/key_value_stores/<name>/<key>
//! ```

mod local_dataset;
mod local_key_value_store;

pub use local_dataset::LocalDatasetRepository;
pub use local_key_value_store::LocalKeyValueRepository;
