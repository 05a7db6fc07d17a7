pub mod indexer;
pub mod prefs;

pub use indexer::{QueryOutcome, SearchConfig, SearchEntry, SearchHit, SearchIndex};
pub use prefs::PreferenceStore;
