//! Prospector: search and enrichment engine for industrial lead generation.

pub mod backend;
pub mod credentials;
pub mod engine;
pub mod export;
pub mod google;
pub mod mock;
pub mod real;
pub mod signals;
pub mod types;

pub use backend::{SearchBackend, SearchItem, RESULTS_PER_QUERY};
pub use credentials::Credentials;
pub use engine::{DataSource, SearchEngine, SearchReport, Strategy};
pub use export::{to_csv_string, write_csv_file, SearchSummary, CSV_HEADERS, EXPORT_FILENAME};
pub use google::GoogleCseBackend;
pub use mock::MockGenerator;
pub use types::*;
