pub mod classifier;
pub mod config;
pub mod domain_utils;
pub mod probe;
pub mod similarity;
pub mod verdict;

pub use classifier::UrlClassifier;
pub use config::{ClassifierConfig, ProbeConfig};
pub use probe::{FetchError, Fetcher, HttpFetcher};
pub use verdict::{Status, Verdict};
