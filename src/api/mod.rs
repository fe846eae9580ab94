pub mod client;
pub mod source;

pub use client::HttpCorpusSource;
pub use source::{CorpusSource, FetchError, FileCorpusSource};
