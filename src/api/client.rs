use async_trait::async_trait;
use log::{debug, info};

use super::source::{CorpusSource, FetchError};
use crate::core::corpus::Corpus;
use crate::server::CORPUS_ROUTE;

/// Fetches the merged corpus from a running `lectio serve`.
///
/// # Example
/// ```no_run
/// use lectio::api::{CorpusSource, HttpCorpusSource};
/// # async fn demo() {
/// let source = HttpCorpusSource::new("http://127.0.0.1:3000".to_string());
/// match source.fetch().await {
///     Ok(corpus) => println!("{} books", corpus.books.len()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// # }
/// ```
pub struct HttpCorpusSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCorpusSource {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, CORPUS_ROUTE)
    }
}

#[async_trait]
impl CorpusSource for HttpCorpusSource {
    fn describe(&self) -> String {
        self.url()
    }

    async fn fetch(&self) -> Result<Corpus, FetchError> {
        let url = self.url();
        info!("Fetching corpus from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let corpus: Corpus = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;
        debug!(
            "Fetched {} books from {}",
            corpus.books.len(),
            self.base_url
        );
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strips_trailing_slash() {
        let source = HttpCorpusSource::new("http://localhost:3000/".to_string());
        assert_eq!(source.describe(), "http://localhost:3000/api/bible-data");
    }
}
