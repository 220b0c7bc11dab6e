use crate::config::Config;
use crate::models::VoteTally;
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use thiserror::Error;

/// Anything that went wrong fetching or decoding the vote totals.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(StatusCode),
    #[error("invalid JSON in response: {0}")]
    Parse(#[from] serde_json::Error),
}

// Where the poller gets its numbers from
#[async_trait]
pub trait VoteSource: Send + Sync + 'static {
    async fn fetch_votes(&self) -> Result<VoteTally, FetchError>;
}

pub struct HttpVoteSource {
    http: reqwest::Client,
    url: String,
}

impl HttpVoteSource {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            url: config.votes_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl VoteSource for HttpVoteSource {
    async fn fetch_votes(&self) -> Result<VoteTally, FetchError> {
        debug!("GET {}", self.url);
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let json: serde_json::Value = serde_json::from_slice(&body)?;
        Ok(VoteTally::from_json(&json))
    }
}
