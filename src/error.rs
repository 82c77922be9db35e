//! Error types for fetching, label extraction and configuration.

use std::time::Duration;
use thiserror::Error;

/// A cycle-level failure. Any of these ends the cycle and discards
/// whatever was collected so far.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// The target URL does not parse.
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The aggregator stopped receiving before the walk finished.
    #[error("record sink closed before the walk finished")]
    SinkClosed,

    /// The producer task ended without reporting done or failed.
    #[error("producer exited without a terminal event")]
    ProducerVanished,

    /// A pipeline task panicked or was cancelled.
    #[error("pipeline task failed: {0}")]
    TaskFailed(String),

    /// The whole cycle took longer than the configured limit.
    #[error("cycle did not finish within {0:?}")]
    Timeout(Duration),
}

/// A raw label did not have the shape the extractor expects.
///
/// Handled per story: the field is left empty and the story is kept.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("label is empty after removing the icon prefix")]
    Empty,

    #[error("label {0:?} has no recognizable date")]
    NoDate(String),
}

/// Problems loading or validating the feed configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        let e = FetchError::Status {
            url: "https://thehackernews.com".to_string(),
            status: 503,
        };
        assert_eq!(e.to_string(), "https://thehackernews.com responded with status 503");

        let e = FetchError::Timeout(Duration::from_secs(120));
        assert_eq!(e.to_string(), "cycle did not finish within 120s");
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        use std::error::Error as _;

        let source = url::Url::parse("not a url").unwrap_err();
        let e = FetchError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("invalid url not a url"));
    }
}
