use thiserror::Error;

/// Every way a fetch cycle can fail.  All variants end in the same degraded
/// record; the variant only matters for logs and observers.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid metadata request for {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("metadata request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("metadata service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("metadata response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("metadata response has no data object")]
    MissingData,

    #[error("metadata source aborted: {0}")]
    Aborted(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) if e.is_status() => FetchError::Status(status),
            _ => FetchError::Transport(e),
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cause() {
        let e = FetchError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(e.to_string(), "metadata service returned status 502 Bad Gateway");
        assert_eq!(
            FetchError::MissingData.to_string(),
            "metadata response has no data object"
        );
    }

    #[test]
    fn json_errors_convert_to_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::Decode(_)));
    }
}
