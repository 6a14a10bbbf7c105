use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Request to {url} failed: {source}")]
    Transfer {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Transfer interrupted: {0}")]
    Stream(#[source] std::io::Error),

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    #[error("Destination is a directory: {path}")]
    DestinationIsDirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },
}

impl FetchError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        FetchError::ConfigError {
            message: message.into(),
        }
    }

    /// Maps an IO error on `path`, surfacing permission problems with the path attached.
    pub fn from_io(error: std::io::Error, path: &std::path::Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => FetchError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => FetchError::Io(error),
        }
    }

    /// True for failures that happened on the network side of a download.
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            FetchError::Transfer { .. } | FetchError::HttpStatus { .. } | FetchError::Stream(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_keeps_path() {
        let error = FetchError::from_io(
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            std::path::Path::new("/locked/out.bin"),
        );
        let locked = std::path::Path::new("/locked/out.bin");
        assert!(matches!(error, FetchError::PermissionDenied { ref path } if path == locked));
    }

    #[test]
    fn test_other_io_errors_pass_through() {
        let error = FetchError::from_io(
            std::io::Error::from(std::io::ErrorKind::NotFound),
            std::path::Path::new("missing"),
        );
        assert!(matches!(error, FetchError::Io(_)));
        assert!(!error.is_transfer());
    }

    #[test]
    fn test_status_is_transfer_error() {
        let error = FetchError::HttpStatus {
            url: "http://localhost/x".to_string(),
            status: 404,
        };
        assert!(error.is_transfer());
        assert_eq!(
            error.to_string(),
            "Server returned HTTP 404 for http://localhost/x"
        );
    }
}
