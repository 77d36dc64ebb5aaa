use std::io;
use axum::{http::{header, StatusCode}, response::{IntoResponse, Response}};

/// Custom error types for the media browser
#[derive(Debug)]
pub enum BrowserError {
    Io(io::Error),
    NotFound,
    InvalidPath,
    RangeNotSatisfiable { total: u64 },
    Task(String),
    Render(String),
}

impl BrowserError {
    /// Whether this error means the client asked for something that isn't there
    pub fn is_not_found(&self) -> bool {
        match self {
            BrowserError::NotFound => true,
            BrowserError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            ),
            _ => false,
        }
    }
}

impl From<io::Error> for BrowserError {
    fn from(err: io::Error) -> Self {
        BrowserError::Io(err)
    }
}

impl From<tokio::task::JoinError> for BrowserError {
    fn from(err: tokio::task::JoinError) -> Self {
        BrowserError::Task(err.to_string())
    }
}

impl std::fmt::Display for BrowserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrowserError::Io(e) => write!(f, "I/O error: {}", e),
            BrowserError::NotFound => write!(f, "Not found"),
            BrowserError::InvalidPath => write!(f, "Invalid path"),
            BrowserError::RangeNotSatisfiable { total } => {
                write!(f, "Range not satisfiable for {} bytes", total)
            }
            BrowserError::Task(e) => write!(f, "Task error: {}", e),
            BrowserError::Render(e) => write!(f, "Render error: {}", e),
        }
    }
}

impl std::error::Error for BrowserError {}

impl IntoResponse for BrowserError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            return (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/plain")],
                "Not found",
            )
                .into_response();
        }
        match self {
            BrowserError::InvalidPath => (
                StatusCode::FORBIDDEN,
                [(header::CONTENT_TYPE, "text/plain")],
                "Forbidden",
            )
                .into_response(),
            BrowserError::RangeNotSatisfiable { total } => (
                StatusCode::RANGE_NOT_SATISFIABLE,
                [
                    (header::CONTENT_TYPE, "text/plain".to_string()),
                    (header::CONTENT_RANGE, format!("bytes */{}", total)),
                ],
                "Range not satisfiable",
            )
                .into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                other.to_string(),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_reads_as_not_found() {
        let err = BrowserError::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(err.is_not_found());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_path_is_forbidden() {
        assert_eq!(BrowserError::InvalidPath.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unsatisfiable_range_reports_total() {
        let resp = BrowserError::RangeNotSatisfiable { total: 1000 }.into_response();
        assert_eq!(resp.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(resp.headers()[header::CONTENT_RANGE], "bytes */1000");
    }

    #[test]
    fn other_io_errors_are_internal() {
        let err = BrowserError::from(io::Error::other("disk on fire"));
        assert!(!err.is_not_found());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
