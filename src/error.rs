pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("ang {ang} could not be fetched: {reason}")]
    PageNotFound { ang: u32, reason: String },
    #[error("ang {ang} has no displayable verses")]
    EmptyPage { ang: u32 },
    #[error("verse {verse_id} detail lookup failed: {reason}")]
    VerseDetail { verse_id: u64, reason: String },
    #[error("http request failed")]
    Http(#[from] reqwest::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn page_not_found(ang: u32, reason: impl std::fmt::Display) -> Self {
        Self::PageNotFound {
            ang,
            reason: reason.to_string(),
        }
    }

    pub fn empty_page(ang: u32) -> Self {
        Self::EmptyPage { ang }
    }

    pub fn verse_detail(verse_id: u64, reason: impl std::fmt::Display) -> Self {
        Self::VerseDetail {
            verse_id,
            reason: reason.to_string(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Whole-page failures the caller may recover from by moving elsewhere.
    pub fn is_page_failure(&self) -> bool {
        matches!(self, Self::PageNotFound { .. } | Self::EmptyPage { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn page_errors_carry_ang_in_message() {
        let err = AppError::empty_page(12);
        assert!(matches!(err, AppError::EmptyPage { ang: 12 }));
        assert_eq!(err.to_string(), "ang 12 has no displayable verses");

        let err = AppError::page_not_found(1431, "out of range");
        assert_eq!(err.to_string(), "ang 1431 could not be fetched: out of range");
        assert!(err.is_page_failure());
    }

    #[test]
    fn verse_detail_error_is_not_a_page_failure() {
        let err = AppError::verse_detail(40, "timeout");
        assert!(!err.is_page_failure());
        assert_eq!(err.to_string(), "verse 40 detail lookup failed: timeout");
    }
}
