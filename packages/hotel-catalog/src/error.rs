//! Error types for hotel-catalog

use std::fmt;
use thiserror::Error;

/// Catalog error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Review references a hotel id that is not in the hotel index
    UnknownHotel,
    /// Rating outside 1..=5
    InvalidRating,
    /// Submission time does not match `yyyy-MM-ddTHH:mm:ss`
    InvalidDate,
    /// Source file missing or unreadable, report not writable
    IO,
    /// JSON decoding errors
    Serialization,
    /// Configuration errors
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownHotel => "unknown_hotel",
            ErrorKind::InvalidRating => "invalid_rating",
            ErrorKind::InvalidDate => "invalid_date",
            ErrorKind::IO => "io",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct CatalogError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl CatalogError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn unknown_hotel(hotel_id: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnknownHotel,
            format!("Unknown hotel: {}", hotel_id.into()),
        )
    }

    pub fn invalid_rating(rating: i64) -> Self {
        Self::new(
            ErrorKind::InvalidRating,
            format!("Rating {} not in 1..=5", rating),
        )
    }

    pub fn invalid_date(date: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::InvalidDate,
            format!("Unparseable submission time: {:?}", date.into()),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::io(format!("I/O error: {}", err)).with_source(err)
    }
}

// JSON error conversions
impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::serialization(format!("JSON error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
