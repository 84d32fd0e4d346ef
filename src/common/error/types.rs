//! Error type definitions.
use thiserror::Error;

/// Main error type for quire operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// A mandatory part of the package is absent
    #[error("Not a valid document package: missing part '{0}'")]
    MissingPart(String),

    /// A resource referenced from the content is not in the package
    #[error("Package has no resource '{0}'")]
    MissingResource(String),

    /// An element lacks an attribute it cannot be interpreted without
    #[error("Element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// Element kind the structural parser has no rule for
    #[error("Unknown element kind: <{0}>")]
    UnknownElement(String),

    /// Markup shape the document model cannot represent
    #[error("Unsupported structure: {0}")]
    Structure(String),

    /// Internal consistency failure between parser and cleaner
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Attribute value that does not parse as its declared type
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Load errors: the package itself is unusable.
    pub fn is_fatal_load(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::Zip(_)
                | Error::Xml(_)
                | Error::MissingPart(_)
                | Error::MissingResource(_)
                | Error::MissingAttribute { .. }
        )
    }

    /// Structural errors: the markup has a shape the model cannot represent.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::UnknownElement(_) | Error::Structure(_) | Error::Consistency(_)
        )
    }
}

/// Result type for quire operations.
pub type Result<T> = std::result::Result<T, Error>;
