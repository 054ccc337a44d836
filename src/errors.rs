/*!
 * Error types for the imsc-convert library.
 *
 * `ImscError` covers everything the conversion core can fail on. Most
 * per-paragraph problems (bad inline markup, malformed effect entries,
 * unknown styles or regions) are recovered locally and never show up
 * here; the variants below are the failures that abort a whole call.
 */

use thiserror::Error;

/// Errors raised while reading or writing IMSC documents
#[derive(Error, Debug)]
pub enum ImscError {
    /// The document root is missing or is not a `tt` element
    #[error("Header import failed: {0}")]
    HeaderImport(String),

    /// The XML reader or writer failed
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be tokenized
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// The XML document is structurally broken (unbalanced tags, no root)
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A time expression could not be parsed
    #[error("Invalid time expression: {0}")]
    InvalidTime(String),

    /// Configuration values are inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing to the output buffer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The serialized buffer was not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Convenience alias used across the library
pub type ImscResult<T> = std::result::Result<T, ImscError>;

/// Application error type that wraps library errors for consumers
/// driving the conversion from files
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the conversion core
    #[error("Conversion error: {0}")]
    Conversion(#[from] ImscError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
