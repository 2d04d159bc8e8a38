use std::fmt::{self, Display};

/// Failure raised by ingestion, resolution or an assertion step.
///
/// All errors are raised synchronously at the point of detection; the first
/// failing predicate aborts the current scenario step.
#[derive(Debug)]
pub enum Error {
    /// Transport failure or empty body from the page fetcher.
    Fetch(String),
    /// Empty or unparseable payload, or an unsupported response format.
    Ingestion(String),
    /// A path segment or assertion pattern is not a valid regular expression.
    Pattern(String),
    /// A path resolved to nothing when a value was required.
    MissingProperty(String),
    /// The resolved value is present but fails the predicate.
    Assertion(String),
    /// A required configuration parameter is absent.
    Configuration(String),
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Error::Pattern(format!("invalid regex: {e}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Ingestion(e.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fetch(msg) => write!(f, "fetch error: {msg}"),
            Error::Ingestion(msg) => write!(f, "ingestion error: {msg}"),
            Error::Pattern(msg) => write!(f, "pattern error: {msg}"),
            Error::MissingProperty(msg) => write!(f, "missing property: {msg}"),
            Error::Assertion(msg) => write!(f, "assertion failed: {msg}"),
            Error::Configuration(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
