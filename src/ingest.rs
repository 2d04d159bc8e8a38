use crate::{Error, Value};
use std::str::FromStr;

/// Declared format of a fetched payload.
///
/// Only JSON is implemented; the format switch is a thin seam for future
/// response types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
}

impl FromStr for ResponseFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ResponseFormat::Json),
            _ => Err(Error::Ingestion(format!("unsupported format: \"{s}\""))),
        }
    }
}

impl ResponseFormat {
    /// The URL suffix for this format.
    pub fn suffix(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
        }
    }
}

/// Normalizes a raw fetched payload into the tree the resolver expects.
/// # Return
/// The decoded [`Value`] or an [`Error::Ingestion`] if the payload is empty
/// or cannot be parsed.
pub fn ingest(raw: &[u8], format: ResponseFormat) -> Result<Value, Error> {
    if raw.is_empty() {
        return Err(Error::Ingestion("empty payload".to_owned()));
    }

    log::debug!("ingesting {} bytes as {format:?}", raw.len());

    match format {
        ResponseFormat::Json => Ok(serde_json::from_slice(raw)?),
    }
}
