mod assertions;
mod config;
mod ingestion;
mod util;
