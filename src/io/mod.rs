//! File ingestion for selection datasets.
pub mod table;
