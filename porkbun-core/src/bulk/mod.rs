//! Bulk record files
//!
//! [`normalizer`] converts between the JSON/CSV bulk schema and typed operations;
//! the batch itself runs in [`crate::services::BulkService`].

pub mod normalizer;

pub use normalizer::{
    document_from_operations, document_from_records, parse, parse_csv, parse_json, render,
    to_csv, to_json,
};
