//! Adapters between the outside world (CSV and JSON files) and the
//! application layer.

pub mod csv;
pub mod json;
