use crate::error::{AdminError, Result};
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads typed records from a CSV source with a header row.
///
/// Fields are whitespace-trimmed and rows may omit trailing optional columns.
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RecordReader<R> {
    /// Creates a new `RecordReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records.
    pub fn records<T: DeserializeOwned>(self) -> impl Iterator<Item = Result<T>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(AdminError::from))
    }

    /// Reads every record, stopping at the first malformed row.
    pub fn read_all<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        self.records().collect()
    }
}
