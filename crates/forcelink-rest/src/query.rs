//! SOQL query result types.

use serde::Deserialize;

use forcelink_client::Result;

use crate::mapper::{self, SObjectRecord};

/// Result of a SOQL query with records mapped into `T`.
///
/// Ordered as delivered by the server; empty (never null) when zero rows
/// match. `next_records_url` is present while more pages remain.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    pub total_size: u64,
    /// Whether all records are returned (no more pages).
    pub done: bool,
    /// Cursor to fetch the next batch of results.
    pub next_records_url: Option<String>,
    /// The mapped records.
    pub records: Vec<T>,
}

/// Wire shape of one result page, before record mapping.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryPage {
    #[serde(rename = "totalSize")]
    pub total_size: u64,
    pub done: bool,
    #[serde(rename = "nextRecordsUrl", default)]
    pub next_records_url: Option<String>,
    pub records: Vec<serde_json::Value>,
}

impl QueryPage {
    /// Map every record on the page through the object mapper.
    pub(crate) fn into_mapped<T: SObjectRecord>(self) -> Result<QueryResult<T>> {
        let records = self
            .records
            .iter()
            .map(mapper::from_json)
            .collect::<Result<Vec<T>>>()?;

        Ok(QueryResult {
            total_size: self.total_size,
            done: self.done,
            next_records_url: self.next_records_url,
            records,
        })
    }
}
