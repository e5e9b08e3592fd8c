//! SOQL query operations.

use tracing::instrument;

use forcelink_client::Result;

use crate::mapper::SObjectRecord;
use crate::query::{QueryPage, QueryResult};

impl super::SalesforceClient {
    /// Execute a SOQL query and return the first page of results.
    ///
    /// The SOQL text is sent verbatim (URL-encoded for transport only).
    /// Date and date-time literals belong in the text unquoted; escaping
    /// user-provided values is the caller's responsibility; use
    /// `forcelink_client::soql::escape_string` for anything interpolated
    /// into the WHERE clause. Malformed SOQL surfaces as a `Generic` error
    /// carrying the remote message.
    #[instrument(skip(self))]
    pub async fn query<T: SObjectRecord>(&self, soql: &str) -> Result<QueryResult<T>> {
        let session = self.require_session()?;
        let url = format!(
            "{}/services/data/v{}/query?q={}",
            session.instance_url(),
            self.api_version(),
            urlencoding::encode(soql)
        );
        let page: QueryPage = self.get_json(session, &url).await?;
        page.into_mapped()
    }

    /// Fetch the next page of query results from a pagination cursor.
    #[instrument(skip(self))]
    pub async fn query_more<T: SObjectRecord>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        let session = self.require_session()?;
        let url = self.absolute_url(session, next_records_url);
        let page: QueryPage = self.get_json(session, &url).await?;
        page.into_mapped()
    }

    /// Execute a SOQL query, following pagination cursors until exhausted.
    ///
    /// The callback is invoked once per page, in server-delivered order,
    /// with exactly the records of that page; the accumulated sequence of
    /// every page is returned. Page fetches are sequential: each cursor
    /// comes from the previous page.
    #[instrument(skip(self, on_batch))]
    pub async fn query_batch<T, F>(&self, soql: &str, mut on_batch: F) -> Result<Vec<T>>
    where
        T: SObjectRecord,
        F: FnMut(&[T]),
    {
        let mut all_records = Vec::new();
        let mut page = self.query::<T>(soql).await?;

        loop {
            on_batch(&page.records);
            all_records.append(&mut page.records);

            match page.next_records_url.take() {
                Some(next) => page = self.query_more(&next).await?,
                None => break,
            }
        }

        Ok(all_records)
    }
}
