//! Object metadata retrieval.

use tracing::instrument;

use forcelink_client::Result;

impl super::SalesforceClient {
    /// Fetch the metadata description document for an object type.
    ///
    /// Returns the raw describe document as text; callers that want
    /// structure parse it themselves. Unknown object types fail with
    /// `NotFound`.
    #[instrument(skip(self))]
    pub async fn read_metadata(&self, object_type: &str) -> Result<String> {
        Self::check_object_type(object_type)?;
        let session = self.require_session()?;
        let url = self.rest_url(session, &format!("sobjects/{}/describe", object_type));

        let request = self.http.get(&url).bearer_auth(session.access_token());
        let response = self.http.execute(request).await?;
        response.text().await
    }
}
