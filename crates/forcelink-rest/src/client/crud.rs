//! sObject CRUD operations.

use tracing::instrument;

use forcelink_client::{Error, ErrorKind, Result};

use crate::mapper::{self, IntoFieldMap, SObjectRecord};
use crate::sobject::CreateResult;

impl super::SalesforceClient {
    /// Point read of a single record by id.
    ///
    /// Zero matches is an expected, common outcome and is modeled as
    /// `Ok(None)`, not a failure; every other error propagates typed.
    #[instrument(skip(self))]
    pub async fn find_by_id<T: SObjectRecord>(
        &self,
        object_type: &str,
        id: &str,
    ) -> Result<Option<T>> {
        Self::check_object_type(object_type)?;
        let session = self.require_session()?;
        let url = self.rest_url(
            session,
            &format!("sobjects/{}/{}", object_type, urlencoding::encode(id)),
        );

        match self.get_json::<serde_json::Value>(session, &url).await {
            Ok(value) => Ok(Some(mapper::from_json(&value)?)),
            Err(err) if matches!(err.kind, ErrorKind::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Create a record and return its new id.
    ///
    /// The payload carries the record's registered members only (or the
    /// fields of an ad-hoc `FieldMap`). An unknown column fails with
    /// `InvalidField` and creates nothing.
    #[instrument(skip(self, record))]
    pub async fn create(&self, object_type: &str, record: impl IntoFieldMap) -> Result<String> {
        Self::check_object_type(object_type)?;
        let session = self.require_session()?;
        let url = self.rest_url(session, &format!("sobjects/{}", object_type));

        let request = self
            .http
            .post(&url)
            .bearer_auth(session.access_token())
            .json(&record.into_field_map())?;
        let result: CreateResult = self.http.send_json(request).await?;

        if !result.success {
            return Err(match result.errors.into_iter().next() {
                Some(e) => forcelink_client::map_remote_error(
                    200,
                    &e.status_code,
                    &e.message,
                    e.fields,
                ),
                None => Error::new(ErrorKind::Json(
                    "create reported failure without errors".to_string(),
                )),
            });
        }

        match result.id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(Error::new(ErrorKind::Json(
                "create response missing record id".to_string(),
            ))),
        }
    }

    /// Partial update of the named record.
    ///
    /// Succeeds on the platform's 204; fails with `NotFound` for an invalid
    /// id and `InvalidFieldForInsertUpdate` for a write-protected or unknown
    /// field.
    #[instrument(skip(self, record))]
    pub async fn update(
        &self,
        object_type: &str,
        id: &str,
        record: impl IntoFieldMap,
    ) -> Result<()> {
        Self::check_object_type(object_type)?;
        let session = self.require_session()?;
        let url = self.rest_url(
            session,
            &format!("sobjects/{}/{}", object_type, urlencoding::encode(id)),
        );

        let request = self
            .http
            .patch(&url)
            .bearer_auth(session.access_token())
            .json(&record.into_field_map())?;
        self.http.execute(request).await?;
        Ok(())
    }

    /// Delete the named record.
    ///
    /// Fails with `EntityIsDeleted` both for already-deleted records and for
    /// malformed ids: the platform reports both causes under one error
    /// code, and this client preserves that rather than inventing a
    /// distinction the server does not make.
    #[instrument(skip(self))]
    pub async fn delete(&self, object_type: &str, id: &str) -> Result<()> {
        Self::check_object_type(object_type)?;
        let session = self.require_session()?;
        let url = self.rest_url(
            session,
            &format!("sobjects/{}/{}", object_type, urlencoding::encode(id)),
        );

        let request = self
            .http
            .delete(&url)
            .bearer_auth(session.access_token());
        self.http.execute(request).await?;
        Ok(())
    }
}
