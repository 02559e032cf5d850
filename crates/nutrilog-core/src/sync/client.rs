//! REST client for the realtime-database mirror.

use reqwest::Client;
use url::Url;

use crate::streak::StreakSink;

use super::types::{StreakRecord, SyncError};

/// Client for one account's streak record.
///
/// The remote surface is a realtime-database REST tree: the record lives at
/// `users/<uid>/streakData.json` under the database base URL, and a PUT
/// overwrites it wholesale.
pub struct RealtimeMirror {
    client: Client,
    endpoint: Url,
}

impl RealtimeMirror {
    /// Build a mirror for the given database and account.
    ///
    /// # Errors
    /// Returns an error if the user id is empty or the base URL does not
    /// parse.
    pub fn new(database_url: &str, user_id: &str) -> Result<Self, SyncError> {
        if user_id.is_empty() {
            return Err(SyncError::MissingIdentity);
        }

        // Normalize the trailing slash so join() appends instead of
        // replacing the last path segment.
        let mut base = database_url.trim_end_matches('/').to_string();
        base.push('/');
        let base = Url::parse(&base).map_err(|e| SyncError::Endpoint(e.to_string()))?;

        let path = format!("users/{}/streakData.json", urlencoding::encode(user_id));
        let endpoint = base
            .join(&path)
            .map_err(|e| SyncError::Endpoint(e.to_string()))?;

        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    /// Full URL the record is written to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Overwrite the remote record.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    pub async fn put_streak(&self, record: &StreakRecord) -> Result<(), SyncError> {
        let response = self
            .client
            .put(self.endpoint.clone())
            .json(record)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SyncError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

impl StreakSink for RealtimeMirror {
    /// Spawn the PUT on the current runtime and drop the outcome.
    ///
    /// Outside a runtime the publish is skipped entirely; the next
    /// activity re-mirrors the full state anyway.
    fn publish(&self, record: StreakRecord) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        handle.spawn(async move {
            let _ = client.put(endpoint).json(&record).send().await;
        });
    }
}
