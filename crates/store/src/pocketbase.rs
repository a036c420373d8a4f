//! HTTP record store.
//!
//! PocketBase exposes per-collection CRUD endpoints under
//! `/api/collections/{name}/records`, with list filtering via a
//! `filter=field='value'` query parameter. Success is any 2xx status; error
//! bodies carry a `message` field.

use reqwest::Client;
use serde::Deserialize;

use crate::error::StoreError;
use crate::records::{ListResponse, TransactionNew, TransactionRecord, UserNew, UserRecord};

#[derive(Clone, Debug)]
pub struct PocketBase {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl PocketBase {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode<T: for<'de> serde::Deserialize<'de>>(
        resp: reqwest::Response,
    ) -> Result<T, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.message,
            Err(_) => "server error".to_string(),
        };
        Err(StoreError::Server { status, message })
    }

    async fn check(resp: reqwest::Response) -> Result<(), StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.message,
            Err(_) => "server error".to_string(),
        };
        Err(StoreError::Server { status, message })
    }

    /// List records matching `filter`, retrying once on transient network
    /// failure. Reads are safe to repeat; writes are not retried anywhere.
    async fn list<T: for<'de> serde::Deserialize<'de>>(
        &self,
        collection: &str,
        filter: String,
    ) -> Result<Vec<T>, StoreError> {
        let url = self.url(&format!("/api/collections/{collection}/records"));
        let send = || self.client.get(&url).query(&[("filter", filter.as_str())]);

        let result = match send().send().await {
            Ok(resp) => Self::decode::<ListResponse<T>>(resp).await,
            Err(err) => Err(StoreError::Network(err)),
        };
        let response = match result {
            Ok(list) => return Ok(list.items),
            Err(err) if err.is_transient() => {
                tracing::warn!("retrying list of {collection}: {err}");
                send().send().await?
            }
            Err(err) => return Err(err),
        };

        Ok(Self::decode::<ListResponse<T>>(response).await?.items)
    }
}

/// Equality filter expression, with single quotes escaped.
fn eq_filter(field: &str, value: &str) -> String {
    format!("{field}='{}'", value.replace('\'', "\\'"))
}

impl crate::RecordStore for PocketBase {
    async fn find_user(&self, telegram_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let mut items: Vec<UserRecord> = self
            .list("users", eq_filter("telegram_id", telegram_id))
            .await?;
        Ok(if items.is_empty() {
            None
        } else {
            Some(items.swap_remove(0))
        })
    }

    async fn create_user(&self, user: &UserNew) -> Result<UserRecord, StoreError> {
        let resp = self
            .client
            .post(self.url("/api/collections/users/records"))
            .json(user)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn set_points(&self, user_id: &str, points: i64) -> Result<(), StoreError> {
        let resp = self
            .client
            .patch(self.url(&format!("/api/collections/users/records/{user_id}")))
            .json(&serde_json::json!({ "points": points }))
            .send()
            .await?;
        Self::check(resp).await
    }

    async fn create_transaction(
        &self,
        txn: &TransactionNew,
    ) -> Result<TransactionRecord, StoreError> {
        let resp = self
            .client
            .post(self.url("/api/collections/transactions/records"))
            .json(txn)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionRecord>, StoreError> {
        self.list("transactions", eq_filter("user_id", user_id))
            .await
    }

    async fn delete_transaction(&self, txn_id: &str) -> Result<(), StoreError> {
        let resp = self
            .client
            .delete(self.url(&format!(
                "/api/collections/transactions/records/{txn_id}"
            )))
            .send()
            .await?;
        Self::check(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_join_tolerates_trailing_and_leading_slashes() {
        let pb = PocketBase::new(Client::new(), "http://store:8090/".to_string());
        assert_eq!(
            pb.url("/api/collections/users/records"),
            "http://store:8090/api/collections/users/records"
        );
    }

    #[test]
    fn filter_escapes_single_quotes() {
        assert_eq!(eq_filter("telegram_id", "42"), "telegram_id='42'");
        assert_eq!(eq_filter("name", "O'Neil"), "name='O\\'Neil'");
    }
}
