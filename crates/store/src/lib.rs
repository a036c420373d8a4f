//! Record-store client.
//!
//! The bot persists nothing locally: users and transactions live in a
//! PocketBase-style record store reached over HTTP. This crate holds the wire
//! types for the two collections, the [`RecordStore`] trait the workflows are
//! written against, the HTTP implementation and an in-memory one for tests
//! and dry runs.

pub use error::StoreError;
pub use memory::MemoryStore;
pub use pocketbase::PocketBase;
pub use records::{TransactionNew, TransactionRecord, TxnKind, UserNew, UserRecord};

mod error;
pub mod memory;
mod pocketbase;
mod records;

/// Operations the workflows need from the record store.
///
/// One method per REST round-trip; every call is fallible and callers are
/// expected to handle the failure branch instead of assuming success.
pub trait RecordStore {
    /// Looks up a user by the Telegram-assigned identifier.
    fn find_user(
        &self,
        telegram_id: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, StoreError>> + Send;

    fn create_user(
        &self,
        user: &UserNew,
    ) -> impl Future<Output = Result<UserRecord, StoreError>> + Send;

    /// Overwrites the persisted point balance of an existing user record.
    fn set_points(
        &self,
        user_id: &str,
        points: i64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn create_transaction(
        &self,
        txn: &TransactionNew,
    ) -> impl Future<Output = Result<TransactionRecord, StoreError>> + Send;

    /// Lists every transaction referencing the given user record.
    fn list_transactions(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<TransactionRecord>, StoreError>> + Send;

    fn delete_transaction(
        &self,
        txn_id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
