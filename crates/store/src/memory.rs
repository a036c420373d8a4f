//! In-memory record store.
//!
//! Backs the engine tests and local dry runs. Failures can be injected per
//! operation to exercise the degraded paths of the workflows.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::records::{TransactionNew, TransactionRecord, UserNew, UserRecord};

/// Operations that can be made to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    FindUser,
    CreateUser,
    SetPoints,
    CreateTransaction,
    ListTransactions,
    DeleteTransaction,
}

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    transactions: Vec<TransactionRecord>,
    seq: u64,
    failures: HashMap<Op, usize>,
}

/// Clones share the same backing state, like clones of an HTTP client share
/// the same remote store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` calls of `op` fail with
    /// [`StoreError::Unavailable`].
    pub fn inject_failures(&self, op: Op, count: usize) {
        let mut inner = self.lock();
        *inner.failures.entry(op).or_insert(0) += count;
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.lock().transactions.len()
    }

    /// Signed point deltas of the user's transactions, in insertion order.
    pub fn transaction_deltas(&self, telegram_id: &str) -> Vec<i64> {
        let inner = self.lock();
        let Some(user) = inner.users.iter().find(|u| u.telegram_id == telegram_id) else {
            return Vec::new();
        };
        inner
            .transactions
            .iter()
            .filter(|t| t.user_id == user.id)
            .map(|t| t.points)
            .collect()
    }

    pub fn points_of(&self, telegram_id: &str) -> Option<i64> {
        self.lock()
            .users
            .iter()
            .find(|u| u.telegram_id == telegram_id)
            .map(|u| u.points)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn take_failure(inner: &mut Inner, op: Op) -> Result<(), StoreError> {
        match inner.failures.get_mut(&op) {
            Some(left) if *left > 0 => {
                *left -= 1;
                Err(StoreError::Unavailable(format!("injected failure: {op:?}")))
            }
            _ => Ok(()),
        }
    }
}

impl crate::RecordStore for MemoryStore {
    async fn find_user(&self, telegram_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, Op::FindUser)?;
        Ok(inner
            .users
            .iter()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn create_user(&self, user: &UserNew) -> Result<UserRecord, StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, Op::CreateUser)?;
        inner.seq += 1;
        let record = UserRecord {
            id: format!("user_{}", inner.seq),
            telegram_id: user.telegram_id.clone(),
            name: user.name.clone(),
            points: user.points,
        };
        inner.users.push(record.clone());
        Ok(record)
    }

    async fn set_points(&self, user_id: &str, points: i64) -> Result<(), StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, Op::SetPoints)?;
        let user = inner.users.iter_mut().find(|u| u.id == user_id);
        match user {
            Some(user) => {
                user.points = points;
                Ok(())
            }
            None => Err(StoreError::Unavailable(format!(
                "no user record {user_id}"
            ))),
        }
    }

    async fn create_transaction(
        &self,
        txn: &TransactionNew,
    ) -> Result<TransactionRecord, StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, Op::CreateTransaction)?;
        inner.seq += 1;
        let record = TransactionRecord {
            id: format!("txn_{}", inner.seq),
            user_id: txn.user_id.clone(),
            kind: txn.kind,
            amount: txn.amount,
            points: txn.points,
        };
        inner.transactions.push(record.clone());
        Ok(record)
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionRecord>, StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, Op::ListTransactions)?;
        Ok(inner
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_transaction(&self, txn_id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner, Op::DeleteTransaction)?;
        let before = inner.transactions.len();
        inner.transactions.retain(|t| t.id != txn_id);
        if inner.transactions.len() == before {
            return Err(StoreError::Unavailable(format!("no transaction {txn_id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordStore;

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let store = MemoryStore::new();
        store.inject_failures(Op::FindUser, 1);

        assert!(store.find_user("42").await.is_err());
        assert!(store.find_user("42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_then_find_roundtrips() {
        let store = MemoryStore::new();
        let created = store
            .create_user(&UserNew::for_signup("42", "Ayaan"))
            .await
            .unwrap();

        let found = store.find_user("42").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.points, 0);
    }
}
