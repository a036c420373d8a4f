//! Balance-update workflows.
//!
//! Every command is a short sequence of record-store round-trips with no
//! transactional guarantee: fetch-or-create the user, compute the point
//! delta, write the new balance, append the transaction. The sequence is
//! deliberately non-atomic (the store offers nothing better); each step is an
//! explicit fallible call and the returned [`Applied`] names exactly what was
//! persisted.

use store::{RecordStore, StoreError, TransactionNew, TxnKind, UserNew, UserRecord};

use crate::tiers::TierTable;

/// Monetary units per point: `points_delta = amount / POINTS_PER_UNIT`.
pub const POINTS_PER_UNIT: i64 = 10;

/// Point delta for a monetary amount. Integer division, so amounts under
/// [`POINTS_PER_UNIT`] earn nothing.
pub fn points_for(amount: i64) -> i64 {
    amount / POINTS_PER_UNIT
}

/// Result of a directory lookup.
///
/// `Detached` is the degraded fallback when the store could not produce a
/// record: it carries no identity and zero points, so downstream code stays
/// total and simply skips persistence.
#[derive(Clone, Debug)]
pub enum Account {
    Registered(UserRecord),
    Detached,
}

/// What a balance update managed to persist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Balance written and transaction appended.
    Persisted,
    /// Balance written but the transaction append failed; the log and the
    /// balance now diverge permanently.
    BalanceOnly,
    /// Nothing persisted. The computed numbers are a dry run.
    DryRun,
}

/// Outcome of a save/withdraw command.
#[derive(Clone, Debug)]
pub struct Applied {
    pub kind: TxnKind,
    pub amount: i64,
    /// Unsigned point delta shown to the user.
    pub points_delta: i64,
    pub new_points: i64,
    pub outcome: PersistOutcome,
}

/// Read-only projection of a user's standing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub points: i64,
    pub tier: String,
    /// Monetary value of the balance, `points * POINTS_PER_UNIT` saturating
    /// at `i64::MAX`.
    pub monetary_value: i64,
}

/// Outcome of a reset: deletions are individual and may partially fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetReport {
    pub deleted: usize,
    pub failed: usize,
    pub points_cleared: bool,
}

/// The savings-game workflows over a record store.
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    tiers: TierTable,
}

impl<S: RecordStore> Ledger<S> {
    pub fn new(store: S, tiers: TierTable) -> Self {
        Self { store, tiers }
    }

    /// Resolves a Telegram identifier to a user record, creating one with
    /// zero points on first sight.
    ///
    /// Best-effort idempotency only: the lookup-then-create sequence has no
    /// uniqueness guard, so two racing first commands may create duplicates.
    /// Store failures degrade to [`Account::Detached`] instead of erroring.
    pub async fn resolve_or_create(&self, telegram_id: &str, name: &str) -> Account {
        match self.store.find_user(telegram_id).await {
            Ok(Some(user)) => Account::Registered(user),
            Ok(None) => match self
                .store
                .create_user(&UserNew::for_signup(telegram_id, name))
                .await
            {
                Ok(user) => Account::Registered(user),
                Err(err) => {
                    tracing::warn!("failed to register user {telegram_id}: {err}");
                    Account::Detached
                }
            },
            Err(err) => {
                tracing::warn!("failed to look up user {telegram_id}: {err}");
                Account::Detached
            }
        }
    }

    /// Applies a save or withdraw to the user's balance.
    ///
    /// Side effects in order: write the new balance onto the user record,
    /// then append the transaction. A failed balance write skips the append
    /// (dry run); a failed append after a successful write is reported as
    /// [`PersistOutcome::BalanceOnly`] and not repaired.
    pub async fn apply(&self, telegram_id: &str, name: &str, kind: TxnKind, amount: i64) -> Applied {
        let delta = points_for(amount);

        let account = self.resolve_or_create(telegram_id, name).await;
        let current = match &account {
            Account::Registered(user) => user.points,
            Account::Detached => 0,
        };
        // Saturating arithmetic: a huge amount must cap the balance, not
        // wrap it negative.
        let new_points = match kind {
            TxnKind::Save => current.saturating_add(delta),
            TxnKind::Withdraw => current.saturating_sub(delta).max(0),
        };
        let signed_delta = match kind {
            TxnKind::Save => delta,
            TxnKind::Withdraw => -delta,
        };

        let Account::Registered(user) = account else {
            return Applied {
                kind,
                amount,
                points_delta: delta,
                new_points,
                outcome: PersistOutcome::DryRun,
            };
        };

        if let Err(err) = self.store.set_points(&user.id, new_points).await {
            tracing::warn!("failed to update balance of {telegram_id}: {err}");
            return Applied {
                kind,
                amount,
                points_delta: delta,
                new_points,
                outcome: PersistOutcome::DryRun,
            };
        }

        let txn = TransactionNew {
            user_id: user.id.clone(),
            kind,
            amount,
            points: signed_delta,
        };
        let outcome = match self.store.create_transaction(&txn).await {
            Ok(_) => PersistOutcome::Persisted,
            Err(err) => {
                tracing::warn!("failed to append transaction for {telegram_id}: {err}");
                PersistOutcome::BalanceOnly
            }
        };

        Applied {
            kind,
            amount,
            points_delta: delta,
            new_points,
            outcome,
        }
    }

    /// Reports the current standing of a registered user.
    ///
    /// `Ok(None)` means the identifier has no record; no record is created
    /// as a side effect of asking.
    pub async fn report(&self, telegram_id: &str) -> Result<Option<Status>, StoreError> {
        let Some(user) = self.store.find_user(telegram_id).await? else {
            return Ok(None);
        };

        Ok(Some(Status {
            points: user.points,
            tier: self.tiers.classify(user.points).to_string(),
            monetary_value: user.points.saturating_mul(POINTS_PER_UNIT),
        }))
    }

    /// Deletes every transaction of a registered user and zeroes the balance.
    ///
    /// Deletions are individual; failures are counted, logged and left
    /// behind. The balance is zeroed regardless of how many deletions
    /// succeeded. `Ok(None)` means the identifier has no record.
    pub async fn reset(&self, telegram_id: &str) -> Result<Option<ResetReport>, StoreError> {
        let Some(user) = self.store.find_user(telegram_id).await? else {
            return Ok(None);
        };

        let transactions = self.store.list_transactions(&user.id).await?;
        let mut deleted = 0;
        let mut failed = 0;
        for txn in &transactions {
            match self.store.delete_transaction(&txn.id).await {
                Ok(()) => deleted += 1,
                Err(err) => {
                    tracing::warn!("failed to delete transaction {}: {err}", txn.id);
                    failed += 1;
                }
            }
        }

        let points_cleared = match self.store.set_points(&user.id, 0).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("failed to zero balance of {telegram_id}: {err}");
                false
            }
        };

        Ok(Some(ResetReport {
            deleted,
            failed,
            points_cleared,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_point_per_ten_units() {
        assert_eq!(points_for(10), 1);
        assert_eq!(points_for(100), 10);
        assert_eq!(points_for(125), 12);
    }

    #[test]
    fn amounts_under_ten_earn_nothing() {
        for amount in 0..10 {
            assert_eq!(points_for(amount), 0, "amount {amount}");
        }
    }
}
