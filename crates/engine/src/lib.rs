//! Core workflows of the savings game.
//!
//! The engine knows nothing about Telegram or HTTP: it is written against the
//! [`store::RecordStore`] trait and exposes the balance-update workflow, the
//! tier classifier, the status reporter and the reset workflow.

pub use error::TierTableError;
pub use ledger::{
    Account, Applied, Ledger, PersistOutcome, POINTS_PER_UNIT, ResetReport, Status, points_for,
};
pub use tiers::{Tier, TierTable};

mod error;
mod ledger;
mod tiers;
