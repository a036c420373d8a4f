//! Wire types for the `users` and `transactions` collections.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user record as returned by the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned record id.
    pub id: String,
    /// Telegram-assigned identifier, stored as a string.
    pub telegram_id: String,
    pub name: String,
    #[serde(default)]
    pub points: i64,
}

/// Body for creating a user record.
///
/// The store keeps users in an auth collection, so creation must carry a
/// password pair even though the bot never logs in as the user.
#[derive(Debug, Serialize)]
pub struct UserNew {
    pub telegram_id: String,
    pub name: String,
    pub points: i64,
    pub password: String,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
}

impl UserNew {
    /// A fresh user with zero points and a random throwaway password.
    pub fn for_signup(telegram_id: &str, name: &str) -> Self {
        let password = Uuid::new_v4().simple().to_string();
        Self {
            telegram_id: telegram_id.to_string(),
            name: name.to_string(),
            points: 0,
            password: password.clone(),
            password_confirm: password,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Save,
    Withdraw,
}

impl TxnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Withdraw => "withdraw",
        }
    }
}

/// A transaction record as returned by the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    /// Owning user record id.
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    /// Monetary amount as supplied by the command.
    pub amount: i64,
    /// Signed point delta: positive for save, negative for withdraw.
    pub points: i64,
}

/// Body for appending a transaction record.
#[derive(Debug, Serialize)]
pub struct TransactionNew {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    pub amount: i64,
    pub points: i64,
}

/// Paginated list envelope returned by collection list endpoints.
///
/// Only `items` matters to the bot; paging fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    pub items: Vec<T>,
}
