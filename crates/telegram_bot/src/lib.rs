//! Telegram bot.
//!
//! The bot is a thin client: every command is a handful of record-store
//! round-trips through the engine, and one text reply. No state is kept
//! between updates.

use std::sync::Arc;
use std::time::Duration;

use engine::{Ledger, Tier, TierTable};
use reqwest::Client;
use store::PocketBase;
use teloxide::prelude::*;

mod commands;
mod handlers;
mod parsing;
mod ui;

const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Option<Vec<UserId>>,
    ledger: Arc<Ledger<PocketBase>>,
    /// Append a warning line to replies when an operation did not fully
    /// persist, instead of silently pretending it did.
    warn_unpersisted: bool,
}

pub struct Bot {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    ledger: Arc<Ledger<PocketBase>>,
    warn_unpersisted: bool,
}

impl Bot {
    pub fn new(
        token: &str,
        allowed_users: Option<Vec<UserId>>,
        store_url: &str,
        store_timeout: Duration,
        tiers: TierTable,
        warn_unpersisted: bool,
    ) -> Result<Self, String> {
        // The store never answers slower than this on a healthy network; a
        // missing timeout would hang a command forever.
        let client = Client::builder()
            .timeout(store_timeout)
            .build()
            .map_err(|err| format!("failed to build http client: {err}"))?;

        let store = PocketBase::new(client, store_url.to_string());

        Ok(Self {
            token: token.to_string(),
            allowed_users,
            ledger: Arc::new(Ledger::new(store, tiers)),
            warn_unpersisted,
        })
    }

    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);

        let parameters = ConfigParameters {
            allowed_users: self.allowed_users.clone(),
            ledger: self.ledger.clone(),
            warn_unpersisted: self.warn_unpersisted,
        };

        let handler = Update::filter_message()
            .filter_command::<commands::Command>()
            .endpoint(handlers::handle_command);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default, Debug)]
pub struct BotBuilder {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    store_url: String,
    store_timeout: Option<Duration>,
    tiers: Option<Vec<Tier>>,
    warn_unpersisted: Option<bool>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    /// Raw Telegram user ids allowed to talk to the bot; everyone when empty.
    pub fn allowed_users(mut self, allowed_users: Vec<u64>) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users.into_iter().map(UserId).collect());
        }
        self
    }

    pub fn store(mut self, url: &str) -> BotBuilder {
        self.store_url = url.to_string();
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> BotBuilder {
        self.store_timeout = Some(timeout);
        self
    }

    /// Configured tier ladder; the historical default is used when absent.
    pub fn tiers(mut self, tiers: Vec<Tier>) -> BotBuilder {
        if !tiers.is_empty() {
            self.tiers = Some(tiers);
        }
        self
    }

    pub fn warn_unpersisted(mut self, warn: bool) -> BotBuilder {
        self.warn_unpersisted = Some(warn);
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        let tiers = match self.tiers {
            Some(rows) => {
                TierTable::new(rows).map_err(|err| format!("invalid tier table: {err}"))?
            }
            None => TierTable::default(),
        };

        Bot::new(
            &self.token,
            self.allowed_users,
            &self.store_url,
            self.store_timeout.unwrap_or(DEFAULT_STORE_TIMEOUT),
            tiers,
            self.warn_unpersisted.unwrap_or(true),
        )
    }
}
