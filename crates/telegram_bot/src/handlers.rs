use store::TxnKind;
use teloxide::prelude::*;

use crate::{ConfigParameters, commands::Command, parsing::parse_amount, ui};

pub(crate) async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref() else {
        bot.send_message(msg.chat.id, "Could not identify the sender.")
            .await?;
        return Ok(());
    };
    if !is_allowed(cfg.allowed_users.as_deref(), from.id) {
        return Ok(());
    }

    let telegram_id = from.id.0.to_string();
    let name = from.first_name.clone();
    let chat_id = msg.chat.id;

    match cmd {
        Command::Start | Command::Help => {
            bot.send_message(chat_id, ui::welcome_text()).await?;
        }
        Command::Save { amount } => {
            let amount = parse_amount(&amount);
            let applied = cfg
                .ledger
                .apply(&telegram_id, &name, TxnKind::Save, amount)
                .await;
            bot.send_message(chat_id, ui::applied_reply(&applied, cfg.warn_unpersisted))
                .await?;
        }
        Command::Withdraw { amount } => {
            let amount = parse_amount(&amount);
            let applied = cfg
                .ledger
                .apply(&telegram_id, &name, TxnKind::Withdraw, amount)
                .await;
            bot.send_message(chat_id, ui::applied_reply(&applied, cfg.warn_unpersisted))
                .await?;
        }
        Command::Status => {
            let reply = match cfg.ledger.report(&telegram_id).await {
                Ok(Some(status)) => ui::status_reply(&status),
                Ok(None) => ui::not_registered_reply().to_string(),
                Err(err) => {
                    tracing::error!("status lookup failed for {telegram_id}: {err}");
                    ui::store_trouble_reply().to_string()
                }
            };
            bot.send_message(chat_id, reply).await?;
        }
        Command::Clear | Command::Reset => {
            let reply = match cfg.ledger.reset(&telegram_id).await {
                Ok(Some(report)) => ui::reset_reply(&report),
                Ok(None) => ui::not_registered_reply().to_string(),
                Err(err) => {
                    tracing::error!("reset failed for {telegram_id}: {err}");
                    ui::store_trouble_reply().to_string()
                }
            };
            bot.send_message(chat_id, reply).await?;
        }
    }

    Ok(())
}

fn is_allowed(allowed_users: Option<&[UserId]>, id: UserId) -> bool {
    match allowed_users {
        None => true,
        Some(ids) => ids.contains(&id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everyone_is_allowed_without_an_allow_list() {
        assert!(is_allowed(None, UserId(42)));
    }

    #[test]
    fn allow_list_gates_by_user_id() {
        let ids = [UserId(7), UserId(8)];
        assert!(is_allowed(Some(&ids), UserId(7)));
        assert!(!is_allowed(Some(&ids), UserId(9)));
    }
}
