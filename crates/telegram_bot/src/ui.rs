//! Reply rendering.
//!
//! One plain-text message per command. The status strings keep their Somali
//! wording; everything else is English.

use engine::{Applied, PersistOutcome, ResetReport, Status};
use store::TxnKind;

pub(crate) fn applied_reply(applied: &Applied, warn_unpersisted: bool) -> String {
    let mut reply = match applied.kind {
        TxnKind::Save => format!(
            "💰 Saved ${} (+{} points)\nTotal Points: {}",
            applied.amount, applied.points_delta, applied.new_points
        ),
        TxnKind::Withdraw => format!(
            "❌ Withdrawn ${} (-{} points)\nTotal Points: {}",
            applied.amount, applied.points_delta, applied.new_points
        ),
    };

    if warn_unpersisted {
        match applied.outcome {
            PersistOutcome::Persisted => {}
            PersistOutcome::BalanceOnly => {
                reply.push_str(
                    "\n⚠️ Dhaqdhaqaaqa lama diiwaangelin (your balance was saved, but this transaction could not be logged).",
                );
            }
            PersistOutcome::DryRun => {
                reply.push_str(
                    "\n⚠️ Kaydinta lama xaqiijin (not saved, the record store is unreachable).",
                );
            }
        }
    }
    reply
}

pub(crate) fn status_reply(status: &Status) -> String {
    format!(
        "📊 Dhibcaha: {}\n🏅 Heerka: {}\n💵 Lacagta: ${}",
        status.points, status.tier, status.monetary_value
    )
}

pub(crate) fn reset_reply(report: &ResetReport) -> String {
    let mut reply = "🔄 Dhibcaha waa la tirtiray (your balance is back to 0).".to_string();
    if report.failed > 0 {
        reply.push_str(&format!(
            "\n⚠️ {} transaction(s) could not be deleted.",
            report.failed
        ));
    }
    reply
}

pub(crate) fn not_registered_reply() -> &'static str {
    "❌ Ma jiro diiwaan kuu jira (You are not registered yet). Use /save to start saving!"
}

pub(crate) fn store_trouble_reply() -> &'static str {
    "Connection problems with the server. Retry later!"
}

pub(crate) fn welcome_text() -> &'static str {
    "Welcome to the savings game!\n\nEvery $10 you save earns a point:\n\n/save 50 — record a saving\n/withdraw 20 — record a withdrawal\n/status — points, rank and money\n/clear — start over\n\nAmounts are optional and default to 10."
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(kind: TxnKind, amount: i64, delta: i64, total: i64, outcome: PersistOutcome) -> Applied {
        Applied {
            kind,
            amount,
            points_delta: delta,
            new_points: total,
            outcome,
        }
    }

    #[test]
    fn first_default_save_reports_one_total_point() {
        let reply = applied_reply(
            &applied(TxnKind::Save, 10, 1, 1, PersistOutcome::Persisted),
            true,
        );
        assert_eq!(reply, "💰 Saved $10 (+1 points)\nTotal Points: 1");
        assert!(reply.contains("Total Points: 1"));
    }

    #[test]
    fn withdraw_reply_shows_clamped_total() {
        let reply = applied_reply(
            &applied(TxnKind::Withdraw, 100, 10, 0, PersistOutcome::Persisted),
            true,
        );
        assert_eq!(reply, "❌ Withdrawn $100 (-10 points)\nTotal Points: 0");
    }

    #[test]
    fn dry_run_reply_carries_a_warning_when_enabled() {
        let dry = applied(TxnKind::Save, 10, 1, 1, PersistOutcome::DryRun);
        assert!(applied_reply(&dry, true).contains("unreachable"));
        assert!(!applied_reply(&dry, false).contains("⚠️"));
    }

    #[test]
    fn balance_only_reply_names_the_missing_log_entry() {
        let partial = applied(TxnKind::Save, 10, 1, 1, PersistOutcome::BalanceOnly);
        let reply = applied_reply(&partial, true);

        // The balance write succeeded, so the warning must not claim the
        // store was unreachable.
        assert!(reply.contains("could not be logged"));
        assert!(!reply.contains("unreachable"));
        assert!(!applied_reply(&partial, false).contains("⚠️"));
    }

    #[test]
    fn status_reply_lists_points_rank_and_money() {
        let reply = status_reply(&Status {
            points: 120,
            tier: "Junior Saver".to_string(),
            monetary_value: 1200,
        });
        assert_eq!(
            reply,
            "📊 Dhibcaha: 120\n🏅 Heerka: Junior Saver\n💵 Lacagta: $1200"
        );
    }

    #[test]
    fn reset_reply_mentions_leftover_transactions() {
        let clean = ResetReport {
            deleted: 3,
            failed: 0,
            points_cleared: true,
        };
        assert!(!reset_reply(&clean).contains("⚠️"));

        let partial = ResetReport {
            deleted: 2,
            failed: 1,
            points_cleared: true,
        };
        assert!(reset_reply(&partial).contains("1 transaction(s)"));
    }
}
