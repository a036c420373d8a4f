//! Command structs

use teloxide::utils::command::{BotCommands, ParseError};

/// Passes the raw argument string through untouched.
///
/// The default parser rejects a missing argument, but `/save` and
/// `/withdraw` treat a missing or malformed amount as "use the default",
/// so parsing happens later in [`crate::parsing::parse_amount`].
pub fn raw_arg(input: String) -> Result<(String,), ParseError> {
    Ok((input,))
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Savings game commands:")]
pub enum Command {
    #[command(description = "Show the welcome message.")]
    Start,
    #[command(description = "Show this message.")]
    Help,
    #[command(description = "Record a saving: /save [amount]", parse_with = raw_arg)]
    Save { amount: String },
    #[command(description = "Record a withdrawal: /withdraw [amount]", parse_with = raw_arg)]
    Withdraw { amount: String },
    #[command(description = "Show your points, rank and money.")]
    Status,
    #[command(description = "Delete your transactions and zero the balance.")]
    Clear,
    #[command(description = "Same as /clear.")]
    Reset,
}
