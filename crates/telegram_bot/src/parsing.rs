/// Default monetary amount when a command carries none.
pub(crate) const DEFAULT_AMOUNT: i64 = 10;

/// Parses the optional amount argument of `/save` and `/withdraw`.
///
/// Missing, malformed and non-positive input all substitute the default
/// instead of rejecting the command; the amount is best-effort user input
/// and the workflow is defined for the default.
pub(crate) fn parse_amount(arg: &str) -> i64 {
    match arg.trim().parse::<i64>() {
        Ok(amount) if amount > 0 => amount,
        _ => DEFAULT_AMOUNT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integer_is_accepted() {
        assert_eq!(parse_amount("250"), 250);
        assert_eq!(parse_amount("  42 "), 42);
    }

    #[test]
    fn missing_argument_uses_default() {
        assert_eq!(parse_amount(""), DEFAULT_AMOUNT);
        assert_eq!(parse_amount("   "), DEFAULT_AMOUNT);
    }

    #[test]
    fn malformed_argument_uses_default() {
        assert_eq!(parse_amount("ten"), DEFAULT_AMOUNT);
        assert_eq!(parse_amount("12.50"), DEFAULT_AMOUNT);
        assert_eq!(parse_amount("$100"), DEFAULT_AMOUNT);
    }

    #[test]
    fn non_positive_argument_uses_default() {
        assert_eq!(parse_amount("0"), DEFAULT_AMOUNT);
        assert_eq!(parse_amount("-50"), DEFAULT_AMOUNT);
    }
}
