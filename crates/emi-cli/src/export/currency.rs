use rust_decimal::{Decimal, RoundingStrategy};

const RUPEE: &str = "₹";

/// Round half away from zero to `dp` places, folding negative zero into zero.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Fixed-point rendering with exactly `dp` decimal places.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = round_half_up(value, dp);
    format!("{rounded:.prec$}", prec = dp as usize)
}

/// Whole-number rendering with no grouping.
pub fn whole(value: Decimal) -> String {
    fixed(value, 0)
}

/// Rupee amount with Indian digit grouping and no fraction digits,
/// e.g. `₹1,06,619`.
pub fn format_inr(value: Decimal) -> String {
    format_amount(value, RUPEE)
}

/// Whole-unit amount with Indian digit grouping behind `symbol`.
pub fn format_amount(value: Decimal, symbol: &str) -> String {
    let rounded = round_half_up(value, 0);
    let digits = whole(rounded.abs());
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{sign}{symbol}{}", group_indian(&digits))
}

/// Group an unsigned digit string as thousands, then lakhs and crores:
/// the last three digits together, every two digits before that.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
