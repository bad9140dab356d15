use booking_core::models::{EventType, Location, PaymentMethod, TimeSlot};
use booking_core::validation::{MAX_GUESTS, MIN_GUESTS};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseInputError {
    #[error("'{input}' is not a whole number")]
    NotANumber { input: String },

    #[error("guest count must be between {min} and {max}, got {0}", min = MIN_GUESTS, max = MAX_GUESTS)]
    GuestsOutOfRange(i64),

    #[error("'{input}' is not a date in YYYY-MM-DD form")]
    InvalidDate { input: String },

    #[error("unknown {kind} '{input}'; expected one of: {choices}")]
    UnknownChoice {
        kind: &'static str,
        input: String,
        choices: String,
    },
}

fn parse_whole(s: &str) -> Result<i64, ParseInputError> {
    s.trim().replace(',', "").parse().map_err(|_| ParseInputError::NotANumber {
        input: s.to_string(),
    })
}

/// Guest count as typed, with thousands separators allowed.
pub fn parse_guest_count(s: &str) -> Result<i64, ParseInputError> {
    let n = parse_whole(s)?;
    if !(MIN_GUESTS..=MAX_GUESTS).contains(&n) {
        return Err(ParseInputError::GuestsOutOfRange(n));
    }
    Ok(n)
}

/// Budget bound in whole rupees, with thousands separators allowed.
pub fn parse_amount(s: &str) -> Result<i64, ParseInputError> {
    parse_whole(s)
}

pub fn parse_event_date(s: &str) -> Result<NaiveDate, ParseInputError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ParseInputError::InvalidDate {
        input: s.to_string(),
    })
}

fn parse_choice<T: Copy>(
    kind: &'static str,
    s: &str,
    all: &[T],
    parse: impl Fn(&str) -> Option<T>,
    as_str: impl Fn(&T) -> &'static str,
) -> Result<T, ParseInputError> {
    parse(s.trim()).ok_or_else(|| ParseInputError::UnknownChoice {
        kind,
        input: s.to_string(),
        choices: all.iter().map(as_str).collect::<Vec<_>>().join(", "),
    })
}

pub fn parse_event_type(s: &str) -> Result<EventType, ParseInputError> {
    parse_choice("event type", s, EventType::all(), EventType::parse, EventType::as_str)
}

pub fn parse_location(s: &str) -> Result<Location, ParseInputError> {
    parse_choice("location", s, Location::all(), Location::parse, Location::as_str)
}

pub fn parse_time_slot(s: &str) -> Result<TimeSlot, ParseInputError> {
    parse_choice("time slot", s, TimeSlot::all(), TimeSlot::parse, TimeSlot::as_str)
}

pub fn parse_payment_method(s: &str) -> Result<PaymentMethod, ParseInputError> {
    parse_choice(
        "payment method",
        s,
        PaymentMethod::all(),
        PaymentMethod::parse,
        PaymentMethod::as_str,
    )
}

/// Formats an amount as rupees with Indian digit grouping, e.g. `₹1,53,400`.
///
/// Paise are shown only when non-zero.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::new();
    let (head, tail) = whole.split_at(whole.len().saturating_sub(3));
    let head_digits: Vec<char> = head.chars().collect();
    for (i, c) in head_digits.iter().enumerate() {
        if i > 0 && (head_digits.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    if !head.is_empty() {
        grouped.push(',');
    }
    grouped.push_str(tail);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}₹{grouped}.{fraction}"),
        None => format!("{sign}₹{grouped}"),
    }
}

/// Formats an optional value for display, using "—" when `None`.
pub fn opt_display<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn guest_count_accepts_separators_and_whitespace() {
        assert_eq!(parse_guest_count(" 1,200 "), Ok(1200));
    }

    #[test]
    fn guest_count_enforces_range() {
        assert_eq!(parse_guest_count("0"), Err(ParseInputError::GuestsOutOfRange(0)));
        assert_eq!(
            parse_guest_count("10001"),
            Err(ParseInputError::GuestsOutOfRange(10001))
        );
        assert_eq!(parse_guest_count("10000"), Ok(10000));
        assert!(matches!(
            parse_guest_count("lots"),
            Err(ParseInputError::NotANumber { .. })
        ));
    }

    #[test]
    fn event_date_requires_iso_form() {
        assert_eq!(
            parse_event_date("2026-12-12"),
            Ok(NaiveDate::from_ymd_opt(2026, 12, 12).unwrap())
        );
        assert!(parse_event_date("12/12/2026").is_err());
    }

    #[test]
    fn unknown_choice_lists_alternatives() {
        let err = parse_time_slot("midnight").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("midnight"));
        assert!(message.contains("full-day"));
    }

    #[test]
    fn choices_parse_wire_values() {
        assert_eq!(parse_event_type("wedding"), Ok(EventType::Wedding));
        assert_eq!(parse_payment_method("cash"), Ok(PaymentMethod::Cash));
    }

    #[test]
    fn format_inr_uses_indian_grouping() {
        assert_eq!(format_inr(dec!(153400)), "₹1,53,400");
        assert_eq!(format_inr(dec!(12345678)), "₹1,23,45,678");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(Decimal::ZERO), "₹0");
    }

    #[test]
    fn format_inr_keeps_nonzero_paise() {
        assert_eq!(format_inr(dec!(451.50)), "₹451.5");
        assert_eq!(format_inr(dec!(2600.00)), "₹2,600");
        assert_eq!(format_inr(dec!(-2600)), "-₹2,600");
    }

    #[test]
    fn opt_display_uses_dash_for_none() {
        assert_eq!(opt_display(None::<i64>), "—");
        assert_eq!(opt_display(Some(5)), "5");
    }
}
