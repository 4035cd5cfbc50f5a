//! Money formatting and custom Askama template filters.
//!
//! Stores return raw [`Decimal`] amounts. Formatting happens here, at render
//! time only, using Indian digit grouping (`1,35,000`): the last three
//! integer digits form one group and the rest are grouped in pairs.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

use jewelry_shop_core::CurrencyCode;

/// Format an amount with Indian digit grouping.
///
/// Rounds to two decimal places and drops trailing fractional zeros, so
/// `45000.00` becomes `45,000` and `1234.5` becomes `1,234.5`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + text.len() / 2 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Format an amount in rupees, e.g. `₹1,35,000`.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    format_price(amount, CurrencyCode::INR)
}

/// Format an amount with the glyph of `currency`.
#[must_use]
pub fn format_price(amount: Decimal, currency: CurrencyCode) -> String {
    let formatted = format_amount(amount);
    formatted.strip_prefix('-').map_or_else(
        || format!("{}{formatted}", currency.symbol()),
        |positive| format!("-{}{positive}", currency.symbol()),
    )
}

fn group_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::with_capacity(head.len() / 2 + 2);
    groups.push(tail);
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head);
    }
    groups.reverse();
    groups.join(",")
}

/// Formats a value as rupees.
///
/// Values that are not decimal numbers are passed through with the glyph.
///
/// Usage in templates: `{{ cart.subtotal|inr }}`
#[askama::filter_fn]
pub fn inr(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(raw.trim().parse::<Decimal>().map_or_else(
        |_| format!("{}{raw}", CurrencyCode::INR.symbol()),
        format_inr,
    ))
}

/// Formats a number with digit grouping and no glyph.
///
/// Usage in templates: `{{ count|amount }}`
#[askama::filter_fn]
pub fn amount(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(raw
        .trim()
        .parse::<Decimal>()
        .map_or(raw, format_amount))
}
