use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

use super::BindValue;

// Every helper returns the 1-based placeholder index of the pushed value.

pub(super) fn push_text(bind_params: &mut Vec<BindValue>, value: String) -> usize {
    bind_params.push(BindValue::Text(value));
    bind_params.len()
}

pub(super) fn push_text_array(bind_params: &mut Vec<BindValue>, value: Vec<String>) -> usize {
    bind_params.push(BindValue::TextArray(value));
    bind_params.len()
}

/// Pushed as text; the placeholder must be cast with `::numeric`.
pub(super) fn push_decimal(bind_params: &mut Vec<BindValue>, value: Decimal) -> usize {
    push_text(bind_params, value.normalize().to_string())
}

/// Pushed as a text array; the placeholder must be cast with `::numeric[]`.
pub(super) fn push_decimal_array(bind_params: &mut Vec<BindValue>, values: &[Decimal]) -> usize {
    push_text_array(
        bind_params,
        values.iter().map(|v| v.normalize().to_string()).collect(),
    )
}

/// Pushed as RFC 3339 text; the placeholder must be cast with `::timestamptz`.
pub(super) fn push_timestamp(bind_params: &mut Vec<BindValue>, value: DateTime<Utc>) -> usize {
    push_text(
        bind_params,
        value.to_rfc3339_opts(SecondsFormat::Micros, true),
    )
}
