//! Entity model for contract signing and startup work tracking.
//!
//! # Responsibility
//! - Define the records the incubator backend hands to the dashboard.
//! - Keep status enums closed and parseable from their wire strings.
//!
//! # Invariants
//! - A `Document` exclusively owns its signatory list.
//! - Every status enum lists its values in `StatusEnum::ALL` in
//!   declaration order; board columns follow that order.

pub mod document;
pub mod work_item;

use std::fmt::Debug;

/// Shared contract for closed status enums.
pub trait StatusEnum: Copy + Eq + Debug + 'static {
    /// Every value, in declaration order.
    const ALL: &'static [Self];

    /// Stable wire string for this value.
    fn as_str(self) -> &'static str;

    /// Parses a wire string, tolerating case, surrounding whitespace and
    /// `-`/space separators in place of `_`.
    fn parse(value: &str) -> Option<Self> {
        let token = normalize_status_token(value);
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(&token))
    }
}

fn normalize_status_token(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|ch| match ch {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
