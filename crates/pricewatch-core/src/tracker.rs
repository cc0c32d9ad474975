//! Target-price notification decision for tracker updates.
//!
//! The persistence layer stores a `notified` flag per tracker. This module
//! decides, for one price update, whether a "target reached" notification
//! should go out and what the flag should become afterwards.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyDecision {
    pub should_notify: bool,
    /// Flag value to persist after this update.
    pub notified: bool,
}

/// Decides whether a tracker update crosses its target price.
///
/// Notifies exactly once on the transition from above-target to
/// at-or-below-target. The flag is cleared when the price rises back above
/// target so a later drop notifies again.
#[must_use]
pub fn evaluate_price_update(
    old_price: f64,
    new_price: f64,
    target_price: f64,
    already_notified: bool,
) -> NotifyDecision {
    let was_at_or_below = old_price <= target_price;
    let is_at_or_below = new_price <= target_price;

    let should_notify = !was_at_or_below && is_at_or_below && !already_notified;
    let notified = if should_notify {
        true
    } else if !is_at_or_below {
        false
    } else {
        already_notified
    };

    NotifyDecision {
        should_notify,
        notified,
    }
}
