//! Order status state machine
//!
//! ```text
//!              ┌──────────── reopen ────────────┐
//!              ▼                                │
//!        InProgress ──▶ EnRoute ──▶ Completed ──┤
//!              │ │                     ▲        │
//!              │ └─────────────────────┘        │
//!              │           │                    │
//!              └─────┬─────┘                    │
//!                    ▼                          │
//!                Cancelled ─────── reopen ──────┘
//! ```
//!
//! `EnRoute` is optional: an in-progress order may be completed directly.
//! Same-state requests are not edges.

use shared::models::OrderStatus;

/// Statuses reachable from `from` in one step
pub fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        InProgress => &[EnRoute, Completed, Cancelled],
        EnRoute => &[Completed, Cancelled],
        Completed | Cancelled => &[InProgress],
    }
}

pub fn is_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// Whether `from → to` is the staff reopen escape hatch
pub fn is_reopen(from: OrderStatus, to: OrderStatus) -> bool {
    from.is_terminal() && to == OrderStatus::InProgress
}
