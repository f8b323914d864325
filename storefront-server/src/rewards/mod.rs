//! Missions and rewards
//!
//! - **missions**: read-only mission definitions
//! - **ledger**: per-customer `completed ⊇ redeemed ⊇ used` state machine
//! - **service**: store-backed redeem / unlock operations
//!
//! Discount consumption is not here: it happens inside the order manager's
//! `create` transaction.

pub mod ledger;
pub mod missions;
pub mod service;

pub use ledger::{CustomerActivity, DiscountOption, LedgerError, UserRewardState};
pub use missions::MissionCatalog;
pub use service::{RewardError, RewardResult, RewardService, RewardView};
