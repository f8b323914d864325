//! Checkout Calculator
//!
//! Pure computation: cart snapshot + checkout form + available discounts
//! in, [`CheckoutSummary`] out. Nothing is persisted here.
//!
//! ```text
//! build_summary(cart, details, identity, available)
//!     ├─ 1. Collect missing fields (cart, branch, payment, name, logistics)
//!     ├─ 2. Select logistics variant (any bulk line → Event, else Delivery)
//!     ├─ 3. Resolve discount choice (Auto / None / Mission)
//!     └─ 4. final_total = subtotal × (100 − percent) / 100
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::models::{
    BranchLocation, CustomerSnapshot, LineAddOns, Logistics, PaymentMethod, ProductCategory,
    Voltage,
};

use validator::Validate;

use super::error::{CheckoutError, CheckoutResult};
use super::money::{apply_discount, to_f64};
use crate::cart::Cart;
use crate::identity::CustomerIdentity;
use crate::rewards::DiscountOption;
use crate::utils::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN};

/// Which discount to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "mission_id", rename_all = "snake_case")]
pub enum DiscountChoice {
    /// Highest available percentage, ties to the lowest mission id
    #[default]
    Auto,
    /// No discount
    None,
    /// A specific redeemed mission
    Mission(u32),
}

/// Logistics fields as typed in the checkout form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LogisticsInput {
    #[validate(length(max = MAX_ADDRESS_LEN))]
    pub delivery_address: Option<String>,
    #[validate(length(max = MAX_ADDRESS_LEN))]
    pub event_address: Option<String>,
    /// `YYYY-MM-DD`
    #[validate(length(max = MAX_SHORT_TEXT_LEN))]
    pub event_date: Option<String>,
    /// `HH:MM`
    #[validate(length(max = MAX_SHORT_TEXT_LEN))]
    pub event_time: Option<String>,
    pub voltage: Option<Voltage>,
    /// Customer will send the event details later
    pub provide_info_later: bool,
}

/// Checkout form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CheckoutDetails {
    pub branch: Option<BranchLocation>,
    pub payment_method: Option<PaymentMethod>,
    /// Overrides the identity's display name
    #[validate(length(max = MAX_NAME_LEN))]
    pub customer_name: Option<String>,
    #[validate(length(max = MAX_SHORT_TEXT_LEN))]
    pub birth_date: Option<String>,
    #[validate(nested)]
    pub logistics: LogisticsInput,
    pub discount: DiscountChoice,
}

/// Line as it will be written to the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub product_id: String,
    pub product_name: String,
    pub category: ProductCategory,
    pub unit_price: f64,
    pub quantity: u32,
    pub add_ons: LineAddOns,
    pub line_total: f64,
}

/// Finalized checkout, ready for `OrdersManager::create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub subtotal: f64,
    pub final_total: f64,
    pub discount_percent: Option<u8>,
    /// Mission whose discount is applied; consumed on create
    pub mission_id: Option<u32>,
    pub logistics: Logistics,
    pub bulk_volume_liters: f64,
    pub total_volume_liters: f64,
    pub item_count: u32,
    pub branch: BranchLocation,
    pub payment_method: PaymentMethod,
    pub customer: CustomerSnapshot,
    pub lines: Vec<SummaryLine>,
}

/// Trimmed, non-empty text
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_date(value: &str) -> CheckoutResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CheckoutError::InvalidField {
        field: "event_date",
        reason: format!("expected YYYY-MM-DD, got {:?}", value),
    })
}

fn parse_time(value: &str) -> CheckoutResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| CheckoutError::InvalidField {
            field: "event_time",
            reason: format!("expected HH:MM, got {:?}", value),
        })
}

/// Select logistics variant and record missing fields
fn build_logistics(
    cart: &Cart,
    input: &LogisticsInput,
    missing: &mut Vec<&'static str>,
) -> CheckoutResult<Option<Logistics>> {
    if !cart.has_bulk() {
        return Ok(match present(&input.delivery_address) {
            Some(address) => Some(Logistics::Delivery { address }),
            None => {
                missing.push("delivery_address");
                None
            }
        });
    }

    let address = present(&input.event_address);
    let date = present(&input.event_date)
        .map(|d| parse_date(&d))
        .transpose()?;
    let time = present(&input.event_time)
        .map(|t| parse_time(&t))
        .transpose()?;
    let deferred = input.provide_info_later;

    if !deferred {
        let before = missing.len();
        if address.is_none() {
            missing.push("event_address");
        }
        if date.is_none() {
            missing.push("event_date");
        }
        if time.is_none() {
            missing.push("event_time");
        }
        if input.voltage.is_none() {
            missing.push("voltage");
        }
        if missing.len() > before {
            return Ok(None);
        }
    }

    Ok(Some(Logistics::Event {
        address,
        date,
        time,
        voltage: input.voltage,
        deferred,
    }))
}

/// Pick the discount to apply
///
/// `Auto` takes the highest percentage; on a tie the lowest mission id wins.
pub fn select_discount(
    available: &[DiscountOption],
    choice: DiscountChoice,
) -> CheckoutResult<Option<DiscountOption>> {
    match choice {
        DiscountChoice::None => Ok(None),
        DiscountChoice::Auto => Ok(available
            .iter()
            .max_by(|a, b| {
                a.percent
                    .cmp(&b.percent)
                    .then_with(|| b.mission_id.cmp(&a.mission_id))
            })
            .cloned()),
        DiscountChoice::Mission(id) => available
            .iter()
            .find(|d| d.mission_id == id)
            .cloned()
            .map(Some)
            .ok_or(CheckoutError::DiscountUnavailable(id)),
    }
}

/// Build a checkout summary
///
/// Every missing field is reported at once through
/// [`CheckoutError::Incomplete`]; nothing is defaulted.
pub fn build_summary(
    cart: &Cart,
    details: &CheckoutDetails,
    identity: &CustomerIdentity,
    available: &[DiscountOption],
) -> CheckoutResult<CheckoutSummary> {
    let mut missing = Vec::new();

    if cart.is_empty() {
        missing.push("cart");
    }
    if details.branch.is_none() {
        missing.push("branch");
    }
    if details.payment_method.is_none() {
        missing.push("payment_method");
    }
    let name = present(&details.customer_name).or_else(|| present(&identity.display_name));
    if name.is_none() {
        missing.push("customer_name");
    }
    let logistics = build_logistics(cart, &details.logistics, &mut missing)?;

    let (Some(branch), Some(payment_method), Some(name), Some(logistics), true) = (
        details.branch,
        details.payment_method,
        name,
        logistics,
        missing.is_empty(),
    ) else {
        return Err(CheckoutError::Incomplete { missing });
    };

    let discount = select_discount(available, details.discount)?;
    let subtotal = cart.subtotal();
    let percent = discount.as_ref().map(|d| d.percent).unwrap_or(0);
    let final_total = apply_discount(subtotal, percent);

    let lines = cart
        .lines()
        .iter()
        .map(|l| SummaryLine {
            product_id: l.product.id.clone(),
            product_name: l.product.name.clone(),
            category: l.product.category,
            unit_price: l.product.price,
            quantity: l.quantity,
            add_ons: l.add_ons.clone(),
            line_total: to_f64(l.line_total()),
        })
        .collect();

    Ok(CheckoutSummary {
        subtotal: to_f64(subtotal),
        final_total: to_f64(final_total),
        discount_percent: discount.as_ref().map(|d| d.percent),
        mission_id: discount.as_ref().map(|d| d.mission_id),
        logistics,
        bulk_volume_liters: cart.bulk_volume_liters(),
        total_volume_liters: cart.total_volume_liters(None),
        item_count: cart.item_count(),
        branch,
        payment_method,
        customer: CustomerSnapshot {
            customer_id: identity.customer_id.clone(),
            name,
            phone: identity.phone.clone(),
            birth_date: present(&details.birth_date),
        },
        lines,
    })
}
