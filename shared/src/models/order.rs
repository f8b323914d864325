//! Order records
//!
//! An [`Order`] and its [`OrderLine`]s are written together once at checkout.
//! Afterwards only `status` and `updated_at` change; orders are never deleted.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::branch::{BranchLocation, PaymentMethod};
use super::product::ProductCategory;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Initial state after checkout
    InProgress,
    /// Out for delivery
    EnRoute,
    /// Delivered (terminal success)
    Completed,
    /// Cancelled (terminal failure)
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        Self::InProgress,
        Self::EnRoute,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Label shown on the admin dashboard
    pub fn label(&self) -> &'static str {
        match self {
            Self::InProgress => "Em Andamento",
            Self::EnRoute => "A Caminho",
            Self::Completed => "Concluído",
            Self::Cancelled => "Cancelado",
        }
    }
}

/// Electrical voltage available at an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Voltage {
    #[serde(rename = "110v")]
    V110,
    #[serde(rename = "220v")]
    V220,
}

impl Voltage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V110 => "110v",
            Self::V220 => "220v",
        }
    }
}

/// Logistics data, selected once when the checkout is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Logistics {
    /// Plain delivery (growlers only)
    Delivery { address: String },
    /// Event logistics (any bulk container in the cart)
    ///
    /// When `deferred` is set the customer will send the details later and
    /// every field may be empty.
    Event {
        address: Option<String>,
        date: Option<NaiveDate>,
        time: Option<NaiveTime>,
        voltage: Option<Voltage>,
        deferred: bool,
    },
}

impl Logistics {
    pub fn is_event(&self) -> bool {
        matches!(self, Self::Event { .. })
    }
}

/// Per-line add-ons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineAddOns {
    /// Ask for a table rental quote
    pub rent_tables: bool,
    /// Ask for an umbrella rental quote
    pub rent_umbrellas: bool,
    /// Disposable cups requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cups_quantity: Option<u32>,
}

impl LineAddOns {
    pub fn is_empty(&self) -> bool {
        !self.rent_tables && !self.rent_umbrellas && self.cups_quantity.unwrap_or(0) == 0
    }
}

/// Customer fields copied onto the order at submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub customer_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Date of birth as typed by the customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

/// Order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// UUID v4
    pub id: String,
    /// Human-readable sequential number, e.g. `PED-00042`
    pub number: String,
    pub customer: CustomerSnapshot,
    /// Payable total after discount
    pub total: f64,
    /// Cart subtotal before discount
    pub subtotal: f64,
    pub payment_method: PaymentMethod,
    pub branch: BranchLocation,
    pub logistics: Logistics,
    /// Liters of bulk containers in the order
    pub bulk_volume_liters: f64,
    pub status: OrderStatus,
    /// Applied discount, whole percent
    pub discount_percent: Option<u8>,
    /// Mission that funded the discount
    pub mission_id: Option<u32>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line (immutable product snapshot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: String,
    /// Position within the order, starting at 0
    pub line_no: u32,
    pub product_id: String,
    pub product_name: String,
    pub category: ProductCategory,
    /// Unit price at time of purchase
    pub unit_price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub add_ons: LineAddOns,
}

/// Order with its lines, as returned by detail and list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// Staff list filter; every `None` field matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub branch: Option<BranchLocation>,
    pub customer_id: Option<String>,
    /// Inclusive lower bound on `created_at` (millis)
    pub from: Option<i64>,
    /// Exclusive upper bound on `created_at` (millis)
    pub to: Option<i64>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.status.is_none_or(|s| order.status == s)
            && self.branch.is_none_or(|b| order.branch == b)
            && self
                .customer_id
                .as_deref()
                .is_none_or(|c| order.customer.customer_id == c)
            && self.from.is_none_or(|from| order.created_at >= from)
            && self.to.is_none_or(|to| order.created_at < to)
    }
}
