//! Cart Aggregator
//!
//! A [`Cart`] is request-scoped: the HTTP layer rebuilds it from the line
//! list the client submits and hands it down the checkout pipeline by
//! reference. Nothing here is shared between requests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{LineAddOns, Product, ProductCategory};
use thiserror::Error;
use validator::Validate;

use crate::catalog::CatalogProvider;
use crate::checkout::money::{to_decimal, to_f64};
use crate::utils::validation::{MAX_LINE_QUANTITY, MAX_SHORT_TEXT_LEN};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: u32 },
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ProductNotFound(id) => {
                AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
                    .with_detail("product_id", id)
            }
            CartError::InvalidQuantity {
                product_id,
                quantity,
            } => AppError::with_message(
                ErrorCode::InvalidQuantity,
                format!("Quantity must be at least 1 (got {})", quantity),
            )
            .with_detail("product_id", product_id),
        }
    }
}

/// Client-submitted cart line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CartLineInput {
    #[validate(length(min = 1, max = MAX_SHORT_TEXT_LEN))]
    pub product_id: String,
    #[validate(range(max = MAX_LINE_QUANTITY))]
    pub quantity: u32,
    #[serde(default)]
    pub add_ons: LineAddOns,
}

/// One product in the cart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub add_ons: LineAddOns,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        to_decimal(self.product.price) * Decimal::from(self.quantity)
    }
}

/// Line items keyed by product id, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from client input, resolving products via the catalog
    ///
    /// Repeated product ids merge into one line; the first occurrence's
    /// add-ons win.
    pub fn from_inputs(
        catalog: &dyn CatalogProvider,
        inputs: &[CartLineInput],
    ) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for input in inputs {
            if input.quantity == 0 {
                return Err(CartError::InvalidQuantity {
                    product_id: input.product_id.clone(),
                    quantity: input.quantity,
                });
            }
            let product = catalog
                .get_product(&input.product_id)
                .ok_or_else(|| CartError::ProductNotFound(input.product_id.clone()))?;
            let id = product.id.clone();
            let first = cart.position(&id).is_none();
            cart.add_line(product, None);
            if first {
                cart.set_add_ons(&id, input.add_ons.clone());
            }
            if input.quantity > 1 {
                cart.set_quantity(&id, (input.quantity - 1) as i64);
            }
        }
        Ok(cart)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }

    /// Add one unit of `product`
    ///
    /// An existing line is incremented by 1 and keeps its add-ons; otherwise a
    /// new line with quantity 1 is appended.
    pub fn add_line(&mut self, product: Product, add_ons: Option<LineAddOns>) {
        match self.position(&product.id) {
            Some(i) => self.lines[i].quantity += 1,
            None => self.lines.push(CartLine {
                product,
                quantity: 1,
                add_ons: add_ons.unwrap_or_default(),
            }),
        }
    }

    /// Remove the line for `product_id`; no-op when absent
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Adjust a line's quantity by `delta`
    ///
    /// A change that would leave the quantity below 1 is ignored.
    pub fn set_quantity(&mut self, product_id: &str, delta: i64) {
        let Some(i) = self.position(product_id) else {
            return;
        };
        let next = i64::from(self.lines[i].quantity) + delta;
        if next < 1 {
            return;
        }
        self.lines[i].quantity = u32::try_from(next).unwrap_or(u32::MAX);
    }

    /// Replace a line's add-ons; no-op when absent
    pub fn set_add_ons(&mut self, product_id: &str, add_ons: LineAddOns) {
        if let Some(i) = self.position(product_id) {
            self.lines[i].add_ons = add_ons;
        }
    }

    /// Sum of `unit price × quantity`
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of `unit volume × quantity` over lines whose category passes `filter`
    pub fn total_volume_liters(&self, filter: Option<&dyn Fn(ProductCategory) -> bool>) -> f64 {
        let volume: Decimal = self
            .lines
            .iter()
            .filter(|l| filter.is_none_or(|f| f(l.product.category)))
            .map(|l| to_decimal(l.product.volume_liters) * Decimal::from(l.quantity))
            .sum();
        to_f64(volume)
    }

    /// Liters of bulk containers (30L and 50L kegs)
    pub fn bulk_volume_liters(&self) -> f64 {
        self.total_volume_liters(Some(&|c: ProductCategory| c.is_bulk()))
    }

    /// Whether any line is a bulk container
    pub fn has_bulk(&self) -> bool {
        self.lines.iter().any(|l| l.product.category.is_bulk())
    }
}
