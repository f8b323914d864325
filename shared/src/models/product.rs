//! Product Model

use serde::{Deserialize, Serialize};

/// Product category
///
/// Bulk categories switch checkout into event logistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Single-serving 1L growler
    Growler,
    /// 30L keg
    Keg30,
    /// 50L keg
    Keg50,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [Self::Growler, Self::Keg30, Self::Keg50];

    /// Whether this category is a bulk container
    pub fn is_bulk(&self) -> bool {
        matches!(self, Self::Keg30 | Self::Keg50)
    }

    /// Display name used on the storefront and in order messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Growler => "Growlers",
            Self::Keg30 => "Barris 30L",
            Self::Keg50 => "Barris 50L",
        }
    }
}

/// Beer style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeerStyle {
    Pilsen,
    Ipa,
    Weiss,
    Stout,
    Lager,
}

/// Optional rating attributes shown on product cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<BeerStyle>,
    /// Alcohol by volume (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abv: Option<f64>,
    /// International bitterness units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairing: Option<String>,
    #[serde(default)]
    pub is_popular: bool,
}

/// Product entity (immutable, owned by the catalog)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable slug, e.g. `keg-pilsen-30`
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price (BRL)
    pub price: f64,
    pub category: ProductCategory,
    /// Unit volume in liters
    pub volume_liters: f64,
    #[serde(default)]
    pub attributes: ProductAttributes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_categories() {
        assert!(!ProductCategory::Growler.is_bulk());
        assert!(ProductCategory::Keg30.is_bulk());
        assert!(ProductCategory::Keg50.is_bulk());
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ProductCategory::Keg30).unwrap();
        assert_eq!(json, "\"keg30\"");
        let parsed: ProductCategory = serde_json::from_str("\"growler\"").unwrap();
        assert_eq!(parsed, ProductCategory::Growler);
    }
}
