//! Catalog Provider - read-only product records
//!
//! Everything downstream (cart, checkout, API) consumes products through the
//! [`CatalogProvider`] trait. The server ships with [`StaticCatalog`], built
//! from the vendor's fixed product list.

use shared::models::{BeerStyle, Product, ProductAttributes, ProductCategory};
use std::collections::HashMap;

/// Read-only product source
pub trait CatalogProvider: Send + Sync {
    /// All products in display order
    fn list_products(&self) -> Vec<Product>;

    /// Look up one product by id
    fn get_product(&self, id: &str) -> Option<Product>;
}

/// In-memory catalog indexed by product id
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl StaticCatalog {
    /// Build a catalog; later duplicates of an id are ignored
    pub fn new(products: Vec<Product>) -> Self {
        let mut kept = Vec::with_capacity(products.len());
        let mut index = HashMap::with_capacity(products.len());
        for product in products {
            if index.contains_key(&product.id) {
                tracing::warn!(product_id = %product.id, "Duplicate product id ignored");
                continue;
            }
            index.insert(product.id.clone(), kept.len());
            kept.push(product);
        }
        Self {
            products: kept,
            index,
        }
    }

    /// The vendor's standard growler and keg list
    pub fn standard() -> Self {
        Self::new(standard_products())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_products(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn get_product(&self, id: &str) -> Option<Product> {
        self.index.get(id).map(|&i| self.products[i].clone())
    }
}

#[allow(clippy::too_many_arguments)]
fn growler(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    style: BeerStyle,
    abv: f64,
    ibu: u32,
    pairing: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: ProductCategory::Growler,
        volume_liters: 1.0,
        attributes: ProductAttributes {
            style: Some(style),
            abv: Some(abv),
            ibu: Some(ibu),
            pairing: Some(pairing.to_string()),
            is_popular: false,
        },
    }
}

fn keg(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: ProductCategory,
    volume_liters: f64,
    style: BeerStyle,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category,
        volume_liters,
        attributes: ProductAttributes {
            style: Some(style),
            is_popular: true,
            ..Default::default()
        },
    }
}

fn standard_products() -> Vec<Product> {
    vec![
        growler(
            "growler-pilsen-cristal-1l",
            "Pilsen Cristal 1L",
            "A típica Pilsen dos brasileiros. Clara, leve e refrescante.",
            17.0,
            BeerStyle::Pilsen,
            4.5,
            7,
            "Hambúrguer, Massas, Aperitivos, Queijos",
        ),
        growler(
            "growler-premium-lager-1l",
            "Premium Lager 1L",
            "Dourada com notas maltadas, corpo médio e espuma cremosa.",
            18.0,
            BeerStyle::Lager,
            4.5,
            12,
            "Hambúrguer, Massas, Pizza, Frutos do mar",
        ),
        growler(
            "growler-american-ipa-1l",
            "American IPA 1L",
            "Acobreada, amargor moderado e aromas cítricos intensos.",
            25.0,
            BeerStyle::Ipa,
            6.1,
            47,
            "Hambúrguer, Carne assada, Comida mexicana, Massas",
        ),
        growler(
            "growler-session-ipa-1l",
            "Session IPA 1L",
            "Leve, dourada e extremamente refrescante.",
            25.0,
            BeerStyle::Ipa,
            5.0,
            30,
            "Hambúrguer, Comida mexicana, Carne assada, Massas",
        ),
        growler(
            "growler-vinho-tinto-1l",
            "Chopp de Vinho Tinto 1L",
            "Fermentado de uvas Isabel e Bordeaux, frisante.",
            25.0,
            BeerStyle::Lager,
            5.0,
            0,
            "Carnes, Queijos, Massas, Sobremesas",
        ),
        growler(
            "growler-vinho-branco-1l",
            "Chopp de Vinho Branco 1L",
            "Fermentado de uvas Moscato, levemente adocicado.",
            25.0,
            BeerStyle::Lager,
            5.0,
            0,
            "Carnes assadas, Queijos, Massas, Sobremesas",
        ),
        keg(
            "keg-pilsen-30",
            "Barril Pilsen 30L",
            "Leve, refrescante e perfeito para grandes churrascos.",
            450.0,
            ProductCategory::Keg30,
            30.0,
            BeerStyle::Pilsen,
        ),
        keg(
            "keg-ipa-30",
            "Barril IPA 30L",
            "Para quem quer uma festa com personalidade.",
            580.0,
            ProductCategory::Keg30,
            30.0,
            BeerStyle::Ipa,
        ),
        keg(
            "keg-pilsen-50",
            "Barril Pilsen 50L",
            "O barril para eventos grandes.",
            700.0,
            ProductCategory::Keg50,
            50.0,
            BeerStyle::Pilsen,
        ),
    ]
}
