//! The product catalog repository.

use crate::catalog::barcode::is_valid_ean13;
use crate::catalog::product::{Product, ProductUpdate};
use crate::error::RetailError;
use crate::ids::ProductCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A search filter over catalog attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    /// Exact brand match (case-insensitive).
    Brand(String),
    /// Exact category match (case-insensitive).
    Category(String),
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::Brand(brand) => product.brand.eq_ignore_ascii_case(brand),
            ProductFilter::Category(category) => product.category.eq_ignore_ascii_case(category),
        }
    }
}

/// The authoritative product store, keyed by barcode.
///
/// Inventories, carts and sales all reference products through their
/// `ProductCode` and resolve against this catalog when they need the
/// full record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    products: BTreeMap<ProductCode, Product>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new product.
    ///
    /// The barcode must pass EAN-13 validation and must not already be
    /// cataloged.
    pub fn register(&mut self, product: Product) -> Result<(), RetailError> {
        if !is_valid_ean13(product.code.as_str()) {
            return Err(RetailError::InvalidBarcode(product.code.to_string()));
        }
        if self.products.contains_key(&product.code) {
            return Err(RetailError::ProductAlreadyExists(product.code.to_string()));
        }
        self.products.insert(product.code.clone(), product);
        Ok(())
    }

    /// Look up a product by barcode.
    pub fn get(&self, code: &ProductCode) -> Result<&Product, RetailError> {
        self.products
            .get(code)
            .ok_or_else(|| RetailError::ProductNotFound(code.to_string()))
    }

    /// Check whether a barcode is cataloged.
    pub fn contains(&self, code: &ProductCode) -> bool {
        self.products.contains_key(code)
    }

    /// Apply typed field updates to a cataloged product.
    pub fn update(
        &mut self,
        code: &ProductCode,
        updates: Vec<ProductUpdate>,
    ) -> Result<&Product, RetailError> {
        let product = self
            .products
            .get_mut(code)
            .ok_or_else(|| RetailError::ProductNotFound(code.to_string()))?;
        for update in updates {
            product.apply(update);
        }
        Ok(product)
    }

    /// Search products whose name, brand or category contains `text`
    /// (case-insensitive), narrowed by the given filters.
    pub fn search(&self, text: &str, filters: &[ProductFilter]) -> Vec<&Product> {
        let needle = text.to_lowercase();
        self.products
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.brand.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .filter(|p| filters.iter().all(|f| f.matches(p)))
            .collect()
    }

    /// Iterate over all cataloged products.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Number of cataloged products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
