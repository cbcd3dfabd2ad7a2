//! Product catalog: the price lookup the order builder consults.

use std::collections::HashMap;

use stockroom_core::{Money, ProductId};

use crate::product::{PriceContext, Product};

/// Loaded product list indexed by id.
///
/// If the list carries the same id twice, the first row wins.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            index.entry(product.id).or_insert(pos);
        }
        Self { products, index }
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&pos| &self.products[pos])
    }

    /// Canonical price of `id` in `context`, `None` if the id is unknown.
    pub fn price_of(&self, id: ProductId, context: PriceContext) -> Option<Money> {
        self.get(id).map(|p| p.price(context))
    }

    /// Products still offered for new orders.
    pub fn active(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_active)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for ProductCatalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}
