use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, Draft, DomainError, DomainResult, Money, ProductId, Record};

const NAME_MAX: usize = 100;

/// Which of a product's two prices applies.
///
/// Sales are priced at the selling price, purchases at the cost price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceContext {
    Selling,
    Cost,
}

/// Product row as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "sellingPrice")]
    pub selling_price: Money,
    #[serde(rename = "costPrice")]
    pub cost_price: Money,
    #[serde(rename = "stockQuantity", default)]
    pub stock_quantity: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Owning user; set by the server.
    #[serde(default)]
    pub author: Option<i64>,
    #[serde(rename = "productCategory")]
    pub category: CategoryId,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// The canonical price for the given context.
    pub fn price(&self, context: PriceContext) -> Money {
        match context {
            PriceContext::Selling => self.selling_price,
            PriceContext::Cost => self.cost_price,
        }
    }
}

/// Form payload for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "sellingPrice")]
    pub selling_price: Money,
    #[serde(rename = "costPrice")]
    pub cost_price: Money,
    #[serde(rename = "stockQuantity")]
    pub stock_quantity: i64,
    #[serde(rename = "productCategory")]
    pub category: Option<CategoryId>,
    pub is_active: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            selling_price: Money::ZERO,
            cost_price: Money::ZERO,
            stock_quantity: 0,
            category: None,
            is_active: true,
        }
    }
}

impl Draft for ProductDraft {
    fn validate(&self) -> DomainResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if name.chars().count() > NAME_MAX {
            return Err(DomainError::validation(format!(
                "name cannot exceed {NAME_MAX} characters"
            )));
        }
        if self.selling_price.is_negative() {
            return Err(DomainError::validation("selling price cannot be negative"));
        }
        if self.cost_price.is_negative() {
            return Err(DomainError::validation("cost price cannot be negative"));
        }
        if self.stock_quantity < 0 {
            return Err(DomainError::validation("stock quantity cannot be negative"));
        }
        if self.category.is_none() {
            return Err(DomainError::validation("a category must be selected"));
        }
        Ok(())
    }

    /// Trimmed name; a blank description is sent as `null`.
    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_owned),
            ..self.clone()
        }
    }
}

impl Record for Product {
    type Id = ProductId;
    type Draft = ProductDraft;

    const LABEL: &'static str = "product";
    const PLURAL: &'static str = "products";

    fn id(&self) -> ProductId {
        self.id
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            selling_price: self.selling_price,
            cost_price: self.cost_price,
            stock_quantity: self.stock_quantity,
            category: Some(self.category),
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_row() -> serde_json::Value {
        json!({
            "id": 4,
            "name": "Widget",
            "description": null,
            "sellingPrice": "10.00",
            "costPrice": "6.25",
            "stockQuantity": 12,
            "is_active": true,
            "created_at": "2024-05-01T10:00:00.123456Z",
            "author": 1,
            "productCategory": 2,
        })
    }

    #[test]
    fn decodes_api_row() {
        let product: Product = serde_json::from_value(api_row()).unwrap();
        assert_eq!(product.id, ProductId::new(4));
        assert_eq!(product.selling_price, Money::from_major(10));
        assert_eq!(product.cost_price, Money::from_cents(625));
        assert_eq!(product.category, CategoryId::new(2));
        assert_eq!(product.stock_quantity, 12);
    }

    #[test]
    fn price_follows_context() {
        let product: Product = serde_json::from_value(api_row()).unwrap();
        assert_eq!(product.price(PriceContext::Selling), Money::from_major(10));
        assert_eq!(product.price(PriceContext::Cost), Money::from_cents(625));
    }

    #[test]
    fn draft_uses_api_field_names() {
        let draft = ProductDraft {
            name: "Widget".into(),
            selling_price: Money::from_major(10),
            cost_price: Money::from_major(6),
            stock_quantity: 3,
            category: Some(CategoryId::new(2)),
            ..ProductDraft::default()
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["sellingPrice"], "10.00");
        assert_eq!(value["costPrice"], "6.00");
        assert_eq!(value["stockQuantity"], 3);
        assert_eq!(value["productCategory"], 2);
        assert_eq!(value["is_active"], true);
    }

    #[test]
    fn new_draft_is_active_and_invalid_until_filled() {
        let draft = ProductDraft::default();
        assert!(draft.is_active);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn draft_requires_category() {
        let draft = ProductDraft {
            name: "Widget".into(),
            ..ProductDraft::default()
        };
        match draft.validate().unwrap_err() {
            DomainError::Validation(msg) if msg.contains("category") => {}
            other => panic!("expected category validation error, got {other:?}"),
        }
    }

    #[test]
    fn draft_rejects_negative_values() {
        let base = ProductDraft {
            name: "Widget".into(),
            category: Some(CategoryId::new(1)),
            ..ProductDraft::default()
        };
        assert!(base.validate().is_ok());

        let negative_price = ProductDraft {
            cost_price: Money::from_cents(-1),
            ..base.clone()
        };
        assert!(negative_price.validate().is_err());

        let negative_stock = ProductDraft {
            stock_quantity: -5,
            ..base
        };
        assert!(negative_stock.validate().is_err());
    }

    #[test]
    fn to_draft_round_trips_editable_fields() {
        let product: Product = serde_json::from_value(api_row()).unwrap();
        let draft = product.to_draft();
        assert_eq!(draft.category, Some(product.category));
        assert_eq!(draft.selling_price, product.selling_price);
        assert!(draft.validate().is_ok());
    }
}
