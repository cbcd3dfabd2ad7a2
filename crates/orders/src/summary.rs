use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Money, OrderId, ProductId};

/// Order header row, as listed and as returned by header creation.
///
/// Sales name their counterparty `customer`, purchases `supplier`; both decode
/// into `party`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    #[serde(alias = "customer", alias = "supplier")]
    pub party: i64,
    #[serde(alias = "customer_name", alias = "supplier_name", default)]
    pub party_name: Option<String>,
    /// Server-maintained running total of the header's items.
    #[serde(default)]
    pub total: Money,
    pub created_at: DateTime<Utc>,
}

/// One item creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub order: OrderId,
    pub product: ProductId,
    pub quantity: i64,
}
