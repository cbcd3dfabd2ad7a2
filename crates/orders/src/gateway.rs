use async_trait::async_trait;

use stockroom_core::{ApiResult, OrderId};
use stockroom_products::Product;

use crate::kind::{OrderKind, PartyId};
use crate::summary::{NewOrderItem, OrderSummary};

/// Remote side of an order flow of kind `K`.
#[async_trait]
pub trait OrderGateway<K: OrderKind>: Send + Sync {
    /// Existing headers, newest last as the server returns them.
    async fn list_orders(&self) -> ApiResult<Vec<OrderSummary>>;

    /// Customers (sales) or suppliers (purchases) to pick the header from.
    async fn list_parties(&self) -> ApiResult<Vec<K::Counterparty>>;

    /// Products offered on this screen (see `OrderKind::CATALOG`).
    async fn list_catalog(&self) -> ApiResult<Vec<Product>>;

    async fn create_header(&self, party: PartyId<K>) -> ApiResult<OrderSummary>;

    async fn create_item(&self, item: NewOrderItem) -> ApiResult<()>;

    /// Deletes a header; the server cascades to its items.
    async fn delete_header(&self, order: OrderId) -> ApiResult<()>;
}
