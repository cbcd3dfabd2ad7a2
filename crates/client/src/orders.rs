//! `OrderGateway` for sales and purchases.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::info;

use stockroom_core::{ApiError, ApiResult, OrderId};
use stockroom_orders::{CatalogScope, NewOrderItem, OrderGateway, OrderKind, OrderSummary, PartyId};
use stockroom_products::Product;

use crate::client::ApiClient;
use crate::records::RecordEndpoint;

fn collection<K: OrderKind>() -> String {
    format!("api/{}/", K::PLURAL)
}

fn header_body<K: OrderKind>(party: PartyId<K>) -> ApiResult<Map<String, Value>> {
    let party = serde_json::to_value(party).map_err(|e| ApiError::decode(e.to_string()))?;
    let mut body = Map::new();
    body.insert(K::PARTY_FIELD.to_string(), party);
    Ok(body)
}

fn item_body<K: OrderKind>(item: NewOrderItem) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(K::LABEL.to_string(), Value::from(item.order.get()));
    body.insert("product".to_string(), Value::from(item.product.get()));
    body.insert("quantity".to_string(), Value::from(item.quantity));
    body
}

#[async_trait]
impl<K> OrderGateway<K> for ApiClient
where
    K: OrderKind,
    K::Counterparty: RecordEndpoint,
{
    async fn list_orders(&self) -> ApiResult<Vec<OrderSummary>> {
        let orders: Vec<OrderSummary> = self.get_json(&collection::<K>()).await?;
        info!(resource = K::PLURAL, count = orders.len(), "orders listed");
        Ok(orders)
    }

    async fn list_parties(&self) -> ApiResult<Vec<K::Counterparty>> {
        self.get_json(<K::Counterparty as RecordEndpoint>::LIST).await
    }

    async fn list_catalog(&self) -> ApiResult<Vec<Product>> {
        let path = match K::CATALOG {
            CatalogScope::All => <Product as RecordEndpoint>::LIST,
            CatalogScope::Own => <Product as RecordEndpoint>::COLLECTION,
        };
        self.get_json(path).await
    }

    async fn create_header(&self, party: PartyId<K>) -> ApiResult<OrderSummary> {
        let body = header_body::<K>(party)?;
        self.post_json(&collection::<K>(), &body).await
    }

    async fn create_item(&self, item: NewOrderItem) -> ApiResult<()> {
        let path = format!("{}items/", collection::<K>());
        self.post_discard(&path, &item_body::<K>(item)).await
    }

    async fn delete_header(&self, order: OrderId) -> ApiResult<()> {
        self.delete(&format!("{}{}/", collection::<K>(), order)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use stockroom_core::{CustomerId, ProductId, SupplierId};
    use stockroom_orders::{Purchases, Sales};

    use super::*;

    #[test]
    fn payloads_use_kind_field_names() {
        assert_eq!(
            Value::Object(header_body::<Sales>(CustomerId::new(3)).unwrap()),
            json!({ "customer": 3 })
        );
        assert_eq!(
            Value::Object(header_body::<Purchases>(SupplierId::new(8)).unwrap()),
            json!({ "supplier": 8 })
        );

        let item = NewOrderItem {
            order: OrderId::new(12),
            product: ProductId::new(5),
            quantity: 2,
        };
        assert_eq!(
            Value::Object(item_body::<Purchases>(item)),
            json!({ "purchase": 12, "product": 5, "quantity": 2 })
        );
        assert_eq!(collection::<Sales>(), "api/sales/");
    }
}
