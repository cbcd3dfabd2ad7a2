//! `RecordGateway` over the list-and-form resources.

use async_trait::async_trait;
use tracing::info;

use stockroom_core::{ApiResult, Record, RecordGateway};
use stockroom_parties::{Customer, Supplier};
use stockroom_products::{Category, Product};

use crate::client::ApiClient;

/// Where a record type lives on the API.
pub trait RecordEndpoint: Record {
    /// Collection path; POST target and prefix of `{id}/` for PUT.
    const COLLECTION: &'static str;

    /// Path listed by record screens.
    const LIST: &'static str = Self::COLLECTION;
}

impl RecordEndpoint for Customer {
    const COLLECTION: &'static str = "api/customers/";
}

impl RecordEndpoint for Supplier {
    const COLLECTION: &'static str = "api/suppliers/";
}

impl RecordEndpoint for Category {
    const COLLECTION: &'static str = "api/categories/";
}

/// The product screen manages every product, not only the user's own.
impl RecordEndpoint for Product {
    const COLLECTION: &'static str = "api/products/";
    const LIST: &'static str = "api/products/all/";
}

pub(crate) fn item_path<R: RecordEndpoint>(id: R::Id) -> String {
    format!("{}{}/", R::COLLECTION, id)
}

#[async_trait]
impl<R: RecordEndpoint> RecordGateway<R> for ApiClient {
    async fn list(&self) -> ApiResult<Vec<R>> {
        let records: Vec<R> = self.get_json(R::LIST).await?;
        info!(resource = R::PLURAL, count = records.len(), "records listed");
        Ok(records)
    }

    async fn create(&self, draft: &R::Draft) -> ApiResult<R> {
        let record: R = self.post_json(R::COLLECTION, draft).await?;
        info!(resource = R::LABEL, id = %record.id(), "record created");
        Ok(record)
    }

    async fn update(&self, id: R::Id, draft: &R::Draft) -> ApiResult<R> {
        let record: R = self.put_json(&item_path::<R>(id), draft).await?;
        info!(resource = R::LABEL, id = %id, "record updated");
        Ok(record)
    }
}
