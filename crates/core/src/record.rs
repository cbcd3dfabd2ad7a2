//! Record traits: the shape shared by every list-and-form resource.
//!
//! Customers, suppliers, categories and products are all managed the same
//! way: fetch the list, pick one to edit (or start blank), submit a full-record
//! payload. `Record` describes the list row, `Draft` the form payload, and
//! `RecordGateway` the remote collection they live in.

use core::fmt::{Debug, Display};
use core::hash::Hash;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiResult, DomainResult};

/// Full-record form payload used for both create (POST) and update (PUT).
pub trait Draft: Clone + Default + Debug + Serialize + Send + Sync + 'static {
    /// Client-side checks run before anything is sent.
    fn validate(&self) -> DomainResult<()>;

    /// Copy ready to be sent. Defaults to an unchanged clone.
    fn normalized(&self) -> Self {
        self.clone()
    }
}

/// A row returned by a list endpoint.
pub trait Record: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + Debug + Display + Serialize + Send + Sync + 'static;
    type Draft: Draft;

    /// Singular noun used in user notices, e.g. `"customer"`.
    const LABEL: &'static str;

    /// Plural noun used in user notices, e.g. `"customers"`.
    const PLURAL: &'static str;

    fn id(&self) -> Self::Id;

    /// Form payload pre-filled from this record (edit mode).
    fn to_draft(&self) -> Self::Draft;
}

/// Remote collection of `R`.
#[async_trait]
pub trait RecordGateway<R: Record>: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<R>>;

    async fn create(&self, draft: &R::Draft) -> ApiResult<R>;

    async fn update(&self, id: R::Id, draft: &R::Draft) -> ApiResult<R>;
}

/// Linear lookup by id in a loaded list.
pub fn find_record<R: Record>(records: &[R], id: R::Id) -> Option<&R> {
    records.iter().find(|r| r.id() == id)
}
