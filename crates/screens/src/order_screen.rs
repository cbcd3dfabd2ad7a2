//! Sales / purchase screen: counterparty picker, line editor, order list.

use std::sync::Arc;

use futures_util::future::join3;
use tracing::{info, warn};

use stockroom_core::{Money, Record};
use stockroom_orders::{
    LineField, LineItem, OrderBuilder, OrderError, OrderGateway, OrderKind, OrderSummary,
    PartialFailurePolicy, PartyId, SubmitError, SubmitOutcome, submit_order,
};
use stockroom_products::{Product, ProductCatalog};

use crate::notice::{Notice, Notifier, capitalize};

/// Controller behind the sales (`K = Sales`) and purchase (`K = Purchases`) screens.
pub struct OrderScreen<K: OrderKind, G: ?Sized> {
    gateway: Arc<G>,
    notifier: Arc<dyn Notifier>,
    policy: PartialFailurePolicy,
    builder: OrderBuilder<K>,
    parties: Vec<K::Counterparty>,
    catalog: ProductCatalog,
    orders: Vec<OrderSummary>,
}

impl<K, G> OrderScreen<K, G>
where
    K: OrderKind,
    G: OrderGateway<K> + ?Sized,
{
    /// `policy` decides what happens to a header whose items failed; pass
    /// the configured one (`ApiClient::partial_failure`).
    pub fn new(gateway: Arc<G>, notifier: Arc<dyn Notifier>, policy: PartialFailurePolicy) -> Self {
        Self {
            gateway,
            notifier,
            policy,
            builder: OrderBuilder::new(),
            parties: Vec::new(),
            catalog: ProductCatalog::default(),
            orders: Vec::new(),
        }
    }

    pub fn policy(&self) -> PartialFailurePolicy {
        self.policy
    }

    /// Loads counterparties, the catalog and the order list concurrently.
    ///
    /// Each failed fetch raises its own notice and leaves that list as it was;
    /// the others still load.
    pub async fn mount(&mut self) {
        let gateway = &*self.gateway;
        let (parties, catalog, orders) = join3(
            gateway.list_parties(),
            gateway.list_catalog(),
            gateway.list_orders(),
        )
        .await;

        match parties {
            Ok(parties) => self.parties = parties,
            Err(e) => self.fetch_failed(<K::Counterparty as Record>::PLURAL, &e),
        }
        match catalog {
            Ok(products) => self.catalog = ProductCatalog::new(products),
            Err(e) => self.fetch_failed("products", &e),
        }
        match orders {
            Ok(orders) => self.orders = orders,
            Err(e) => self.fetch_failed(K::PLURAL, &e),
        }

        info!(
            kind = K::LABEL,
            parties = self.parties.len(),
            products = self.catalog.len(),
            orders = self.orders.len(),
            "order screen mounted"
        );
    }

    /// Reloads the order list. Returns whether it succeeded.
    pub async fn refresh_orders(&mut self) -> bool {
        match self.gateway.list_orders().await {
            Ok(orders) => {
                self.orders = orders;
                true
            }
            Err(e) => {
                self.fetch_failed(K::PLURAL, &e);
                false
            }
        }
    }

    fn fetch_failed(&self, what: &str, error: &stockroom_core::ApiError) {
        warn!(kind = K::LABEL, resource = what, error = %error, "fetch failed");
        self.notifier
            .notify(Notice::failure(format!("Failed to fetch {what}!")));
    }

    pub fn builder(&self) -> &OrderBuilder<K> {
        &self.builder
    }

    pub fn lines(&self) -> &[LineItem] {
        self.builder.lines()
    }

    pub fn subtotal(&self) -> Money {
        self.builder.subtotal()
    }

    pub fn parties(&self) -> &[K::Counterparty] {
        &self.parties
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Products offered in the line picker; inactive ones are left out.
    pub fn selectable_products(&self) -> impl Iterator<Item = &Product> {
        self.catalog.active()
    }

    pub fn orders(&self) -> &[OrderSummary] {
        &self.orders
    }

    pub fn add_line(&mut self) -> Result<usize, OrderError> {
        self.builder.add_line()
    }

    /// Edits one line, pricing product choices from the loaded catalog.
    pub fn set_line_field(&mut self, index: usize, field: LineField) -> Result<(), OrderError> {
        self.builder.set_line_field(index, field, &self.catalog)
    }

    pub fn remove_line(&mut self, index: usize) -> Result<LineItem, OrderError> {
        self.builder.remove_line(index)
    }

    pub fn select_party(&mut self, party: Option<PartyId<K>>) -> Result<(), OrderError> {
        self.builder.select_party(party)
    }

    /// Submits the pending order and reports the result as a notice.
    ///
    /// On success the form is cleared and the order list reloaded. On failure
    /// the lines and the selected counterparty are kept for another attempt.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let label = capitalize(K::LABEL);
        let result = submit_order(&mut self.builder, &*self.gateway, self.policy).await;

        match &result {
            Ok(_) => {
                self.notifier
                    .notify(Notice::success(format!("{label} created successfully!")));
                self.refresh_orders().await;
            }
            Err(SubmitError::Rejected(OrderError::SubmitInFlight)) => {}
            Err(SubmitError::Rejected(e)) => {
                self.notifier
                    .notify(Notice::failure(format!("Failed to create {}! {e}", K::LABEL)));
            }
            Err(SubmitError::Partial {
                order,
                compensated: false,
                ..
            }) => {
                self.notifier.notify(Notice::failure(format!(
                    "Failed to create {}! {label} #{order} was left incomplete on the server.",
                    K::LABEL
                )));
            }
            Err(_) => {
                self.notifier
                    .notify(Notice::failure(format!("Failed to create {}!", K::LABEL)));
            }
        }

        result
    }
}
