//! Sending a built order to the API.
//!
//! One header request, then one request per line fanned out concurrently.
//! The API has no transactional "order with items" endpoint, so an item
//! failure after the header exists is handled by `PartialFailurePolicy`.

use futures_util::future::try_join_all;
use tracing::{info, warn};

use stockroom_core::Money;

use crate::builder::OrderBuilder;
use crate::error::SubmitError;
use crate::gateway::OrderGateway;
use crate::kind::OrderKind;
use crate::summary::{NewOrderItem, OrderSummary};

/// What to do with a header whose items did not all get created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialFailurePolicy {
    /// Delete the header again; the server cascades to any items that did land.
    ///
    /// Item creation adjusts product stock server-side and deleting does not
    /// restore it, so stock stays changed with no order explaining it.
    Compensate,
    /// Leave the partially created order on the server, where its items
    /// still account for the stock they moved.
    #[default]
    LeaveOrphan,
}

/// A fully created order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub order: OrderSummary,
    pub items: usize,
    /// Client-side subtotal at submit time.
    pub subtotal: Money,
}

/// Puts the builder back into `Editing` if the submit future is dropped
/// before it settles.
struct InFlight<'a, K: OrderKind> {
    builder: &'a mut OrderBuilder<K>,
    settled: bool,
}

impl<K: OrderKind> InFlight<'_, K> {
    fn complete(mut self) {
        self.settled = true;
        let _ = self.builder.complete_submit();
    }

    fn abort(mut self) {
        self.settled = true;
        let _ = self.builder.abort_submit();
    }
}

impl<K: OrderKind> Drop for InFlight<'_, K> {
    fn drop(&mut self) {
        if !self.settled {
            let _ = self.builder.abort_submit();
        }
    }
}

/// Validates `builder`, creates the header, then all items.
///
/// On success the builder is reset to an empty order. On any failure the
/// builder returns to `Editing` with its lines and party intact. Validation
/// failures send nothing.
pub async fn submit_order<K, G>(
    builder: &mut OrderBuilder<K>,
    gateway: &G,
    policy: PartialFailurePolicy,
) -> Result<SubmitOutcome, SubmitError>
where
    K: OrderKind,
    G: OrderGateway<K> + ?Sized,
{
    let plan = builder.begin_submit()?;
    let flight = InFlight {
        builder,
        settled: false,
    };

    info!(
        kind = K::LABEL,
        party = %plan.party,
        lines = plan.items.len(),
        subtotal = %plan.subtotal,
        "submitting order"
    );

    let header = match gateway.create_header(plan.party).await {
        Ok(header) => header,
        Err(e) => {
            warn!(kind = K::LABEL, error = %e, "order header creation failed");
            flight.abort();
            return Err(SubmitError::Header(e));
        }
    };

    let items: Vec<NewOrderItem> = plan
        .items
        .iter()
        .map(|item| NewOrderItem {
            order: header.id,
            product: item.product,
            quantity: item.quantity,
        })
        .collect();

    if let Err(source) = try_join_all(items.iter().map(|item| gateway.create_item(*item))).await {
        warn!(
            kind = K::LABEL,
            order = %header.id,
            error = %source,
            "order item creation failed"
        );

        let compensated = match policy {
            PartialFailurePolicy::Compensate => match gateway.delete_header(header.id).await {
                Ok(()) => {
                    info!(kind = K::LABEL, order = %header.id, "deleted orphaned order header");
                    true
                }
                Err(e) => {
                    warn!(
                        kind = K::LABEL,
                        order = %header.id,
                        error = %e,
                        "could not delete orphaned order header"
                    );
                    false
                }
            },
            PartialFailurePolicy::LeaveOrphan => false,
        };

        flight.abort();
        return Err(SubmitError::Partial {
            order: header.id,
            source,
            compensated,
        });
    }

    info!(kind = K::LABEL, order = %header.id, items = items.len(), "order submitted");
    flight.complete();

    Ok(SubmitOutcome {
        order: header,
        items: items.len(),
        subtotal: plan.subtotal,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use stockroom_core::{ApiError, ApiResult, CategoryId, CustomerId, OrderId, ProductId};
    use stockroom_parties::Customer;
    use stockroom_products::{Product, ProductCatalog};

    use super::*;
    use crate::builder::BuilderState;
    use crate::error::{OrderError, ValidationIssue};
    use crate::kind::Sales;
    use crate::line::LineField;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Header(CustomerId),
        Item(NewOrderItem),
        Delete(OrderId),
    }

    #[derive(Default)]
    struct FakeGateway {
        calls: Mutex<Vec<Call>>,
        fail_header: bool,
        hang_header: bool,
        fail_item: Option<ProductId>,
        fail_delete: bool,
        deleted: AtomicBool,
    }

    impl FakeGateway {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderGateway<Sales> for FakeGateway {
        async fn list_orders(&self) -> ApiResult<Vec<OrderSummary>> {
            Ok(Vec::new())
        }

        async fn list_parties(&self) -> ApiResult<Vec<Customer>> {
            Ok(Vec::new())
        }

        async fn list_catalog(&self) -> ApiResult<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn create_header(&self, party: CustomerId) -> ApiResult<OrderSummary> {
            self.calls.lock().unwrap().push(Call::Header(party));
            if self.hang_header {
                std::future::pending::<()>().await;
            }
            if self.fail_header {
                return Err(ApiError::network("connection refused"));
            }
            Ok(OrderSummary {
                id: OrderId::new(77),
                party: party.get(),
                party_name: None,
                total: Money::ZERO,
                created_at: Utc::now(),
            })
        }

        async fn create_item(&self, item: NewOrderItem) -> ApiResult<()> {
            self.calls.lock().unwrap().push(Call::Item(item));
            if self.fail_item == Some(item.product) {
                return Err(ApiError::status(400, "{\"quantity\":[\"invalid\"]}"));
            }
            Ok(())
        }

        async fn delete_header(&self, order: OrderId) -> ApiResult<()> {
            self.calls.lock().unwrap().push(Call::Delete(order));
            if self.fail_delete {
                return Err(ApiError::status(500, "boom"));
            }
            self.deleted.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn catalog() -> ProductCatalog {
        let product = |id: i64, price: i64| Product {
            id: ProductId::new(id),
            name: format!("p{id}"),
            description: None,
            selling_price: Money::from_major(price),
            cost_price: Money::from_major(price / 2),
            stock_quantity: 10,
            is_active: true,
            created_at: Utc::now(),
            author: None,
            category: CategoryId::new(1),
        };
        ProductCatalog::new(vec![product(1, 10), product(2, 5)])
    }

    fn ready_builder(lines: &[(i64, i64)]) -> OrderBuilder<Sales> {
        let catalog = catalog();
        let mut builder = OrderBuilder::<Sales>::new();
        builder.select_party(Some(CustomerId::new(3))).unwrap();
        for &(product, quantity) in lines {
            let idx = builder.add_line().unwrap();
            builder
                .set_line_field(idx, LineField::Product(Some(ProductId::new(product))), &catalog)
                .unwrap();
            builder
                .set_line_field(idx, LineField::Quantity(Some(quantity)), &catalog)
                .unwrap();
        }
        builder
    }

    #[tokio::test]
    async fn one_line_creates_header_then_item_and_resets() {
        let gateway = FakeGateway::default();
        let mut builder = ready_builder(&[(1, 2)]);

        let outcome = submit_order(&mut builder, &gateway, PartialFailurePolicy::default())
            .await
            .unwrap();

        assert_eq!(outcome.order.id, OrderId::new(77));
        assert_eq!(outcome.items, 1);
        assert_eq!(outcome.subtotal, Money::from_major(20));
        assert_eq!(
            gateway.calls(),
            vec![
                Call::Header(CustomerId::new(3)),
                Call::Item(NewOrderItem {
                    order: OrderId::new(77),
                    product: ProductId::new(1),
                    quantity: 2,
                }),
            ]
        );
        assert!(builder.is_empty());
        assert_eq!(builder.party(), None);
        assert_eq!(builder.state(), BuilderState::Idle);
    }

    #[tokio::test]
    async fn invalid_order_sends_nothing() {
        let gateway = FakeGateway::default();
        let mut builder = OrderBuilder::<Sales>::new();
        builder.add_line().unwrap();

        let err = submit_order(&mut builder, &gateway, PartialFailurePolicy::default())
            .await
            .unwrap_err();

        match err {
            SubmitError::Rejected(OrderError::Validation(issues)) => {
                assert!(issues.contains(&ValidationIssue::MissingParty));
                assert!(issues.contains(&ValidationIssue::MissingProduct { line: 0 }));
            }
            other => panic!("expected validation rejection, got {other:?}"),
        }
        assert!(gateway.calls().is_empty());
        assert_eq!(builder.len(), 1);
    }

    #[tokio::test]
    async fn header_failure_keeps_lines() {
        let gateway = FakeGateway {
            fail_header: true,
            ..FakeGateway::default()
        };
        let mut builder = ready_builder(&[(1, 2), (2, 1)]);

        let err = submit_order(&mut builder, &gateway, PartialFailurePolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Header(ApiError::Network(_))));
        assert_eq!(gateway.calls(), vec![Call::Header(CustomerId::new(3))]);
        assert_eq!(builder.state(), BuilderState::Editing);
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.subtotal(), Money::from_major(25));
    }

    #[tokio::test]
    async fn item_failure_compensates_and_keeps_lines_editable() {
        let gateway = FakeGateway {
            fail_item: Some(ProductId::new(2)),
            ..FakeGateway::default()
        };
        let mut builder = ready_builder(&[(1, 2), (2, 1)]);

        let err = submit_order(&mut builder, &gateway, PartialFailurePolicy::Compensate)
            .await
            .unwrap_err();

        match &err {
            SubmitError::Partial {
                order,
                compensated,
                source,
            } => {
                assert_eq!(*order, OrderId::new(77));
                assert!(*compensated);
                assert!(matches!(source, ApiError::Status { status: 400, .. }));
            }
            other => panic!("expected partial failure, got {other:?}"),
        }
        assert!(gateway.deleted.load(Ordering::SeqCst));
        let deletes = gateway
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Delete(_)))
            .count();
        assert_eq!(deletes, 1);

        assert_eq!(builder.state(), BuilderState::Editing);
        assert_eq!(builder.len(), 2);
        builder.add_line().unwrap();
    }

    #[tokio::test]
    async fn leave_orphan_skips_delete() {
        let gateway = FakeGateway {
            fail_item: Some(ProductId::new(1)),
            ..FakeGateway::default()
        };
        let mut builder = ready_builder(&[(1, 2)]);

        let err = submit_order(&mut builder, &gateway, PartialFailurePolicy::LeaveOrphan)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Partial {
                compensated: false,
                ..
            }
        ));
        assert!(!gateway.calls().iter().any(|c| matches!(c, Call::Delete(_))));
        assert_eq!(builder.len(), 1);
    }

    #[tokio::test]
    async fn default_policy_keeps_partial_order() {
        assert_eq!(PartialFailurePolicy::default(), PartialFailurePolicy::LeaveOrphan);

        let gateway = FakeGateway {
            fail_item: Some(ProductId::new(2)),
            ..FakeGateway::default()
        };
        let mut builder = ready_builder(&[(1, 2), (2, 1)]);

        let err = submit_order(&mut builder, &gateway, PartialFailurePolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Partial {
                compensated: false,
                ..
            }
        ));
        assert!(!gateway.deleted.load(Ordering::SeqCst));
        assert_eq!(builder.len(), 2);
    }

    #[tokio::test]
    async fn failed_compensation_is_reported() {
        let gateway = FakeGateway {
            fail_item: Some(ProductId::new(1)),
            fail_delete: true,
            ..FakeGateway::default()
        };
        let mut builder = ready_builder(&[(1, 2)]);

        let err = submit_order(&mut builder, &gateway, PartialFailurePolicy::Compensate)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Partial {
                compensated: false,
                ..
            }
        ));
        assert_eq!(builder.state(), BuilderState::Editing);
    }

    #[tokio::test]
    async fn abandoned_submit_returns_builder_to_editing() {
        let gateway = FakeGateway {
            hang_header: true,
            ..FakeGateway::default()
        };
        let mut builder = ready_builder(&[(1, 2)]);

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            submit_order(&mut builder, &gateway, PartialFailurePolicy::default()),
        )
        .await;

        assert!(result.is_err(), "submit should still be pending");
        assert_eq!(builder.state(), BuilderState::Editing);
        assert_eq!(builder.len(), 1);
        assert_eq!(gateway.calls(), vec![Call::Header(CustomerId::new(3))]);
    }
}
