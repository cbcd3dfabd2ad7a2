//! The line-item order builder shared by the sales and purchase screens.
//!
//! The builder owns one pending order: an insertion-ordered list of lines and
//! the selected counterparty. The subtotal is never stored; `subtotal()`
//! folds over the current lines every time it is asked, so no sequence of
//! edits can make it drift.
//!
//! Submission is split in three so the host can await the network in
//! between:
//!
//! ```text
//!   Idle ──edit──▶ Editing ──begin_submit──▶ Submitting ──complete_submit──▶ Idle
//!                     ▲                          │
//!                     └──────abort_submit────────┘
//! ```
//!
//! While `Submitting`, every mutation and any second `begin_submit` fails with
//! `OrderError::SubmitInFlight`.

use core::marker::PhantomData;

use stockroom_core::{Money, ProductId};
use stockroom_products::ProductCatalog;

use crate::error::{OrderError, ValidationIssue};
use crate::kind::{OrderKind, PartyId};
use crate::line::{self, LineField, LineItem};

/// Lifecycle of a builder instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// Fresh or just reset; nothing entered.
    Idle,
    /// The user has touched the order.
    Editing,
    /// Requests are in flight.
    Submitting,
}

/// A line as it will be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedItem {
    pub product: ProductId,
    pub quantity: i64,
}

/// Validated snapshot of an order, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPlan<P> {
    pub party: P,
    pub items: Vec<PlannedItem>,
    pub subtotal: Money,
}

/// Pending order of kind `K`.
#[derive(Debug, Clone)]
pub struct OrderBuilder<K: OrderKind> {
    lines: Vec<LineItem>,
    party: Option<PartyId<K>>,
    state: BuilderState,
    _kind: PhantomData<K>,
}

impl<K: OrderKind> Default for OrderBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: OrderKind> OrderBuilder<K> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            party: None,
            state: BuilderState::Idle,
            _kind: PhantomData,
        }
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn party(&self) -> Option<PartyId<K>> {
        self.party
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == BuilderState::Submitting
    }

    /// Sum of `quantity × unit_price` over all lines.
    pub fn subtotal(&self) -> Money {
        line::subtotal(&self.lines)
    }

    /// Appends a blank line and returns its index.
    pub fn add_line(&mut self) -> Result<usize, OrderError> {
        self.ensure_editable()?;
        self.lines.push(LineItem::default());
        self.touch();
        Ok(self.lines.len() - 1)
    }

    /// Edits one field of line `index`.
    ///
    /// Choosing a product re-prices the line from `catalog` using the kind's
    /// price; an unknown or cleared product prices it at zero.
    pub fn set_line_field(
        &mut self,
        index: usize,
        field: LineField,
        catalog: &ProductCatalog,
    ) -> Result<(), OrderError> {
        self.ensure_editable()?;
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(OrderError::OutOfRange { index, len })?;

        match field {
            LineField::Product(product) => {
                line.product = product;
                line.unit_price = product
                    .and_then(|id| catalog.price_of(id, K::PRICE))
                    .unwrap_or(Money::ZERO);
            }
            LineField::Quantity(quantity) => {
                line.quantity = quantity;
            }
        }

        self.touch();
        Ok(())
    }

    /// Removes and returns line `index`.
    pub fn remove_line(&mut self, index: usize) -> Result<LineItem, OrderError> {
        self.ensure_editable()?;
        let len = self.lines.len();
        if index >= len {
            return Err(OrderError::OutOfRange { index, len });
        }
        let removed = self.lines.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Sets (or clears) the header's customer/supplier.
    pub fn select_party(&mut self, party: Option<PartyId<K>>) -> Result<(), OrderError> {
        self.ensure_editable()?;
        self.party = party;
        self.touch();
        Ok(())
    }

    /// Discards all lines and the party selection.
    pub fn clear(&mut self) -> Result<(), OrderError> {
        self.ensure_editable()?;
        self.reset();
        Ok(())
    }

    /// Checks the order without changing state; lists every problem found.
    pub fn validate(&self) -> Result<SubmissionPlan<PartyId<K>>, OrderError> {
        let mut issues = Vec::new();

        if self.party.is_none() {
            issues.push(ValidationIssue::MissingParty);
        }
        if self.lines.is_empty() {
            issues.push(ValidationIssue::NoLines);
        }

        let mut items = Vec::with_capacity(self.lines.len());
        for (idx, line) in self.lines.iter().enumerate() {
            if line.product.is_none() {
                issues.push(ValidationIssue::MissingProduct { line: idx });
            }
            if !line.has_valid_quantity() {
                issues.push(ValidationIssue::InvalidQuantity { line: idx });
            }
            if let (Some(product), Some(quantity)) = (line.product, line.quantity) {
                items.push(PlannedItem { product, quantity });
            }
        }

        match self.party {
            Some(party) if issues.is_empty() => Ok(SubmissionPlan {
                party,
                items,
                subtotal: self.subtotal(),
            }),
            _ => Err(OrderError::Validation(issues)),
        }
    }

    /// Validates and enters `Submitting`.
    pub fn begin_submit(&mut self) -> Result<SubmissionPlan<PartyId<K>>, OrderError> {
        self.ensure_editable()?;
        let plan = self.validate()?;
        self.state = BuilderState::Submitting;
        Ok(plan)
    }

    /// Everything was created: start over with an empty order.
    pub fn complete_submit(&mut self) -> Result<(), OrderError> {
        if !self.is_submitting() {
            return Err(OrderError::NotSubmitting);
        }
        self.reset();
        Ok(())
    }

    /// Something failed: keep the lines so the user can retry.
    pub fn abort_submit(&mut self) -> Result<(), OrderError> {
        if !self.is_submitting() {
            return Err(OrderError::NotSubmitting);
        }
        self.state = BuilderState::Editing;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), OrderError> {
        if self.is_submitting() {
            return Err(OrderError::SubmitInFlight);
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.state = BuilderState::Editing;
    }

    fn reset(&mut self) {
        self.lines.clear();
        self.party = None;
        self.state = BuilderState::Idle;
    }
}
