//! Order kinds: sales and purchases.
//!
//! The two flows are identical except for who the counterparty is, which
//! product price a line takes, which slice of the catalog is offered, and the
//! names used on the wire.

use core::fmt;

use stockroom_core::Record;
use stockroom_parties::{Customer, Supplier};
use stockroom_products::PriceContext;

/// Which product list an order screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogScope {
    /// Every product in the system.
    All,
    /// Only products authored by the signed-in user.
    Own,
}

/// Static description of an order flow.
pub trait OrderKind: fmt::Debug + Clone + Copy + Default + Send + Sync + 'static {
    /// Record type of the header's counterparty.
    type Counterparty: Record;

    /// Singular noun, e.g. `"sale"`. Also the item payload's header field.
    const LABEL: &'static str;

    /// Plural noun and collection path segment, e.g. `"sales"`.
    const PLURAL: &'static str;

    /// Header payload field naming the counterparty, e.g. `"customer"`.
    const PARTY_FIELD: &'static str;

    const PRICE: PriceContext;

    const CATALOG: CatalogScope;
}

/// Id type of `K`'s counterparty.
pub type PartyId<K> = <<K as OrderKind>::Counterparty as Record>::Id;

/// Sales to customers, priced at the selling price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sales;

/// Purchases from suppliers, priced at the cost price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Purchases;

impl OrderKind for Sales {
    type Counterparty = Customer;

    const LABEL: &'static str = "sale";
    const PLURAL: &'static str = "sales";
    const PARTY_FIELD: &'static str = "customer";
    const PRICE: PriceContext = PriceContext::Selling;
    const CATALOG: CatalogScope = CatalogScope::All;
}

impl OrderKind for Purchases {
    type Counterparty = Supplier;

    const LABEL: &'static str = "purchase";
    const PLURAL: &'static str = "purchases";
    const PARTY_FIELD: &'static str = "supplier";
    const PRICE: PriceContext = PriceContext::Cost;
    const CATALOG: CatalogScope = CatalogScope::Own;
}
