use stockroom_core::{Money, ProductId};

/// One product row of a pending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    /// Unset until the user picks a product.
    pub product: Option<ProductId>,
    /// Unset until the user types one; validated only at submit.
    pub quantity: Option<i64>,
    /// Copied from the catalog when the product is chosen.
    pub unit_price: Money,
}

impl LineItem {
    /// Line total; an unset quantity counts as zero.
    pub fn amount(&self) -> Money {
        self.unit_price.times(self.quantity.unwrap_or(0))
    }

    /// A quantity the API will accept.
    pub fn has_valid_quantity(&self) -> bool {
        matches!(self.quantity, Some(q) if q >= 1)
    }
}

/// Editable fields of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Product(Option<ProductId>),
    Quantity(Option<i64>),
}

impl LineField {
    /// Quantity from raw text input. Blank or non-integer text leaves it unset.
    pub fn quantity_input(raw: &str) -> Self {
        Self::Quantity(raw.trim().parse::<i64>().ok())
    }

    /// Product from a select value. Blank or malformed values clear it.
    pub fn product_input(raw: &str) -> Self {
        Self::Product(raw.parse::<ProductId>().ok())
    }
}

/// Sum of every line's amount, recomputed from scratch.
pub fn subtotal(lines: &[LineItem]) -> Money {
    lines.iter().map(LineItem::amount).sum()
}
