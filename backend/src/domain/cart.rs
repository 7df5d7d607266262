//! Shopping cart aggregate.
//!
//! A cart holds at most one line per product and every line has a positive
//! quantity. Mutations preserve that invariant; [`Cart::from_lines`] restores
//! it for carts loaded from storage.

use serde::{Deserialize, Serialize};

use super::catalogue::{Product, Unit};
use super::validation::{ValidationError, Violation};
use super::{Money, ProductId};

/// Upper bound on a single line's quantity.
pub const MAX_LINE_QUANTITY: u32 = 1_000_000;

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub unit: Unit,
}

impl CartLine {
    /// Line for `quantity` of `product` at its current catalogue price.
    pub fn for_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            unit: product.unit,
        }
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// A user's cart.
///
/// # Examples
/// ```
/// use storefront::domain::catalogue::Unit;
/// use storefront::domain::{Cart, CartLine, Money, ProductId};
///
/// let id = ProductId::random();
/// let line = CartLine {
///     product_id: id,
///     name: "Copper wire".into(),
///     unit_price: Money::from_minor(900),
///     quantity: 2,
///     unit: Unit::Kg,
/// };
/// let mut cart = Cart::default();
/// cart.add(line.clone()).unwrap();
/// cart.add(line).unwrap();
/// assert_eq!(cart.count(), 4);
/// assert_eq!(cart.total(), Money::from_minor(3_600));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

fn check_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 || quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::new("quantity", Violation::OutOfRange));
    }
    Ok(())
}

impl Cart {
    /// Rebuild a cart from stored lines, merging duplicates and dropping
    /// empty lines.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::default();
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            cart.merge(line);
        }
        cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consume the cart, yielding its lines.
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line, incrementing the quantity when the product is already
    /// present.
    pub fn add(&mut self, line: CartLine) -> Result<(), ValidationError> {
        check_quantity(line.quantity)?;
        self.merge(line);
        Ok(())
    }

    fn merge(&mut self, line: CartLine) {
        match self
            .lines
            .iter_mut()
            .find(|existing| existing.product_id == line.product_id)
        {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .saturating_add(line.quantity)
                    .min(MAX_LINE_QUANTITY);
            }
            None => {
                let mut line = line;
                line.quantity = line.quantity.min(MAX_LINE_QUANTITY);
                self.lines.push(line);
            }
        }
    }

    /// Remove the product's line. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product_id != product_id);
        self.lines.len() != before
    }

    /// Set the product's quantity; zero or less removes the line.
    ///
    /// Absent products are left untouched.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), ValidationError> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| ValidationError::new("quantity", Violation::OutOfRange))?;
        check_quantity(quantity)?;
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
        {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn line(product_id: ProductId, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id,
            name: format!("product {product_id}"),
            unit_price: Money::from_minor(price),
            quantity,
            unit: Unit::Kg,
        }
    }

    #[fixture]
    fn ids() -> (ProductId, ProductId) {
        (ProductId::random(), ProductId::random())
    }

    #[rstest]
    fn add_merges_by_product(ids: (ProductId, ProductId)) {
        let (a, b) = ids;
        let mut cart = Cart::default();
        cart.add(line(a, 100, 1)).expect("add");
        cart.add(line(b, 250, 2)).expect("add");
        cart.add(line(a, 100, 3)).expect("add");

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.count(), 6);
        assert_eq!(cart.total(), Money::from_minor(900));
    }

    #[rstest]
    fn add_rejects_zero_quantity(ids: (ProductId, ProductId)) {
        let mut cart = Cart::default();
        let err = cart.add(line(ids.0, 100, 0)).expect_err("zero quantity");
        assert_eq!(err.field(), "quantity");
        assert!(cart.is_empty());
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn set_quantity_non_positive_removes(ids: (ProductId, ProductId), #[case] quantity: i64) {
        let mut cart = Cart::default();
        cart.add(line(ids.0, 100, 2)).expect("add");
        cart.set_quantity(&ids.0, quantity).expect("set");
        assert!(cart.is_empty());
    }

    #[rstest]
    fn set_quantity_updates_existing_and_ignores_absent(ids: (ProductId, ProductId)) {
        let (a, b) = ids;
        let mut cart = Cart::default();
        cart.add(line(a, 100, 2)).expect("add");
        cart.set_quantity(&a, 7).expect("set");
        cart.set_quantity(&b, 4).expect("set absent");
        assert_eq!(cart.count(), 7);
        assert_eq!(cart.lines().len(), 1);
    }

    #[rstest]
    fn set_quantity_rejects_oversized(ids: (ProductId, ProductId)) {
        let mut cart = Cart::default();
        cart.add(line(ids.0, 100, 2)).expect("add");
        let err = cart
            .set_quantity(&ids.0, i64::from(MAX_LINE_QUANTITY) + 1)
            .expect_err("too many");
        assert_eq!(err.violation(), Violation::OutOfRange);
    }

    #[rstest]
    fn remove_reports_presence(ids: (ProductId, ProductId)) {
        let (a, b) = ids;
        let mut cart = Cart::default();
        cart.add(line(a, 100, 1)).expect("add");
        assert!(!cart.remove(&b));
        assert!(cart.remove(&a));
        assert!(cart.is_empty());
    }

    #[rstest]
    fn from_lines_restores_invariant(ids: (ProductId, ProductId)) {
        let (a, b) = ids;
        let cart = Cart::from_lines([line(a, 100, 1), line(b, 50, 0), line(a, 100, 2)]);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 3);
    }

    #[rstest]
    fn clear_empties_totals(ids: (ProductId, ProductId)) {
        let mut cart = Cart::default();
        cart.add(line(ids.0, 100, 1)).expect("add");
        cart.clear();
        assert_eq!(cart.total(), Money::ZERO);
        assert_eq!(cart.count(), 0);
    }
}
