//! Cart use-cases.
//!
//! Every mutation loads the user's whole cart, applies the change, and saves
//! the cart back. Product details on new lines come from the catalogue, never
//! from the client.

use std::sync::Arc;

use crate::domain::ports::{CartRepository, CatalogueRepository};
use crate::domain::{Cart, CartLine, Error, ProductId, UserId};

/// Cart service over the cart and catalogue ports.
#[derive(Clone)]
pub struct CartService {
    carts: Arc<dyn CartRepository>,
    catalogue: Arc<dyn CatalogueRepository>,
}

impl CartService {
    /// Create a service over the given repositories.
    pub fn new(carts: Arc<dyn CartRepository>, catalogue: Arc<dyn CatalogueRepository>) -> Self {
        Self { carts, catalogue }
    }

    /// The user's current cart.
    pub async fn view(&self, user_id: &UserId) -> Result<Cart, Error> {
        Ok(self.carts.load(user_id).await?)
    }

    /// Add `quantity` of an active product.
    pub async fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, Error> {
        let product = self
            .catalogue
            .find_product(product_id)
            .await?
            .filter(|product| product.is_active)
            .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))?;

        let mut cart = self.carts.load(user_id).await?;
        cart.add(CartLine::for_product(&product, quantity))?;
        self.save(user_id, cart).await
    }

    /// Set a line's quantity; zero or less removes it.
    pub async fn set_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<Cart, Error> {
        let mut cart = self.carts.load(user_id).await?;
        cart.set_quantity(product_id, quantity)?;
        self.save(user_id, cart).await
    }

    /// Remove a product's line if present.
    pub async fn remove_item(&self, user_id: &UserId, product_id: &ProductId) -> Result<Cart, Error> {
        let mut cart = self.carts.load(user_id).await?;
        if !cart.remove(product_id) {
            return Ok(cart);
        }
        self.save(user_id, cart).await
    }

    /// Empty the cart.
    pub async fn clear(&self, user_id: &UserId) -> Result<Cart, Error> {
        self.save(user_id, Cart::default()).await
    }

    async fn save(&self, user_id: &UserId, cart: Cart) -> Result<Cart, Error> {
        self.carts.save(user_id, &cart).await?;
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalogue::{Product, ProductDraft, ProductInput};
    use crate::domain::ports::{MockCartRepository, MockCatalogueRepository};
    use crate::domain::{ErrorCode, Money};
    use chrono::Utc;
    use rstest::rstest;

    fn product(active: bool) -> Product {
        let draft = ProductDraft::try_from_input(ProductInput {
            name: "TMT Bar Fe500D",
            price_minor: 6_200,
            unit: "kg",
            is_active: active,
            ..ProductInput::default()
        })
        .expect("valid product");
        Product::create(ProductId::random(), draft, Utc::now())
    }

    fn service(carts: MockCartRepository, catalogue: MockCatalogueRepository) -> CartService {
        CartService::new(Arc::new(carts), Arc::new(catalogue))
    }

    #[rstest]
    #[tokio::test]
    async fn add_item_uses_catalogue_price_and_saves() {
        let product = product(true);
        let product_id = product.id;
        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_find_product()
            .times(1)
            .return_once(move |_| Ok(Some(product)));
        let mut carts = MockCartRepository::new();
        carts
            .expect_load()
            .times(1)
            .return_once(|_| Ok(Cart::default()));
        carts
            .expect_save()
            .withf(|_, cart| cart.count() == 3)
            .times(1)
            .return_once(|_, _| Ok(()));

        let cart = service(carts, catalogue)
            .add_item(&UserId::random(), &product_id, 3)
            .await
            .expect("add succeeds");
        assert_eq!(cart.total(), Money::from_minor(18_600));
    }

    #[rstest]
    #[tokio::test]
    async fn add_item_rejects_inactive_product() {
        let product = product(false);
        let product_id = product.id;
        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_find_product()
            .return_once(move |_| Ok(Some(product)));
        let mut carts = MockCartRepository::new();
        carts.expect_save().never();

        let error = service(carts, catalogue)
            .add_item(&UserId::random(), &product_id, 1)
            .await
            .expect_err("inactive product");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn add_item_rejects_zero_quantity_without_saving() {
        let product = product(true);
        let product_id = product.id;
        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_find_product()
            .return_once(move |_| Ok(Some(product)));
        let mut carts = MockCartRepository::new();
        carts.expect_load().return_once(|_| Ok(Cart::default()));
        carts.expect_save().never();

        let error = service(carts, catalogue)
            .add_item(&UserId::random(), &product_id, 0)
            .await
            .expect_err("zero quantity");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn remove_absent_item_skips_save() {
        let mut carts = MockCartRepository::new();
        carts.expect_load().return_once(|_| Ok(Cart::default()));
        carts.expect_save().never();

        let cart = service(carts, MockCatalogueRepository::new())
            .remove_item(&UserId::random(), &ProductId::random())
            .await
            .expect("remove succeeds");
        assert!(cart.is_empty());
    }
}
