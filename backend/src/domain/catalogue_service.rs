//! Catalogue use-cases: browsing, product administration, and reviews.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::catalogue::{Category, Product, ProductDraft, ProductFilter, Review, ReviewDraft};
use crate::domain::ports::CatalogueRepository;
use crate::domain::{Error, ProductId, UserId};

fn missing(id: &ProductId) -> Error {
    Error::not_found(format!("product {id} not found"))
}

/// Catalogue service over the catalogue port.
#[derive(Clone)]
pub struct CatalogueService {
    catalogue: Arc<dyn CatalogueRepository>,
    clock: Arc<dyn Clock>,
}

impl CatalogueService {
    /// Create the service.
    pub fn new(catalogue: Arc<dyn CatalogueRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { catalogue, clock }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.catalogue.list_categories().await?)
    }

    pub async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, Error> {
        Ok(self.catalogue.list_products(filter).await?)
    }

    /// A product visible in the storefront. Inactive products are missing.
    pub async fn active_product(&self, id: &ProductId) -> Result<Product, Error> {
        self.catalogue
            .find_product(id)
            .await?
            .filter(|product| product.is_active)
            .ok_or_else(|| missing(id))
    }

    /// Any product, active or not.
    pub async fn product(&self, id: &ProductId) -> Result<Product, Error> {
        self.catalogue.find_product(id).await?.ok_or_else(|| missing(id))
    }

    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, Error> {
        let product = Product::create(ProductId::random(), draft, self.clock.utc());
        self.catalogue.insert_product(&product).await?;
        info!(product_id = %product.id, slug = %product.slug, "product created");
        Ok(product)
    }

    pub async fn update_product(&self, id: &ProductId, draft: ProductDraft) -> Result<Product, Error> {
        let mut product = self.product(id).await?;
        product.apply(draft, self.clock.utc());
        self.catalogue.update_product(&product).await?;
        info!(product_id = %product.id, "product updated");
        Ok(product)
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<(), Error> {
        if !self.catalogue.delete_product(id).await? {
            return Err(missing(id));
        }
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Reviews of an active product, newest first.
    pub async fn reviews(&self, product_id: &ProductId) -> Result<Vec<Review>, Error> {
        self.active_product(product_id).await?;
        Ok(self.catalogue.list_reviews(product_id).await?)
    }

    /// Post or replace the user's review of an active product.
    pub async fn submit_review(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        draft: ReviewDraft,
    ) -> Result<Review, Error> {
        self.active_product(product_id).await?;
        let review = draft.into_review(*product_id, user_id.clone(), self.clock.utc());
        Ok(self.catalogue.upsert_review(&review).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::catalogue::ProductInput;
    use crate::domain::ports::{MockCatalogueRepository, RepositoryError};
    use chrono::Utc;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft::try_from_input(ProductInput {
            name,
            price_minor: 8_450,
            unit: "kg",
            is_active: true,
            ..ProductInput::default()
        })
        .expect("valid draft")
    }

    fn service(catalogue: MockCatalogueRepository) -> CatalogueService {
        CatalogueService::new(Arc::new(catalogue), Arc::new(DefaultClock))
    }

    #[rstest]
    #[tokio::test]
    async fn create_product_reports_slug_conflict() {
        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_insert_product()
            .return_once(|_| Err(RepositoryError::conflict("slug taken")));

        let error = service(catalogue)
            .create_product(draft("SS 304 Sheet"))
            .await
            .expect_err("duplicate slug");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_creation_time() {
        let existing = Product::create(ProductId::random(), draft("SS 304 Sheet"), Utc::now());
        let id = existing.id;
        let created_at = existing.created_at;
        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_find_product()
            .return_once(move |_| Ok(Some(existing)));
        catalogue
            .expect_update_product()
            .withf(|product| product.slug == "ss-316-sheet")
            .times(1)
            .return_once(|_| Ok(()));

        let updated = service(catalogue)
            .update_product(&id, draft("SS 316 Sheet"))
            .await
            .expect("update succeeds");
        assert_eq!(updated.created_at, created_at);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_missing_product_is_not_found() {
        let mut catalogue = MockCatalogueRepository::new();
        catalogue.expect_delete_product().return_once(|_| Ok(false));

        let error = service(catalogue)
            .delete_product(&ProductId::random())
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn review_requires_active_product() {
        let mut inactive = Product::create(ProductId::random(), draft("Brass Rod"), Utc::now());
        inactive.is_active = false;
        let id = inactive.id;
        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_find_product()
            .return_once(move |_| Ok(Some(inactive)));
        catalogue.expect_upsert_review().never();

        let review = ReviewDraft::try_new(4, None, Some("Clean cut edges"), None).expect("draft");
        let error = service(catalogue)
            .submit_review(&UserId::random(), &id, review)
            .await
            .expect_err("inactive product");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
