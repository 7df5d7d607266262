//! News publishing.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::news::{Article, ArticleDraft};
use crate::domain::ports::NewsRepository;
use crate::domain::{ArticleId, Error};

fn missing(id: &ArticleId) -> Error {
    Error::not_found(format!("article {id} not found"))
}

/// News service over the news port.
#[derive(Clone)]
pub struct NewsService {
    news: Arc<dyn NewsRepository>,
    clock: Arc<dyn Clock>,
}

impl NewsService {
    /// Create the service.
    pub fn new(news: Arc<dyn NewsRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { news, clock }
    }

    /// Published articles for the public site.
    pub async fn published(&self) -> Result<Vec<Article>, Error> {
        Ok(self.news.list(true).await?)
    }

    /// Every article, drafts included.
    pub async fn all(&self) -> Result<Vec<Article>, Error> {
        Ok(self.news.list(false).await?)
    }

    /// A published article by slug. Drafts are reported as missing.
    pub async fn published_by_slug(&self, slug: &str) -> Result<Article, Error> {
        self.news
            .find_by_slug(slug)
            .await?
            .filter(|article| article.is_published)
            .ok_or_else(|| Error::not_found(format!("article {slug} not found")))
    }

    pub async fn create(&self, draft: ArticleDraft) -> Result<Article, Error> {
        self.ensure_slug_free(draft.slug(), None).await?;
        let article = Article::create(ArticleId::random(), draft, self.clock.utc());
        self.news.insert(&article).await?;
        info!(article_id = %article.id, slug = %article.slug, "article created");
        Ok(article)
    }

    pub async fn update(&self, id: &ArticleId, draft: ArticleDraft) -> Result<Article, Error> {
        let mut article = self.news.find(id).await?.ok_or_else(|| missing(id))?;
        self.ensure_slug_free(draft.slug(), Some(id)).await?;
        article.apply(draft, self.clock.utc());
        self.news.update(&article).await?;
        Ok(article)
    }

    pub async fn delete(&self, id: &ArticleId) -> Result<(), Error> {
        if !self.news.delete(id).await? {
            return Err(missing(id));
        }
        info!(article_id = %id, "article deleted");
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str, owner: Option<&ArticleId>) -> Result<(), Error> {
        match self.news.find_by_slug(slug).await? {
            Some(existing) if Some(&existing.id) != owner => {
                Err(Error::conflict(format!("slug {slug} is already in use")))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::news::ArticleInput;
    use crate::domain::ports::MockNewsRepository;
    use chrono::Utc;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn draft(title: &str, published: bool) -> ArticleDraft {
        ArticleDraft::try_from_input(ArticleInput {
            title,
            content: "Prices for HR coil eased this week.",
            is_published: published,
            ..ArticleInput::default()
        })
        .expect("valid draft")
    }

    fn service(news: MockNewsRepository) -> NewsService {
        NewsService::new(Arc::new(news), Arc::new(DefaultClock))
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_taken_slug() {
        let taken = Article::create(ArticleId::random(), draft("Market Update", true), Utc::now());
        let mut news = MockNewsRepository::new();
        news.expect_find_by_slug().return_once(move |_| Ok(Some(taken)));
        news.expect_insert().never();

        let error = service(news)
            .create(draft("Market Update", false))
            .await
            .expect_err("slug taken");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn update_may_keep_its_own_slug() {
        let existing = Article::create(ArticleId::random(), draft("Market Update", false), Utc::now());
        let id = existing.id;
        let same = existing.clone();
        let mut news = MockNewsRepository::new();
        news.expect_find().return_once(move |_| Ok(Some(existing)));
        news.expect_find_by_slug().return_once(move |_| Ok(Some(same)));
        news.expect_update().times(1).return_once(|_| Ok(()));

        let article = service(news)
            .update(&id, draft("Market Update", true))
            .await
            .expect("update succeeds");
        assert!(article.published_at.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn drafts_are_hidden_by_slug() {
        let unpublished = Article::create(ArticleId::random(), draft("Plant Expansion", false), Utc::now());
        let mut news = MockNewsRepository::new();
        news.expect_find_by_slug()
            .return_once(move |_| Ok(Some(unpublished)));

        let error = service(news)
            .published_by_slug("plant-expansion")
            .await
            .expect_err("draft");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
