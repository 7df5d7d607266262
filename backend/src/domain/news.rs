//! News articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::slug::{slug, slugify};
use super::validation::{self, LONG_TEXT_MAX, SHORT_TEXT_MAX, ValidationError, Violation};
use super::ArticleId;

/// News article.
///
/// `published_at` is stamped the first time the article is published and is
/// kept if it is later withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Build an article from a validated draft.
    pub fn create(id: ArticleId, draft: ArticleDraft, now: DateTime<Utc>) -> Self {
        let mut article = Self {
            id,
            title: String::new(),
            slug: String::new(),
            excerpt: None,
            content: String::new(),
            category: None,
            image_url: None,
            author: None,
            is_published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        article.apply(draft, now);
        article
    }

    /// Replace editable fields, stamping `published_at` on first publish.
    pub fn apply(&mut self, draft: ArticleDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.slug = draft.slug;
        self.excerpt = draft.excerpt;
        self.content = draft.content;
        self.category = draft.category;
        self.image_url = draft.image_url;
        self.author = draft.author;
        self.is_published = draft.is_published;
        if self.is_published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
    }
}

/// Raw admin input for an article.
#[derive(Debug, Clone, Default)]
pub struct ArticleInput<'a> {
    pub title: &'a str,
    pub slug: Option<&'a str>,
    pub excerpt: Option<&'a str>,
    pub content: &'a str,
    pub category: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub author: Option<&'a str>,
    pub is_published: bool,
}

/// Validated article fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    title: String,
    slug: String,
    excerpt: Option<String>,
    content: String,
    category: Option<String>,
    image_url: Option<String>,
    author: Option<String>,
    is_published: bool,
}

impl ArticleDraft {
    /// Validate raw input, deriving the slug from the title when absent.
    pub fn try_from_input(input: ArticleInput<'_>) -> Result<Self, ValidationError> {
        let title = validation::required_text(input.title, "title", SHORT_TEXT_MAX)?;
        let slug = match input.slug.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => slug(raw, "slug")?,
            None => slugify(&title)
                .ok_or_else(|| ValidationError::new("slug", Violation::InvalidFormat))?,
        };
        Ok(Self {
            title,
            slug,
            excerpt: validation::optional_text(input.excerpt, "excerpt", SHORT_TEXT_MAX * 5)?,
            content: validation::required_text(input.content, "content", LONG_TEXT_MAX * 5)?,
            category: validation::optional_text(input.category, "category", SHORT_TEXT_MAX)?,
            image_url: validation::optional_text(input.image_url, "imageUrl", 2_048)?,
            author: validation::optional_text(input.author, "author", SHORT_TEXT_MAX)?,
            is_published: input.is_published,
        })
    }

    /// Slug the article will be stored under.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}
