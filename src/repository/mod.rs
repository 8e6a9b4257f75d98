//! Repository layer for the content store

pub mod blog_posts;
pub mod content_items;
pub mod events;
pub mod photos;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{BlogPost, ContentItemRow, Event, Photo},
};

/// Read-only view of the content the scrapbook is generated from.
///
/// Lookups return `Ok(None)` for missing rows; deciding whether that is an
/// error belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Content rows of a year, ordered by display order then id
    async fn content_items(&self, year: i32) -> AppResult<Vec<ContentItemRow>>;

    async fn event(&self, id: i32) -> AppResult<Option<Event>>;

    async fn photo(&self, id: i32) -> AppResult<Option<Photo>>;

    async fn blog_post(&self, id: i32) -> AppResult<Option<BlogPost>>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub content_items: content_items::ContentItemsRepository,
    pub events: events::EventsRepository,
    pub photos: photos::PhotosRepository,
    pub blog_posts: blog_posts::BlogPostsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            content_items: content_items::ContentItemsRepository::new(pool.clone()),
            events: events::EventsRepository::new(pool.clone()),
            photos: photos::PhotosRepository::new(pool.clone()),
            blog_posts: blog_posts::BlogPostsRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl ContentStore for Repository {
    async fn content_items(&self, year: i32) -> AppResult<Vec<ContentItemRow>> {
        self.content_items.list_by_year(year).await
    }

    async fn event(&self, id: i32) -> AppResult<Option<Event>> {
        self.events.find_by_id(id).await
    }

    async fn photo(&self, id: i32) -> AppResult<Option<Photo>> {
        self.photos.find_by_id(id).await
    }

    async fn blog_post(&self, id: i32) -> AppResult<Option<BlogPost>> {
        self.blog_posts.find_by_id(id).await
    }
}
