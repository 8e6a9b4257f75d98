//! Blog posts repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::blog_post::BlogPost};

#[derive(Clone)]
pub struct BlogPostsRepository {
    pool: Pool<Postgres>,
}

impl BlogPostsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get blog post by ID. A NULL image list reads as empty.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<BlogPost>> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, title, featured_image, COALESCE(images, '{}') AS images
            FROM blog_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }
}
