//! Photos repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::photo::Photo};

#[derive(Clone)]
pub struct PhotosRepository {
    pool: Pool<Postgres>,
}

impl PhotosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get photo by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Photo>> {
        let photo = sqlx::query_as::<_, Photo>(
            "SELECT id, filename, caption, year FROM photos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(photo)
    }
}
