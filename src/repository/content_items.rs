//! Scrapbook content repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::content_item::ContentItemRow};

#[derive(Clone)]
pub struct ContentItemsRepository {
    pool: Pool<Postgres>,
}

impl ContentItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the content rows of a year in display order (ties by id)
    pub async fn list_by_year(&self, year: i32) -> AppResult<Vec<ContentItemRow>> {
        let rows = sqlx::query_as::<_, ContentItemRow>(
            r#"
            SELECT id, year, content_type, content_reference, display_order,
                   page_break_before, page_break_after
            FROM scrapbook_content
            WHERE year = $1
            ORDER BY display_order ASC, id ASC
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
