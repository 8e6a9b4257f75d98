//! Photo model

use serde::Serialize;
use sqlx::FromRow;

/// Uploaded photo record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Photo {
    pub id: i32,
    /// Stored file name, served through the photo preview endpoint
    pub filename: Option<String>,
    pub caption: Option<String>,
    pub year: Option<i32>,
}
