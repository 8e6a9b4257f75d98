//! Thanksgiving event (one per year, owns the menu)

use serde::Serialize;
use sqlx::FromRow;

/// Event record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub year: i32,
    pub title: Option<String>,
    /// Stored menu image file name
    pub menu_image: Option<String>,
}
