//! Shared fixtures: an in-memory content store and object stores
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use scrapbook_server::{
    config::ScrapbookConfig,
    error::{AppError, AppResult},
    models::{BlogPost, ContentItemRow, Event, Photo},
    repository::ContentStore,
    services::{scrapbook::ScrapbookService, storage::ObjectStore},
};

/// Content of a single year, plus the rows its references point at
#[derive(Default)]
pub struct MemoryStore {
    pub year: i32,
    pub items: Vec<ContentItemRow>,
    pub events: HashMap<i32, Event>,
    pub photos: HashMap<i32, Photo>,
    pub posts: HashMap<i32, BlogPost>,
    lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// Append an item; ids and display orders follow insertion order
    pub fn item(self, content_type: &str, reference: &str) -> Self {
        let order = (self.items.len() as i32 + 1) * 10;
        self.item_at(order, content_type, reference)
    }

    pub fn item_at(mut self, display_order: i32, content_type: &str, reference: &str) -> Self {
        let id = self.items.len() as i32 + 1;
        self.items.push(ContentItemRow {
            id,
            year: self.year,
            content_type: content_type.to_string(),
            content_reference: reference.to_string(),
            display_order,
            page_break_before: false,
            page_break_after: false,
        });
        self
    }

    pub fn event(mut self, id: i32) -> Self {
        self.events.insert(
            id,
            Event {
                id,
                year: self.year,
                title: Some(format!("Thanksgiving {}", self.year)),
                menu_image: Some(format!("menu-{}.png", id)),
            },
        );
        self
    }

    pub fn photo(mut self, id: i32, filename: Option<&str>) -> Self {
        self.photos.insert(
            id,
            Photo {
                id,
                filename: filename.map(str::to_string),
                caption: Some(format!("Photo {}", id)),
                year: Some(self.year),
            },
        );
        self
    }

    pub fn photos(self, ids: std::ops::RangeInclusive<i32>) -> Self {
        ids.fold(self, |store, id| {
            let name = format!("photo-{}.jpg", id);
            store.photo(id, Some(&name))
        })
    }

    pub fn post(mut self, id: i32, images: &[&str]) -> Self {
        self.posts.insert(
            id,
            BlogPost {
                id,
                title: format!("Post {}", id),
                featured_image: None,
                images: images
                    .iter()
                    .map(|name| format!("/api/blog-images/{}/preview", name))
                    .collect(),
            },
        );
        self
    }

    /// Number of event, photo and blog lookups served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn content_items(&self, year: i32) -> AppResult<Vec<ContentItemRow>> {
        // Deliberately unordered; the service must sort
        let mut rows: Vec<ContentItemRow> = self
            .items
            .iter()
            .filter(|row| row.year == year)
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }

    async fn event(&self, id: i32) -> AppResult<Option<Event>> {
        self.count();
        Ok(self.events.get(&id).cloned())
    }

    async fn photo(&self, id: i32) -> AppResult<Option<Photo>> {
        self.count();
        Ok(self.photos.get(&id).cloned())
    }

    async fn blog_post(&self, id: i32) -> AppResult<Option<BlogPost>> {
        self.count();
        Ok(self.posts.get(&id).cloned())
    }
}

/// Object store that always fails
pub struct UnreachableStore;

#[async_trait]
impl ObjectStore for UnreachableStore {
    async fn put(&self, key: &str, _: Vec<u8>, _: &str, _: &[(&str, String)]) -> AppResult<()> {
        Err(AppError::Publish(format!("bucket unreachable for {}", key)))
    }
}

/// Object store that keeps every upload in memory
#[derive(Default)]
pub struct MemoryObjectStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, body: Vec<u8>, _: &str, _: &[(&str, String)]) -> AppResult<()> {
        self.objects.lock().unwrap().insert(key.to_string(), body);
        Ok(())
    }
}

pub fn scrapbook_config(output_dir: &Path) -> ScrapbookConfig {
    ScrapbookConfig {
        output_dir: output_dir.to_path_buf(),
        template_path: None,
        title: "Thanksgiving Memories".to_string(),
        asset_base_url: String::new(),
    }
}

pub fn service(
    store: Arc<MemoryStore>,
    output_dir: &Path,
    mirror: Option<Arc<dyn ObjectStore>>,
) -> ScrapbookService {
    ScrapbookService::new(store, scrapbook_config(output_dir), mirror)
}
