//! Reference resolution: turns parsed content references into the data the
//! page assembler needs.

use crate::{
    error::{AppError, AppResult},
    models::{ImageRef, ImageSource},
    repository::ContentStore,
};

/// Looks up referenced rows in the content store. One query per call.
pub struct ReferenceResolver<'a> {
    store: &'a dyn ContentStore,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self { store }
    }

    /// Resolve a menu reference to the event id its image is served under
    pub async fn resolve_menu(&self, event_id: i32) -> AppResult<i32> {
        let event = self
            .store
            .event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu event {} not found", event_id)))?;
        Ok(event.id)
    }

    /// Resolve a photo reference. A row without a file name counts as missing.
    pub async fn resolve_photo(&self, photo_id: i32) -> AppResult<ImageRef> {
        let photo = self
            .store
            .photo(photo_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Photo {} not found", photo_id)))?;

        let filename = photo
            .filename
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::NotFound(format!("Photo {} has no file name", photo_id)))?;

        Ok(ImageRef {
            filename,
            caption: photo.caption.filter(|c| !c.trim().is_empty()),
            source: ImageSource::Photo,
        })
    }

    /// Resolve every image of a blog post, featured image first. Posts
    /// without images resolve to an empty list.
    pub async fn resolve_blog_images(&self, post_id: i32) -> AppResult<Vec<ImageRef>> {
        let post = self
            .store
            .blog_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post {} not found", post_id)))?;

        Ok(post
            .image_filenames()
            .into_iter()
            .map(|filename| ImageRef {
                filename,
                caption: Some(post.title.clone()),
                source: ImageSource::Blog,
            })
            .collect())
    }
}
