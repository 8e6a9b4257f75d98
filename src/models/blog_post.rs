//! Blog post model

use serde::Serialize;
use sqlx::FromRow;

/// URL prefix the blog editor stores in front of image file names
pub const BLOG_IMAGE_PREFIX: &str = "/api/blog-images/";
/// URL suffix the blog editor stores after image file names
pub const BLOG_IMAGE_SUFFIX: &str = "/preview";

/// Blog post record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub featured_image: Option<String>,
    /// Image URLs in post order
    pub images: Vec<String>,
}

impl BlogPost {
    /// Bare image file names: featured image first, then the body images.
    pub fn image_filenames(&self) -> Vec<String> {
        self.featured_image
            .iter()
            .chain(self.images.iter())
            .map(|url| strip_blog_image_url(url))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Strips `/api/blog-images/` and `/preview` from a stored image URL.
pub fn strip_blog_image_url(url: &str) -> &str {
    let url = url.trim();
    let url = url.strip_prefix(BLOG_IMAGE_PREFIX).unwrap_or(url);
    url.strip_suffix(BLOG_IMAGE_SUFFIX).unwrap_or(url)
}
