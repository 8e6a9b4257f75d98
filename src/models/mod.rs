//! Data models for the scrapbook

pub mod blog_post;
pub mod content_item;
pub mod event;
pub mod page;
pub mod photo;

// Re-export commonly used types
pub use blog_post::BlogPost;
pub use content_item::{ContentEntry, ContentItem, ContentItemRow, ContentReference, ContentType};
pub use event::Event;
pub use page::{ImageRef, ImageSource, Page, PageContent, PageKind};
pub use photo::Photo;
