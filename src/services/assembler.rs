//! Page assembly: walks a year's ordered content items and produces the
//! flipbook page sequence.
//!
//! Two grouping rules apply during the walk:
//!
//! * photos are batched into grids of [`PHOTOS_PER_PAGE`]. A grid is emitted
//!   at the position of the photo that fills it; a trailing partial grid is
//!   emitted once the walk ends.
//! * blog items are never emitted in place. Their images are concatenated,
//!   in item order, into a single journal page placed just before the back
//!   cover.
//!
//! Every other item becomes exactly one page at its own position. The front
//! and back covers are always present.

use crate::{
    error::AppResult,
    models::{ContentEntry, ContentItem, ImageRef, Page, PageContent},
    services::resolver::ReferenceResolver,
};

/// Maximum number of photos on one grid page
pub const PHOTOS_PER_PAGE: usize = 6;

/// Closing line printed on the back cover
pub const BACK_COVER_TEXT: &str = "Until next Thanksgiving";

pub struct PageAssembler<'a> {
    resolver: ReferenceResolver<'a>,
    title: &'a str,
}

/// Photos waiting to fill a grid, with the item ids they came from
#[derive(Default)]
struct PhotoBatch {
    item_ids: Vec<i32>,
    photos: Vec<ImageRef>,
}

impl PhotoBatch {
    fn push(&mut self, item_id: i32, photo: ImageRef) {
        self.item_ids.push(item_id);
        self.photos.push(photo);
    }

    fn is_full(&self) -> bool {
        self.photos.len() >= PHOTOS_PER_PAGE
    }

    /// Turns the pending photos into a grid page, leaving the batch empty
    fn take_page(&mut self) -> Option<Page> {
        let (first, last) = match (self.item_ids.first(), self.item_ids.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return None,
        };
        self.item_ids.clear();
        Some(Page::new(
            format!("photos-{}-{}", first, last),
            PageContent::PhotoPage {
                photos: std::mem::take(&mut self.photos),
            },
        ))
    }
}

impl<'a> PageAssembler<'a> {
    pub fn new(resolver: ReferenceResolver<'a>, title: &'a str) -> Self {
        Self { resolver, title }
    }

    /// Assemble the pages for `year`. `items` must already be in display
    /// order. The first reference that fails to resolve aborts assembly.
    pub async fn assemble(&self, year: i32, items: &[ContentItem]) -> AppResult<Vec<Page>> {
        let mut pages = vec![Page::new(
            "front-cover",
            PageContent::FrontCover {
                title: self.title.to_string(),
                year,
            },
        )];
        let mut pending_photos = PhotoBatch::default();
        let mut journal_images: Vec<ImageRef> = Vec::new();
        let mut has_journal = false;

        for item in items {
            tracing::debug!(
                "Assembling item {} ({}) at order {}",
                item.id,
                item.entry.content_type(),
                item.display_order
            );

            match &item.entry {
                ContentEntry::Title(text) => pages.push(Page::new(
                    format!("title-{}", item.id),
                    PageContent::TitlePage { text: text.clone() },
                )),
                ContentEntry::TextParagraph(text) => pages.push(Page::new(
                    format!("text-{}", item.id),
                    PageContent::TextPage { text: text.clone() },
                )),
                ContentEntry::Menu(event_id) => {
                    let menu_id = self.resolver.resolve_menu(*event_id).await?;
                    pages.push(Page::new(
                        format!("menu-{}", item.id),
                        PageContent::MenuPage { menu_id },
                    ));
                }
                ContentEntry::PagePhoto(photo_id) => {
                    let photo = self.resolver.resolve_photo(*photo_id).await?;
                    pages.push(Page::new(
                        format!("page-photo-{}", item.id),
                        PageContent::PagePhotoPage { photo },
                    ));
                }
                ContentEntry::Photo(photo_id) => {
                    let photo = self.resolver.resolve_photo(*photo_id).await?;
                    pending_photos.push(item.id, photo);
                    if pending_photos.is_full() {
                        pages.extend(pending_photos.take_page());
                    }
                }
                ContentEntry::Blog(post_id) => {
                    let images = self.resolver.resolve_blog_images(*post_id).await?;
                    journal_images.extend(images);
                    has_journal = true;
                }
            }
        }

        pages.extend(pending_photos.take_page());

        if has_journal {
            pages.push(Page::new(
                "journal",
                PageContent::JournalPage {
                    images: journal_images,
                },
            ));
        }

        pages.push(Page::new(
            "back-cover",
            PageContent::BackCover {
                text: BACK_COVER_TEXT.to_string(),
            },
        ));

        Ok(pages)
    }
}
