//! Flipbook pages. Built fresh for every generation and never stored.

use serde::Serialize;
use utoipa::ToSchema;

/// Page type as exposed to the viewer and the admin API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    FrontCover,
    TitlePage,
    TextPage,
    MenuPage,
    PhotoPage,
    PagePhotoPage,
    JournalPage,
    BackCover,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::FrontCover => "front-cover",
            PageKind::TitlePage => "title-page",
            PageKind::TextPage => "text-page",
            PageKind::MenuPage => "menu-page",
            PageKind::PhotoPage => "photo-page",
            PageKind::PagePhotoPage => "page-photo-page",
            PageKind::JournalPage => "journal-page",
            PageKind::BackCover => "back-cover",
        }
    }
}

/// Endpoint family an image is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Photo,
    Blog,
}

/// A resolved image, ready to be turned into an `<img>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ImageRef {
    pub filename: String,
    pub caption: Option<String>,
    pub source: ImageSource,
}

/// Per-kind page payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PageContent {
    FrontCover { title: String, year: i32 },
    TitlePage { text: String },
    TextPage { text: String },
    MenuPage { menu_id: i32 },
    PhotoPage { photos: Vec<ImageRef> },
    PagePhotoPage { photo: ImageRef },
    JournalPage { images: Vec<ImageRef> },
    BackCover { text: String },
}

/// One unit of the flipbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Derived from the source item id(s); unique within one document
    pub id: String,
    #[serde(flatten)]
    pub content: PageContent,
}

impl Page {
    pub fn new(id: impl Into<String>, content: PageContent) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    pub fn kind(&self) -> PageKind {
        match &self.content {
            PageContent::FrontCover { .. } => PageKind::FrontCover,
            PageContent::TitlePage { .. } => PageKind::TitlePage,
            PageContent::TextPage { .. } => PageKind::TextPage,
            PageContent::MenuPage { .. } => PageKind::MenuPage,
            PageContent::PhotoPage { .. } => PageKind::PhotoPage,
            PageContent::PagePhotoPage { .. } => PageKind::PagePhotoPage,
            PageContent::JournalPage { .. } => PageKind::JournalPage,
            PageContent::BackCover { .. } => PageKind::BackCover,
        }
    }

    /// Images shown on the page, in display order
    pub fn images(&self) -> &[ImageRef] {
        match &self.content {
            PageContent::PhotoPage { photos } => photos,
            PageContent::JournalPage { images } => images,
            PageContent::PagePhotoPage { photo } => std::slice::from_ref(photo),
            _ => &[],
        }
    }
}
