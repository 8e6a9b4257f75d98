//! Scrapbook content items (ordering metadata per year)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Raw content row as written by the scrapbook editor
#[derive(Debug, Clone, FromRow)]
pub struct ContentItemRow {
    pub id: i32,
    pub year: i32,
    pub content_type: String,
    pub content_reference: String,
    pub display_order: i32,
    pub page_break_before: bool,
    pub page_break_after: bool,
}

/// Kind of content an item contributes to the scrapbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Title,
    TextParagraph,
    Menu,
    Photo,
    PagePhoto,
    Blog,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Title => "title",
            ContentType::TextParagraph => "text-paragraph",
            ContentType::Menu => "menu",
            ContentType::Photo => "photo",
            ContentType::PagePhoto => "page-photo",
            ContentType::Blog => "blog",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "title" => Ok(ContentType::Title),
            "text-paragraph" => Ok(ContentType::TextParagraph),
            "menu" => Ok(ContentType::Menu),
            "photo" => Ok(ContentType::Photo),
            "page-photo" => Ok(ContentType::PagePhoto),
            "blog" => Ok(ContentType::Blog),
            other => Err(AppError::InvalidReference(format!(
                "unknown content type `{}`",
                other
            ))),
        }
    }
}

/// A parsed `<kind>_<id>` pointer into the content store.
///
/// `page_photo_<id>` and `photo_<id>` both address a row of the photos
/// table, so they parse to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentReference {
    Menu(i32),
    Photo(i32),
    Blog(i32),
}

impl FromStr for ContentReference {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        // `page_photo_` is checked before `photo_`
        let (variant, digits): (fn(i32) -> ContentReference, &str) =
            if let Some(rest) = s.strip_prefix("page_photo_") {
                (ContentReference::Photo, rest)
            } else if let Some(rest) = s.strip_prefix("photo_") {
                (ContentReference::Photo, rest)
            } else if let Some(rest) = s.strip_prefix("menu_") {
                (ContentReference::Menu, rest)
            } else if let Some(rest) = s.strip_prefix("blog_") {
                (ContentReference::Blog, rest)
            } else {
                return Err(AppError::InvalidReference(format!(
                    "unrecognized reference `{}`",
                    s
                )));
            };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::InvalidReference(format!(
                "non-numeric id in reference `{}`",
                s
            )));
        }
        let id = digits.parse::<i32>().map_err(|_| {
            AppError::InvalidReference(format!("id out of range in reference `{}`", s))
        })?;

        Ok(variant(id))
    }
}

/// What an item renders, with its reference already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEntry {
    Title(String),
    TextParagraph(String),
    /// Event id whose menu image is shown
    Menu(i32),
    Photo(i32),
    PagePhoto(i32),
    Blog(i32),
}

impl ContentEntry {
    /// Builds the entry for a content type from its raw reference field.
    /// Title and paragraph items carry their display text in that field.
    pub fn parse(content_type: ContentType, reference: &str) -> AppResult<Self> {
        let mismatch = || {
            AppError::InvalidReference(format!(
                "`{}` is not a valid {} reference",
                reference, content_type
            ))
        };

        match content_type {
            ContentType::Title => Ok(ContentEntry::Title(reference.to_string())),
            ContentType::TextParagraph => Ok(ContentEntry::TextParagraph(reference.to_string())),
            ContentType::Menu => match reference.parse()? {
                ContentReference::Menu(id) => Ok(ContentEntry::Menu(id)),
                _ => Err(mismatch()),
            },
            ContentType::Photo => match reference.parse()? {
                ContentReference::Photo(id) => Ok(ContentEntry::Photo(id)),
                _ => Err(mismatch()),
            },
            ContentType::PagePhoto => match reference.parse()? {
                ContentReference::Photo(id) => Ok(ContentEntry::PagePhoto(id)),
                _ => Err(mismatch()),
            },
            ContentType::Blog => match reference.parse()? {
                ContentReference::Blog(id) => Ok(ContentEntry::Blog(id)),
                _ => Err(mismatch()),
            },
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            ContentEntry::Title(_) => ContentType::Title,
            ContentEntry::TextParagraph(_) => ContentType::TextParagraph,
            ContentEntry::Menu(_) => ContentType::Menu,
            ContentEntry::Photo(_) => ContentType::Photo,
            ContentEntry::PagePhoto(_) => ContentType::PagePhoto,
            ContentEntry::Blog(_) => ContentType::Blog,
        }
    }

    /// The reference field in its canonical stored form
    pub fn reference(&self) -> String {
        match self {
            ContentEntry::Title(text) | ContentEntry::TextParagraph(text) => text.clone(),
            ContentEntry::Menu(id) => format!("menu_{}", id),
            ContentEntry::Photo(id) => format!("photo_{}", id),
            ContentEntry::PagePhoto(id) => format!("page_photo_{}", id),
            ContentEntry::Blog(id) => format!("blog_{}", id),
        }
    }
}

/// Content item with its entry parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub id: i32,
    pub year: i32,
    pub entry: ContentEntry,
    pub display_order: i32,
    /// Stored but not acted on during generation
    pub page_break_before: bool,
    pub page_break_after: bool,
}

impl ContentItem {
    /// Sort key: display order, ties broken by item id
    pub fn order_key(&self) -> (i32, i32) {
        (self.display_order, self.id)
    }
}

impl TryFrom<ContentItemRow> for ContentItem {
    type Error = AppError;

    fn try_from(row: ContentItemRow) -> AppResult<Self> {
        let annotate = |e: AppError| match e {
            AppError::InvalidReference(msg) => {
                AppError::InvalidReference(format!("content item {}: {}", row.id, msg))
            }
            other => other,
        };

        let content_type: ContentType = row.content_type.parse().map_err(annotate)?;
        let entry = ContentEntry::parse(content_type, &row.content_reference).map_err(annotate)?;

        Ok(ContentItem {
            id: row.id,
            year: row.year,
            entry,
            display_order: row.display_order,
            page_break_before: row.page_break_before,
            page_break_after: row.page_break_after,
        })
    }
}

/// Content item as listed by the admin API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContentItemResponse {
    pub id: i32,
    pub year: i32,
    pub content_type: ContentType,
    pub content_reference: String,
    pub display_order: i32,
    pub page_break_before: bool,
    pub page_break_after: bool,
}

impl From<&ContentItem> for ContentItemResponse {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id,
            year: item.year,
            content_type: item.entry.content_type(),
            content_reference: item.entry.reference(),
            display_order: item.display_order,
            page_break_before: item.page_break_before,
            page_break_after: item.page_break_after,
        }
    }
}
