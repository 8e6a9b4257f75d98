//! HTML rendering of assembled pages and splicing into the flipbook template.
//!
//! The generated document is a single static file viewed without the server,
//! so pages are emitted as plain markup. Image URLs follow the endpoints the
//! web application serves:
//!
//! * menu images: `/api/events/{event_id}/menu-image`
//! * photos: `/api/photos/{filename}/preview`
//! * blog images: `/api/blog-images/{filename}/preview`

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use pulldown_cmark::escape::escape_html as write_escaped_html;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{ImageRef, ImageSource, Page, PageContent},
};

/// Marker replaced by the concatenated page fragments. Must appear exactly once.
pub const PAGES_MARKER: &str = "<!-- scrapbook:pages -->";

/// Placeholder replaced by the scrapbook title wherever it appears
pub const TITLE_PLACEHOLDER: &str = "{{scrapbook_title}}";

/// The one cover title rendered on two lines
pub const SPLIT_COVER_TITLE: &str = "Thanksgiving Memories";

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/scrapbook.html");

/// Everything but RFC 3986 unreserved characters is encoded inside a path
/// segment, so `/`, `?` and `#` in a filename stay part of the segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A validated template shell
#[derive(Debug, Clone)]
pub struct ScrapbookTemplate {
    source: String,
}

impl ScrapbookTemplate {
    /// Validate a template source
    pub fn parse(source: impl Into<String>) -> AppResult<Self> {
        let source = source.into();
        match source.matches(PAGES_MARKER).count() {
            1 => Ok(Self { source }),
            0 => Err(AppError::TemplateMalformed(format!(
                "pages marker `{}` not found",
                PAGES_MARKER
            ))),
            n => Err(AppError::TemplateMalformed(format!(
                "pages marker `{}` appears {} times",
                PAGES_MARKER, n
            ))),
        }
    }

    /// The template compiled into the binary
    pub fn builtin() -> Self {
        Self {
            source: BUILTIN_TEMPLATE.to_string(),
        }
    }

    /// Load the configured template, or the built-in one when no path is set
    pub async fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            None => Ok(Self::builtin()),
            Some(path) => {
                let source = tokio::fs::read_to_string(path).await.map_err(|e| {
                    AppError::TemplateMalformed(format!(
                        "cannot read template {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::parse(source)
            }
        }
    }
}

/// Renders pages to HTML fragments
pub struct HtmlRenderer<'a> {
    asset_base_url: &'a str,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(asset_base_url: &'a str) -> Self {
        Self {
            asset_base_url: asset_base_url.trim_end_matches('/'),
        }
    }

    /// Produce the full document: title placeholders filled in, pages spliced
    /// at the marker.
    pub fn render_document(&self, template: &ScrapbookTemplate, title: &str, pages: &[Page]) -> String {
        let body: String = pages.iter().map(|page| self.render_page(page)).collect();
        template
            .source
            .replace(TITLE_PLACEHOLDER, &escape_html(title))
            .replacen(PAGES_MARKER, &body, 1)
    }

    /// Render one page. Pure: every reference has already been resolved.
    pub fn render_page(&self, page: &Page) -> String {
        let inner = match &page.content {
            PageContent::FrontCover { title, year } => format!(
                concat!(
                    r#"<div class="cover-content"><div class="embossed-text">"#,
                    r#"<h1 class="cover-title">{}</h1><p class="cover-year">{}</p>"#,
                    r#"</div></div>"#
                ),
                cover_title(title),
                year
            ),
            PageContent::TitlePage { text } => format!(
                r#"<div class="page-content centered"><h2 class="page-title">{}</h2></div>"#,
                escape_html(text)
            ),
            PageContent::TextPage { text } => format!(
                r#"<div class="page-content"><p class="journal-text">{}</p></div>"#,
                escape_html(text).replace('\n', "<br>")
            ),
            PageContent::MenuPage { menu_id } => format!(
                r#"<div class="page-content menu"><img class="menu-image" src="{}" alt="Thanksgiving menu"></div>"#,
                self.menu_url(*menu_id)
            ),
            PageContent::PhotoPage { photos } => format!(
                r#"<div class="photo-grid photos-{}">{}</div>"#,
                photos.len(),
                photos.iter().map(|p| self.figure(p)).collect::<String>()
            ),
            PageContent::PagePhotoPage { photo } => format!(
                r#"<div class="page-content full-photo">{}</div>"#,
                self.figure(photo)
            ),
            PageContent::JournalPage { images } => format!(
                concat!(
                    r#"<div class="page-content journal"><h2 class="page-title">Photo Journal</h2>"#,
                    r#"<div class="journal-images">{}</div></div>"#
                ),
                images.iter().map(|i| self.figure(i)).collect::<String>()
            ),
            PageContent::BackCover { text } => format!(
                r#"<div class="cover-content"><div class="embossed-text"><p class="back-cover-text">{}</p></div></div>"#,
                escape_html(text)
            ),
        };

        format!(
            "<div class=\"page {}\" id=\"page-{}\">{}</div>\n",
            page.kind().as_str(),
            escape_html(&page.id),
            inner
        )
    }

    fn menu_url(&self, menu_id: i32) -> String {
        format!("{}/api/events/{}/menu-image", self.asset_base_url, menu_id)
    }

    fn image_url(&self, image: &ImageRef) -> String {
        let endpoint = match image.source {
            ImageSource::Photo => "photos",
            ImageSource::Blog => "blog-images",
        };
        format!(
            "{}/api/{}/{}/preview",
            self.asset_base_url,
            endpoint,
            escape_url_segment(&image.filename)
        )
    }

    fn figure(&self, image: &ImageRef) -> String {
        let caption = image.caption.as_deref().map(escape_html).unwrap_or_default();
        let figcaption = if caption.is_empty() {
            String::new()
        } else {
            format!("<figcaption>{}</figcaption>", caption)
        };
        format!(
            r#"<figure class="photo"><img src="{}" alt="{}" loading="lazy">{}</figure>"#,
            self.image_url(image),
            caption,
            figcaption
        )
    }
}

fn cover_title(title: &str) -> String {
    if title == SPLIT_COVER_TITLE {
        let (first, second) = title.split_once(' ').unwrap_or((title, ""));
        format!(
            r#"<span class="title-line">{}</span><span class="title-line">{}</span>"#,
            escape_html(first),
            escape_html(second)
        )
    } else {
        escape_html(title)
    }
}

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Writing into a String cannot fail
    let _ = write_escaped_html(&mut out, s);
    out
}

/// Percent-encode one URL path segment. The result is also safe inside an
/// HTML attribute.
fn escape_url_segment(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(name: &str, caption: Option<&str>) -> ImageRef {
        ImageRef {
            filename: name.to_string(),
            caption: caption.map(str::to_string),
            source: ImageSource::Photo,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Pie" & cake</b>"#),
            "&lt;b&gt;&quot;Pie&quot; &amp; cake&lt;/b&gt;"
        );
    }

    #[test]
    fn test_filenames_are_url_encoded() {
        let renderer = HtmlRenderer::new("");
        let page = Page::new(
            "page-photo-1",
            PageContent::PagePhotoPage {
                photo: photo("family dinner.jpg", None),
            },
        );
        assert!(renderer
            .render_page(&page)
            .contains(r#"src="/api/photos/family%20dinner.jpg/preview""#));
    }

    #[test]
    fn test_url_delimiters_in_filenames_stay_in_segment() {
        assert_eq!(escape_url_segment("pie#1.jpg"), "pie%231.jpg");
        assert_eq!(escape_url_segment("a/b?c&d\"e.jpg"), "a%2Fb%3Fc%26d%22e.jpg");
        assert_eq!(escape_url_segment("tarte_aux-pommes~2.jpg"), "tarte_aux-pommes~2.jpg");
        assert_eq!(escape_url_segment("crème.jpg"), "cr%C3%A8me.jpg");

        let renderer = HtmlRenderer::new("");
        let page = Page::new(
            "page-photo-1",
            PageContent::PagePhotoPage {
                photo: photo("pie#1.jpg", None),
            },
        );
        assert!(renderer
            .render_page(&page)
            .contains(r#"src="/api/photos/pie%231.jpg/preview""#));
    }

    #[test]
    fn test_cover_title_split() {
        let renderer = HtmlRenderer::new("");
        let page = Page::new(
            "front-cover",
            PageContent::FrontCover {
                title: SPLIT_COVER_TITLE.to_string(),
                year: 2020,
            },
        );
        let html = renderer.render_page(&page);
        assert!(html.contains(r#"<span class="title-line">Thanksgiving</span><span class="title-line">Memories</span>"#));
        assert!(html.contains(r#"<p class="cover-year">2020</p>"#));

        let other = Page::new(
            "front-cover",
            PageContent::FrontCover {
                title: "Family Feast".to_string(),
                year: 2021,
            },
        );
        assert!(renderer
            .render_page(&other)
            .contains(r#"<h1 class="cover-title">Family Feast</h1>"#));
    }

    #[test]
    fn test_image_endpoints() {
        let renderer = HtmlRenderer::new("https://family.example/");
        let menu = renderer.render_page(&Page::new("menu-1", PageContent::MenuPage { menu_id: 15 }));
        assert!(menu.contains(r#"src="https://family.example/api/events/15/menu-image""#));

        let grid = renderer.render_page(&Page::new(
            "photos-1-2",
            PageContent::PhotoPage {
                photos: vec![photo("a.jpg", Some("Grandma")), photo("b.jpg", None)],
            },
        ));
        assert!(grid.starts_with(r#"<div class="page photo-page" id="page-photos-1-2">"#));
        assert!(grid.contains(r#"<div class="photo-grid photos-2">"#));
        assert!(grid.contains(r#"src="https://family.example/api/photos/a.jpg/preview" alt="Grandma""#));
        assert!(grid.contains("<figcaption>Grandma</figcaption>"));
        assert_eq!(grid.matches("<figcaption>").count(), 1);

        let journal = renderer.render_page(&Page::new(
            "journal",
            PageContent::JournalPage {
                images: vec![ImageRef {
                    filename: "pie.jpg".to_string(),
                    caption: None,
                    source: ImageSource::Blog,
                }],
            },
        ));
        assert!(journal.contains(r#"src="https://family.example/api/blog-images/pie.jpg/preview""#));
    }

    #[test]
    fn test_text_is_escaped() {
        let renderer = HtmlRenderer::new("");
        let html = renderer.render_page(&Page::new(
            "text-3",
            PageContent::TextPage {
                text: "Turkey <3\nPie & more".to_string(),
            },
        ));
        assert!(html.contains("Turkey &lt;3<br>Pie &amp; more"));
    }

    #[test]
    fn test_template_requires_single_marker() {
        assert!(ScrapbookTemplate::parse(format!("<div>{}</div>", PAGES_MARKER)).is_ok());
        assert!(matches!(
            ScrapbookTemplate::parse("<div id=\"flipbook\"></div>"),
            Err(AppError::TemplateMalformed(_))
        ));
        assert!(matches!(
            ScrapbookTemplate::parse(format!("{0}{0}", PAGES_MARKER)),
            Err(AppError::TemplateMalformed(_))
        ));
    }

    #[test]
    fn test_builtin_template_is_valid() {
        let builtin = ScrapbookTemplate::builtin();
        assert!(ScrapbookTemplate::parse(builtin.source.clone()).is_ok());
        assert!(builtin.source.contains(TITLE_PLACEHOLDER));
    }

    #[test]
    fn test_render_document_splices_pages() {
        let template = ScrapbookTemplate::parse(format!(
            "<title>{}</title><div id=\"flipbook\">{}</div>",
            TITLE_PLACEHOLDER, PAGES_MARKER
        ))
        .unwrap();
        let pages = vec![
            Page::new("title-1", PageContent::TitlePage { text: "{{scrapbook_title}}".to_string() }),
            Page::new("back-cover", PageContent::BackCover { text: "Bye".to_string() }),
        ];
        let html = HtmlRenderer::new("").render_document(&template, "Fish & Chips", &pages);

        assert!(html.starts_with("<title>Fish &amp; Chips</title><div id=\"flipbook\"><div class=\"page title-page\""));
        assert!(html.ends_with("</div>\n</div>"));
        assert!(html.contains(r#"<h2 class="page-title">{{scrapbook_title}}</h2>"#));
        assert!(!html.contains(PAGES_MARKER));
    }
}
