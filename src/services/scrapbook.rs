//! Scrapbook service: content store -> resolver -> assembler -> renderer ->
//! publisher, for one year at a time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    config::ScrapbookConfig,
    error::{AppError, AppResult},
    models::{ContentItem, Page},
    repository::ContentStore,
    services::{
        assembler::PageAssembler,
        publisher::Publisher,
        renderer::{HtmlRenderer, ScrapbookTemplate},
        resolver::ReferenceResolver,
        storage::ObjectStore,
    },
};

/// Oldest and newest year a scrapbook can be generated for
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Result of a successful generation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerationReport {
    pub year: i32,
    pub page_count: usize,
    /// Local file the scrapbook was written to
    pub path: String,
    /// Whether the object storage copy succeeded
    pub mirrored: bool,
    pub generated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ScrapbookService {
    store: Arc<dyn ContentStore>,
    config: ScrapbookConfig,
    publisher: Publisher,
}

impl ScrapbookService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        config: ScrapbookConfig,
        mirror: Option<Arc<dyn ObjectStore>>,
    ) -> Self {
        let publisher = Publisher::new(config.output_dir.clone(), mirror);
        Self {
            store,
            config,
            publisher,
        }
    }

    /// Content items of a year in generation order. May be empty.
    pub async fn content(&self, year: i32) -> AppResult<Vec<ContentItem>> {
        check_year(year)?;
        let mut items = self
            .store
            .content_items(year)
            .await?
            .into_iter()
            .map(ContentItem::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        items.sort_by_key(ContentItem::order_key);
        Ok(items)
    }

    /// Assemble the page sequence without rendering it
    pub async fn pages(&self, year: i32) -> AppResult<Vec<Page>> {
        let items = self.items_to_render(year).await?;
        self.assemble(year, &items).await
    }

    /// Render the scrapbook without publishing it
    pub async fn render(&self, year: i32) -> AppResult<String> {
        let items = self.items_to_render(year).await?;
        let template = ScrapbookTemplate::load(self.config.template_path.as_deref()).await?;
        let pages = self.assemble(year, &items).await?;
        Ok(self.render_pages(&template, &pages))
    }

    /// Generate and publish the scrapbook for `year`. Nothing is written
    /// unless every reference resolves and the template is usable.
    pub async fn generate(&self, year: i32) -> AppResult<GenerationReport> {
        tracing::info!("Generating scrapbook for {}", year);

        let items = self.items_to_render(year).await?;
        let template = ScrapbookTemplate::load(self.config.template_path.as_deref()).await?;
        let pages = self.assemble(year, &items).await?;
        let html = self.render_pages(&template, &pages);

        let generated_at = Utc::now();
        let outcome = self.publisher.publish(year, &html, generated_at).await?;

        tracing::info!(
            "Scrapbook for {} generated: {} items, {} pages, mirrored={}",
            year,
            items.len(),
            pages.len(),
            outcome.mirrored
        );

        Ok(GenerationReport {
            year,
            page_count: pages.len(),
            path: outcome.path.display().to_string(),
            mirrored: outcome.mirrored,
            generated_at,
        })
    }

    /// The last published scrapbook for `year`
    pub async fn published(&self, year: i32) -> AppResult<String> {
        check_year(year)?;
        self.publisher.read(year).await
    }

    async fn items_to_render(&self, year: i32) -> AppResult<Vec<ContentItem>> {
        let items = self.content(year).await?;
        if items.is_empty() {
            return Err(AppError::NoContent(year));
        }
        Ok(items)
    }

    async fn assemble(&self, year: i32, items: &[ContentItem]) -> AppResult<Vec<Page>> {
        let resolver = ReferenceResolver::new(self.store.as_ref());
        PageAssembler::new(resolver, &self.config.title)
            .assemble(year, items)
            .await
    }

    fn render_pages(&self, template: &ScrapbookTemplate, pages: &[Page]) -> String {
        HtmlRenderer::new(&self.config.asset_base_url).render_document(
            template,
            &self.config.title,
            pages,
        )
    }
}

fn check_year(year: i32) -> AppResult<()> {
    if YEAR_RANGE.contains(&year) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Year {} is outside {}..={}",
            year,
            YEAR_RANGE.start(),
            YEAR_RANGE.end()
        )))
    }
}
