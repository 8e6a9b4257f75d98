//! Generates the scrapbook of one year from the command line.
//!
//! Exits 0 on success; on any resolution, template or write failure the
//! error is printed and the exit code is 1.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use scrapbook_server::{
    config::AppConfig, init_tracing, repository::Repository, services::Services,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Year whose scrapbook is generated
    #[arg(short, long)]
    year: i32,

    /// Write `<year>.html` here instead of the configured directory
    #[arg(short, long, env = "SCRAPBOOK_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Skip the object storage copy
    #[arg(long)]
    no_mirror: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    if let Err(e) = run(cli).await {
        eprintln!("Error generating scrapbook: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;
    init_tracing(&config.logging);

    if let Some(output_dir) = cli.output_dir {
        config.scrapbook.output_dir = output_dir;
    }
    if cli.no_mirror {
        config.storage.enabled = false;
    }

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    let services = Services::new(
        Arc::new(Repository::new(pool)),
        config.scrapbook.clone(),
        &config.storage,
    )?;

    let report = services.scrapbook.generate(cli.year).await?;
    println!(
        "Generated scrapbook {}: {} pages -> {}{}",
        report.year,
        report.page_count,
        report.path,
        if report.mirrored { " (mirrored)" } else { "" }
    );
    Ok(())
}
