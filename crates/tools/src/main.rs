use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::{BookId, Catalog, DEFAULT_BASE_URL, Endpoints};
use layers::MapConfig;
use navigation::book_chapter_valid;
use tools::{HttpSource, chapter_report, route_report, volume_rows};

/// Inspect the scripture catalog and chapter geotags from the command line.
#[derive(Debug, Parser)]
#[command(name = "scripnav", version)]
struct Cli {
    /// Content service root.
    #[arg(long, global = true, env = "SCRIPNAV_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a location hash the way the page would.
    Route { hash: String },
    /// Fetch a chapter and report its places and map view.
    Chapter {
        book: BookId,
        chapter: u32,
        #[arg(long)]
        verses: Option<String>,
        #[arg(long)]
        jst: bool,
    },
    /// List volumes with their book ranges.
    Volumes,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Cli::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn real_main(cli: Cli) -> Result<(), String> {
    let source = HttpSource::new(Endpoints::new(cli.base_url));
    info!("content service: {}", source.endpoints().base_url());
    let catalog = catalog::load(&source).await.map_err(|e| e.to_string())?;
    info!(
        "catalog loaded: {} volumes, {} books",
        catalog.volumes().len(),
        catalog.book_count()
    );

    match cli.command {
        Command::Route { hash } => {
            print_json(&route_report(&catalog, source.endpoints(), &hash))
        }
        Command::Chapter {
            book,
            chapter,
            verses,
            jst,
        } => cmd_chapter(&source, &catalog, book, chapter, verses.as_deref(), jst).await,
        Command::Volumes => print_json(&volume_rows(&catalog)),
    }
}

async fn cmd_chapter(
    source: &HttpSource,
    catalog: &Catalog,
    book: BookId,
    chapter: u32,
    verses: Option<&str>,
    jst: bool,
) -> Result<(), String> {
    if !book_chapter_valid(catalog, book, chapter) {
        return Err(format!("no chapter {chapter} in book {book}"));
    }

    let url = source.endpoints().chapter_url(book, chapter, verses, jst);
    let html = source.fetch_text(&url).await.map_err(|e| e.to_string())?;
    info!("fetched {} bytes from {url}", html.len());

    let report = chapter_report(catalog, book, chapter, url, &html, &MapConfig::default());
    print_json(&report)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| format!("encode output: {e}"))?;
    println!("{json}");
    Ok(())
}
