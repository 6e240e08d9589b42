//! anki-import: inspect and convert Anki export archives.

use anki_import::{
    import_file, render_json, render_markdown, Collection, DeckNode, ImportConfig,
    ImportProgress, RenderFormat,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "anki-import")]
#[command(about = "Read decks, cards and media from .apkg / .colpkg archives")]
#[command(version)]
struct Cli {
    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show deck, card and media counts and the deck tree
    Inspect {
        /// Archive path
        archive: PathBuf,
    },

    /// Render the collection as Markdown or JSON
    Export {
        /// Archive path
        archive: PathBuf,

        /// Format (markdown, json)
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Copy every media file into a directory
    Media {
        /// Archive path
        archive: PathBuf,

        /// Destination directory
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    let config = match &cli.config {
        Some(path) => ImportConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ImportConfig::from_env()?,
    };

    match cli.command {
        Commands::Inspect { archive } => {
            let collection = open(&archive, &config).await?;
            print_summary(&collection);
        }
        Commands::Export {
            archive,
            format,
            out,
        } => {
            let format: RenderFormat = format.parse().map_err(anyhow::Error::msg)?;
            let collection = open(&archive, &config).await?;
            let rendered = match format {
                RenderFormat::Markdown => render_markdown(&collection, &archive_title(&archive)),
                RenderFormat::Json => render_json(&collection)?,
            };
            match out {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{rendered}"),
            }
        }
        Commands::Media { archive, out } => {
            let collection = open(&archive, &config).await?;
            export_media(&collection, &out)?;
        }
    }

    Ok(())
}

async fn open(archive: &Path, config: &ImportConfig) -> Result<Collection> {
    import_file(archive, config, |progress| match progress {
        ImportProgress::ReadingCards { current, total } => {
            log::debug!("reading-cards {current}/{total}")
        }
        other => log::info!("{}", other.label()),
    })
    .await
    .with_context(|| format!("Failed to import {}", archive.display()))
}

fn archive_title(archive: &Path) -> String {
    archive
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Collection".to_string())
}

fn print_summary(collection: &Collection) {
    let media = collection.media();
    let (extracted_files, extracted_bytes) = walkdir::WalkDir::new(media.root())
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .fold((0usize, 0u64), |(count, bytes), entry| {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            (count + 1, bytes + size)
        });

    println!("Decks: {}", collection.deck_count());
    println!("Cards: {}", collection.card_count());
    println!(
        "Media: {} indexed, {} referenced by cards",
        media.len(),
        collection.referenced_media().len()
    );
    println!("Extracted: {extracted_files} files, {extracted_bytes} bytes");
    println!();
    for node in collection.deck_tree() {
        print_node(collection, &node, 0);
    }
}

fn print_node(collection: &Collection, node: &DeckNode, depth: usize) {
    let count = node
        .deck_id
        .map_or(0, |id| collection.cards_in_deck(id).count());
    println!("{}{} ({count})", "  ".repeat(depth), node.name);
    for child in &node.children {
        print_node(collection, child, depth + 1);
    }
}

fn export_media(collection: &Collection, out: &Path) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;

    let media = collection.media();
    let mut copied = 0usize;
    for filename in media.list_filenames() {
        let safe_name = sanitize_filename::sanitize(filename);
        match media.copy_to(filename, &out.join(&safe_name)) {
            Ok(_) => copied += 1,
            Err(e) => log::warn!("Skipping {filename}: {e}"),
        }
    }

    println!("Copied {copied} of {} media files to {}", media.len(), out.display());
    Ok(())
}
