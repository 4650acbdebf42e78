//! mediasift - classify media files the way a DLNA media server does.
//!
//! Usage:
//!   mediasift classify PATH...     Classify paths as dir / file / unknown
//!   mediasift scan [DIR]           List media files under a directory
//!   mediasift mime PATH...         Show the MIME type for file extensions
//!   mediasift ext MIME...          Show the canonical extension for MIME types
//!   mediasift --help               Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use jwalk::WalkDir;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use mediasift_core::{ClassifierConfig, OptionalFormats};
use mediasift_scan::{
    AlbumArtMatcher, EntryHint, ExtensionClassifier, FileType, MediaTypes, MimeTable,
    PathTypeResolver,
};

#[derive(Parser)]
#[command(
    name = "mediasift",
    version,
    about = "Classify media files and map extensions to MIME types",
    long_about = "mediasift decides which files a media server would publish.\n\n\
                  Paths are classified by extension after resolving symlinks; \
                  directories and media files matching the selected categories \
                  are reported, everything else is ignored."
)]
struct Cli {
    /// Recognize WavPack audio (.wv)
    #[arg(long, global = true)]
    wavpack: bool,

    /// Recognize TiVo recordings (.TiVo)
    #[arg(long, global = true)]
    tivo: bool,

    /// Album art names, slash separated; a trailing '*' matches a prefix
    #[arg(long, global = true, value_name = "LIST")]
    album_art: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify individual paths
    Classify {
        /// Paths to classify
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Media categories to accept (audio,video,images,rescan or A,V,P)
        #[arg(short, long, default_value = "all")]
        media: MediaTypes,
    },

    /// Walk a directory and list the media files it contains
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Media categories to accept (audio,video,images,rescan or A,V,P)
        #[arg(short, long, default_value = "all")]
        media: MediaTypes,

        /// Follow symbolic links while walking
        #[arg(short = 'L', long)]
        follow_links: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Look up MIME types by file extension
    Mime {
        /// File names or paths
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Look up canonical extensions by MIME type
    Ext {
        /// MIME types such as audio/mpeg
        #[arg(required = true)]
        mimes: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One media file found by `scan`.
#[derive(Debug, Serialize)]
struct ScanEntry {
    path: PathBuf,
    mime: Option<&'static str>,
    album_art: bool,
}

/// Summary of a `scan` run.
#[derive(Debug, Serialize)]
struct ScanReport {
    root: PathBuf,
    media: String,
    directories: u64,
    skipped: u64,
    files: Vec<ScanEntry>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut builder = ClassifierConfig::builder();
    builder.formats(OptionalFormats {
        wavpack: cli.wavpack,
        tivo: cli.tivo,
    });
    if let Some(names) = cli.album_art {
        builder.album_art_names(names);
    }
    let config = builder.build().context("Invalid classifier configuration")?;

    match cli.command {
        Command::Classify { paths, media } => run_classify(&config, &paths, media),
        Command::Scan {
            path,
            media,
            follow_links,
            format,
        } => run_scan(&config, &path, media, follow_links, format)?,
        Command::Mime { paths } => run_mime(&config, &paths),
        Command::Ext { mimes } => run_ext(&config, &mimes),
    }

    Ok(())
}

/// Install a stderr subscriber; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("mediasift={default_level},mediasift_scan={default_level},mediasift_ops={default_level}")
            .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Classify each path with a full filesystem probe.
fn run_classify(config: &ClassifierConfig, paths: &[PathBuf], media: MediaTypes) {
    let classifier = ExtensionClassifier::from_config(config);
    let resolver = PathTypeResolver::new(&classifier);

    for path in paths {
        let file_type = resolver.resolve_unknown_type(path, media);
        println!("{:<8} {}", file_type, path.display());
    }
}

/// Walk a directory, feeding the walker's entry types to the resolver.
fn run_scan(
    config: &ClassifierConfig,
    root: &Path,
    media: MediaTypes,
    follow_links: bool,
    format: OutputFormat,
) -> Result<()> {
    let root = root.canonicalize().context("Invalid path")?;
    let classifier = ExtensionClassifier::from_config(config);
    let resolver = PathTypeResolver::new(&classifier);
    let mimes = MimeTable::from_config(config);
    let album_art = AlbumArtMatcher::from_config(config);

    eprintln!("Scanning {} for {}...", root.display(), media);

    let mut report = ScanReport {
        root: root.clone(),
        media: media.to_string(),
        directories: 0,
        skipped: 0,
        files: Vec::new(),
    };

    let walker = WalkDir::new(&root)
        .follow_links(follow_links)
        .sort(true)
        .min_depth(1);

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "Cannot read directory entry");
                report.skipped += 1;
                continue;
            }
        };

        let path = entry.path();
        let hint = EntryHint::from(entry.file_type());

        match resolver.resolve_file_type(Some(hint), &path, media) {
            FileType::Dir => report.directories += 1,
            FileType::File => {
                report.files.push(ScanEntry {
                    mime: mimes.ext_to_mime(&path).map(|info| info.mime),
                    album_art: album_art.is_album_art_path(&path),
                    path,
                });
            }
            FileType::Unknown => report.skipped += 1,
        }
    }

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(70));
            println!(" {} ({})", report.root.display(), report.media);
            println!(
                " {} media files, {} directories, {} skipped",
                report.files.len(),
                report.directories,
                report.skipped
            );
            println!("{}", "─".repeat(70));
            println!();

            for file in &report.files {
                let relative = file.path.strip_prefix(&report.root).unwrap_or(&file.path);
                let marker = if file.album_art { " [album art]" } else { "" };
                println!(
                    "   {:<16} {}{}",
                    file.mime.unwrap_or("-"),
                    relative.display(),
                    marker
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Print extension to MIME lookups.
fn run_mime(config: &ClassifierConfig, paths: &[PathBuf]) {
    let mimes = MimeTable::from_config(config);

    for path in paths {
        match mimes.ext_to_mime(path) {
            Some(info) => println!("{:<20} {} ({})", info.mime, path.display(), info.extension),
            None => println!("{:<20} {}", "-", path.display()),
        }
    }
}

/// Print MIME to extension lookups.
fn run_ext(config: &ClassifierConfig, mime_types: &[String]) {
    let mimes = MimeTable::from_config(config);

    for mime in mime_types {
        println!("{:<6} {}", mimes.mime_to_ext(mime), mime);
    }
}
