use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::transcript::DEFAULT_MIN_STATEMENT_CHARS;

#[derive(Parser, Debug)]
#[command(
    name = "hansard",
    version,
    about = "Parliamentary transcript extraction tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Date(DateArgs),
    Segment(SegmentArgs),
    Extract(ExtractArgs),
    Inventory(InventoryArgs),
    Ingest(IngestArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SegmenterArgs {
    #[arg(long, default_value_t = false)]
    pub include_presiding: bool,

    #[arg(long, default_value_t = DEFAULT_MIN_STATEMENT_CHARS)]
    pub min_statement_chars: usize,

    #[arg(long)]
    pub bill_vocabulary_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DateArgs {
    #[arg(required = true)]
    pub inputs: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub no_normalize: bool,

    #[command(flatten)]
    pub segmenter: SegmenterArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long)]
    pub pdf: PathBuf,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub max_pages: Option<usize>,

    #[command(flatten)]
    pub segmenter: SegmenterArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = ".cache/hansard")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    #[arg(long, default_value = ".cache/hansard")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    #[arg(long)]
    pub inventory_manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub ingest_manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub db_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub refresh_inventory: bool,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,

    #[command(flatten)]
    pub segmenter: SegmenterArgs,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/hansard")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub db_path: Option<PathBuf>,
}
