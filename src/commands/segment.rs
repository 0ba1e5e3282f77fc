use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::SegmentArgs;
use crate::commands::pages::{normalize_pages, split_pages};
use crate::commands::{ReportSource, build_pipeline, build_report};
use crate::transcript::DateNormalizer;
use crate::util::{emit_json, sha256_file};

/// Segments already-extracted page text (pages separated by form feeds).
pub fn run(args: SegmentArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let sha256 = sha256_file(&args.input)?;

    let mut pages = split_pages(&raw);
    if !args.no_normalize {
        let stats = normalize_pages(&mut pages);
        info!(
            headers = stats.header_lines_removed,
            footers = stats.footer_lines_removed,
            noise = stats.noise_lines_removed,
            dehyphenated = stats.dehyphenation_merges,
            "normalized page text"
        );
    }

    let pipeline = build_pipeline(&args.segmenter)?;
    let processed = pipeline.process(&pages);

    let title = args
        .input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(ToOwned::to_owned);
    let dates = DateNormalizer::new()?;
    let session_date = title.as_deref().and_then(|title| dates.parse(title));

    let report = build_report(
        ReportSource {
            source: args.input.display().to_string(),
            sha256: Some(sha256),
            title,
            session_date,
            page_count: pages.len(),
        },
        processed,
    );

    info!(
        input = %args.input.display(),
        pages = report.page_count,
        statements = report.statement_count,
        bill_references = report.bill_reference_count,
        "segmentation completed"
    );

    emit_json(args.output.as_deref(), &report)
}
