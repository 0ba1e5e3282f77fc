use anyhow::Result;
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::commands::pages::{extract_pages_with_pdftotext, normalize_pages};
use crate::commands::{ReportSource, build_pipeline, build_report};
use crate::transcript::DateNormalizer;
use crate::util::{emit_json, sha256_file};

pub fn run(args: ExtractArgs) -> Result<()> {
    let sha256 = sha256_file(&args.pdf)?;

    let mut pages = extract_pages_with_pdftotext(&args.pdf, args.max_pages)?;
    let stats = normalize_pages(&mut pages);
    info!(
        pdf = %args.pdf.display(),
        pages = pages.len(),
        headers = stats.header_lines_removed,
        footers = stats.footer_lines_removed,
        dehyphenated = stats.dehyphenation_merges,
        "extracted page text"
    );

    let title = args.title.clone().or_else(|| {
        args.pdf
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(ToOwned::to_owned)
    });
    let dates = DateNormalizer::new()?;
    let session_date = title.as_deref().and_then(|title| dates.parse(title));
    if session_date.is_none() {
        warn!(
            pdf = %args.pdf.display(),
            title = title.as_deref().unwrap_or_default(),
            "session date unknown"
        );
    }

    let pipeline = build_pipeline(&args.segmenter)?;
    let processed = pipeline.process(&pages);

    let report = build_report(
        ReportSource {
            source: args.pdf.display().to_string(),
            sha256: Some(sha256),
            title,
            session_date,
            page_count: pages.len(),
        },
        processed,
    );

    info!(
        pdf = %args.pdf.display(),
        statements = report.statement_count,
        bill_references = report.bill_reference_count,
        "extraction completed"
    );

    emit_json(args.output.as_deref(), &report)
}
