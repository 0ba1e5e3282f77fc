use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::IngestArgs;
use crate::commands::inventory;
use crate::commands::pages::{extract_pages_with_pdftotext, normalize_pages, pdftotext_version};
use crate::commands::build_pipeline;
use crate::model::{
    IngestCounts, IngestPaths, IngestRunManifest, PdfInventoryManifest, ToolVersions,
};
use crate::transcript::TranscriptPipeline;
use crate::util::{ensure_directory, now_utc_string, utc_compact_string, write_json_pretty};

use super::*;

pub fn run(args: IngestArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let cache_root = args.cache_root.clone();
    let manifest_dir = cache_root.join("manifests");
    ensure_directory(&manifest_dir)?;

    let source_dir = args
        .source_dir
        .clone()
        .unwrap_or_else(|| inventory::default_source_dir(&cache_root));
    let inventory_manifest_path = args
        .inventory_manifest_path
        .clone()
        .unwrap_or_else(|| inventory::default_manifest_path(&cache_root));
    let ingest_manifest_path = args.ingest_manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!(
            "ingest_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });
    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| default_db_path(&cache_root));

    info!(cache_root = %cache_root.display(), run_id = %run_id, "starting ingest");

    let inventory = load_or_refresh_inventory(
        &source_dir,
        &inventory_manifest_path,
        args.refresh_inventory,
    )?;

    let tool_versions = ToolVersions {
        pdftotext: pdftotext_version()?,
    };

    let mut connection = Connection::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    configure_connection(&connection)?;
    ensure_schema(&connection)?;

    let pipeline = build_pipeline(&args.segmenter)?;
    let mut counts = IngestCounts {
        pdf_count: inventory.pdf_count,
        ..IngestCounts::default()
    };
    let mut warnings = Vec::new();

    for pdf in &inventory.pdfs {
        let Some(session_date) = pdf.session_date.as_deref() else {
            warn!(filename = %pdf.filename, "skipping PDF without a sitting date");
            warnings.push(format!("{}: no sitting date, skipped", pdf.filename));
            counts.skipped_undated_count += 1;
            continue;
        };

        let pdf_path = source_dir.join(&pdf.filename);
        let session = SessionKey {
            session_date,
            title: &pdf.title,
            source_filename: &pdf.filename,
            source_sha256: &pdf.sha256,
        };

        match ingest_pdf(
            &mut connection,
            &pipeline,
            &pdf_path,
            &session,
            args.max_pages_per_doc,
            &mut counts,
        ) {
            Ok(()) => counts.processed_pdf_count += 1,
            Err(error) => {
                warn!(filename = %pdf.filename, error = %format!("{error:#}"), "failed to ingest PDF");
                warnings.push(format!("{}: {error:#}", pdf.filename));
            }
        }
    }

    counts.speakers_total = count_rows(&connection, "SELECT COUNT(*) FROM speakers")?;
    counts.sessions_total = count_rows(&connection, "SELECT COUNT(*) FROM sessions")?;
    counts.statements_total = count_rows(&connection, "SELECT COUNT(*) FROM statements")?;

    let statements_total = counts.statements_total;
    let sessions_total = counts.sessions_total;

    let manifest = IngestRunManifest {
        manifest_version: 1,
        run_id,
        db_schema_version: DB_SCHEMA_VERSION.to_string(),
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_ingest_command(&args),
        tool_versions,
        paths: IngestPaths {
            cache_root: cache_root.display().to_string(),
            source_directory: source_dir.display().to_string(),
            manifest_dir: manifest_dir.display().to_string(),
            inventory_manifest_path: inventory_manifest_path.display().to_string(),
            db_path: db_path.display().to_string(),
        },
        counts,
        source_hashes: inventory.pdfs,
        warnings,
        notes: vec![
            "Re-ingesting a sitting replaces all of its statements and bill references."
                .to_string(),
        ],
    };

    write_json_pretty(&ingest_manifest_path, &manifest)?;

    info!(path = %ingest_manifest_path.display(), "wrote ingest run manifest");
    info!(
        sessions = sessions_total,
        statements = statements_total,
        "ingest completed"
    );

    Ok(())
}

fn ingest_pdf(
    connection: &mut Connection,
    pipeline: &TranscriptPipeline,
    pdf_path: &Path,
    session: &SessionKey<'_>,
    max_pages: Option<usize>,
    counts: &mut IngestCounts,
) -> Result<()> {
    let mut pages = extract_pages_with_pdftotext(pdf_path, max_pages)?;
    let normalization = normalize_pages(&mut pages);

    let processed = pipeline.process(&pages);
    if !processed.low_information_pages.is_empty() {
        warn!(
            pdf = %pdf_path.display(),
            pages = ?processed.low_information_pages,
            "pages had no detectable speakers"
        );
    }

    let stats = store_transcript(connection, session, &processed.statements)?;

    counts.pages_total += pages.len();
    counts.low_information_page_count += processed.low_information_pages.len();
    counts.statements_inserted += stats.statements_inserted;
    counts.bill_references_inserted += stats.bill_references_inserted;

    info!(
        pdf = %pdf_path.display(),
        session_date = %session.session_date,
        pages = pages.len(),
        headers = normalization.header_lines_removed,
        footers = normalization.footer_lines_removed,
        statements = stats.statements_inserted,
        bill_references = stats.bill_references_inserted,
        "ingested sitting"
    );

    Ok(())
}

fn load_or_refresh_inventory(
    source_dir: &Path,
    inventory_manifest_path: &Path,
    refresh_inventory: bool,
) -> Result<PdfInventoryManifest> {
    if refresh_inventory || !inventory_manifest_path.exists() {
        let manifest = inventory::build_manifest(source_dir)?;
        write_json_pretty(inventory_manifest_path, &manifest)?;
        info!(
            path = %inventory_manifest_path.display(),
            pdf_count = manifest.pdf_count,
            "refreshed inventory manifest"
        );
        return Ok(manifest);
    }

    let raw = fs::read(inventory_manifest_path)
        .with_context(|| format!("failed to read {}", inventory_manifest_path.display()))?;
    let manifest: PdfInventoryManifest = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", inventory_manifest_path.display()))?;

    info!(
        path = %inventory_manifest_path.display(),
        pdf_count = manifest.pdf_count,
        "loaded existing inventory manifest"
    );

    Ok(manifest)
}

pub(super) fn render_ingest_command(args: &IngestArgs) -> String {
    let mut command = vec![
        "hansard".to_string(),
        "ingest".to_string(),
        "--cache-root".to_string(),
        args.cache_root.display().to_string(),
    ];

    if let Some(path) = &args.source_dir {
        command.push("--source-dir".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.inventory_manifest_path {
        command.push("--inventory-manifest-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.ingest_manifest_path {
        command.push("--ingest-manifest-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.db_path {
        command.push("--db-path".to_string());
        command.push(path.display().to_string());
    }
    if args.refresh_inventory {
        command.push("--refresh-inventory".to_string());
    }
    if let Some(max_pages) = args.max_pages_per_doc {
        command.push("--max-pages-per-doc".to_string());
        command.push(max_pages.to_string());
    }
    if args.segmenter.include_presiding {
        command.push("--include-presiding".to_string());
    }
    command.push("--min-statement-chars".to_string());
    command.push(args.segmenter.min_statement_chars.to_string());
    if let Some(path) = &args.segmenter.bill_vocabulary_path {
        command.push("--bill-vocabulary-path".to_string());
        command.push(path.display().to_string());
    }

    command.join(" ")
}
