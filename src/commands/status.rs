use std::fs;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::ingest::{count_rows, default_db_path};
use crate::commands::inventory::default_manifest_path;
use crate::model::PdfInventoryManifest;

pub fn run(args: StatusArgs) -> Result<()> {
    let inventory_path = default_manifest_path(&args.cache_root);
    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| default_db_path(&args.cache_root));

    info!(cache_root = %args.cache_root.display(), "status requested");

    if inventory_path.exists() {
        let raw = fs::read(&inventory_path)
            .with_context(|| format!("failed to read {}", inventory_path.display()))?;
        let inventory: PdfInventoryManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", inventory_path.display()))?;

        info!(
            generated_at = %inventory.generated_at,
            pdf_count = inventory.pdf_count,
            dated = inventory.dated_pdf_count,
            "loaded inventory manifest"
        );
    } else {
        warn!(path = %inventory_path.display(), "inventory manifest missing");
    }

    if db_path.exists() {
        let conn = Connection::open(&db_path)
            .with_context(|| format!("failed to open {}", db_path.display()))?;
        let speakers = count_rows(&conn, "SELECT COUNT(*) FROM speakers").unwrap_or(0);
        let sessions = count_rows(&conn, "SELECT COUNT(*) FROM sessions").unwrap_or(0);
        let statements = count_rows(&conn, "SELECT COUNT(*) FROM statements").unwrap_or(0);
        let bill_references =
            count_rows(&conn, "SELECT COUNT(*) FROM bill_references").unwrap_or(0);

        info!(
            path = %db_path.display(),
            speakers,
            sessions,
            statements,
            bill_references,
            "database status"
        );
    } else {
        warn!(path = %db_path.display(), "database file missing");
    }

    Ok(())
}
