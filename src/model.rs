use serde::{Deserialize, Serialize};

use crate::transcript::EnrichedStatement;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfEntry {
    pub filename: String,
    pub sha256: String,
    pub session_date: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub pdf_count: usize,
    pub dated_pdf_count: usize,
    pub pdfs: Vec<PdfEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolVersions {
    pub pdftotext: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestPaths {
    pub cache_root: String,
    pub source_directory: String,
    pub manifest_dir: String,
    pub inventory_manifest_path: String,
    pub db_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestCounts {
    pub pdf_count: usize,
    pub processed_pdf_count: usize,
    pub skipped_undated_count: usize,
    pub pages_total: usize,
    pub low_information_page_count: usize,
    pub statements_inserted: usize,
    pub bill_references_inserted: usize,
    pub speakers_total: i64,
    pub sessions_total: i64,
    pub statements_total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub db_schema_version: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub tool_versions: ToolVersions,
    pub paths: IngestPaths,
    pub counts: IngestCounts,
    pub source_hashes: Vec<PdfEntry>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

/// JSON output of `segment` and `extract`.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptReport {
    pub report_version: u32,
    pub generated_at: String,
    pub source: String,
    pub sha256: Option<String>,
    pub title: Option<String>,
    pub session_date: Option<String>,
    pub page_count: usize,
    pub low_information_pages: Vec<u32>,
    pub statement_count: usize,
    pub bill_reference_count: usize,
    pub statements: Vec<EnrichedStatement>,
}
