use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::cli::InventoryArgs;
use crate::model::{PdfEntry, PdfInventoryManifest};
use crate::transcript::DateNormalizer;
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub fn default_source_dir(cache_root: &Path) -> PathBuf {
    cache_root.join("pdfs")
}

pub fn default_manifest_path(cache_root: &Path) -> PathBuf {
    cache_root.join("manifests").join("hansard_inventory.json")
}

pub fn run(args: InventoryArgs) -> Result<()> {
    let source_dir = args
        .source_dir
        .clone()
        .unwrap_or_else(|| default_source_dir(&args.cache_root));
    let manifest = build_manifest(&source_dir)?;

    if args.dry_run {
        info!(
            pdf_count = manifest.pdf_count,
            dated = manifest.dated_pdf_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| default_manifest_path(&args.cache_root));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(
        pdf_count = manifest.pdf_count,
        dated = manifest.dated_pdf_count,
        "inventory completed"
    );

    Ok(())
}

pub fn build_manifest(source_dir: &Path) -> Result<PdfInventoryManifest> {
    let dates = DateNormalizer::new()?;

    let mut pdf_paths = discover_pdfs(source_dir)?;
    pdf_paths.sort();

    if pdf_paths.is_empty() {
        bail!("no PDFs found in {}", source_dir.display());
    }

    let mut pdfs = Vec::with_capacity(pdf_paths.len());
    for path in pdf_paths {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;

        let entry = describe_pdf(&dates, filename, sha256_file(&path)?);
        if entry.session_date.is_none() {
            warn!(filename = %entry.filename, "no sitting date in filename");
        }
        pdfs.push(entry);
    }

    sort_entries(&mut pdfs);
    let dated_pdf_count = pdfs
        .iter()
        .filter(|pdf| pdf.session_date.is_some())
        .count();

    Ok(PdfInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: source_dir.display().to_string(),
        pdf_count: pdfs.len(),
        dated_pdf_count,
        pdfs,
    })
}

fn describe_pdf(dates: &DateNormalizer, filename: String, sha256: String) -> PdfEntry {
    let title = Path::new(&filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(&filename)
        .replace('_', " ")
        .trim()
        .to_string();
    let session_date = dates.parse(&title);

    PdfEntry {
        filename,
        sha256,
        session_date,
        title,
    }
}

/// Dated sittings first in calendar order, undated ones last by filename.
fn sort_entries(pdfs: &mut [PdfEntry]) {
    pdfs.sort_by(|a, b| match (&a.session_date, &b.session_date) {
        (Some(left), Some(right)) => left.cmp(right).then(a.filename.cmp(&b.filename)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.filename.cmp(&b.filename),
    });
}

fn discover_pdfs(source_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();

    let entries = fs::read_dir(source_dir)
        .with_context(|| format!("failed to read {}", source_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", source_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if is_pdf {
            pdfs.push(path);
        }
    }

    Ok(pdfs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_pdf_reads_sitting_date_from_filename() {
        let dates = DateNormalizer::new().expect("date patterns compile");

        let entry = describe_pdf(
            &dates,
            "Hansard_Report_-_Thursday,_4th_December_2025_(P).pdf".to_string(),
            "abc".to_string(),
        );

        assert_eq!(entry.title, "Hansard Report - Thursday, 4th December 2025 (P)");
        assert_eq!(entry.session_date.as_deref(), Some("2025-12-04"));
    }

    #[test]
    fn sort_entries_places_undated_files_last() {
        let entry = |filename: &str, date: Option<&str>| PdfEntry {
            filename: filename.to_string(),
            sha256: String::new(),
            session_date: date.map(ToOwned::to_owned),
            title: filename.to_string(),
        };
        let mut pdfs = vec![
            entry("b.pdf", None),
            entry("c.pdf", Some("2025-12-04")),
            entry("a.pdf", Some("2025-01-21")),
        ];

        sort_entries(&mut pdfs);

        let order = pdfs
            .iter()
            .map(|pdf| pdf.filename.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(order, vec!["a.pdf", "c.pdf", "b.pdf"]);
    }
}
