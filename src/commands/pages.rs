use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::transcript::{PageText, collapse_whitespace};

const REPEATED_EDGE_LINE_MIN_PAGES: usize = 3;
const EDGE_LINE_MAX_CHARS: usize = 120;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageNormalizationStats {
    pub header_lines_removed: usize,
    pub footer_lines_removed: usize,
    pub noise_lines_removed: usize,
    pub dehyphenation_merges: usize,
}

/// Splits pdftotext output on form feeds. Trailing blank pages are dropped.
pub fn split_pages(raw: &str) -> Vec<PageText> {
    let mut pages = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect::<Vec<String>>();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    pages
        .into_iter()
        .enumerate()
        .map(|(index, text)| PageText::new((index + 1) as u32, text))
        .collect()
}

pub fn extract_pages_with_pdftotext(
    pdf_path: &Path,
    max_pages: Option<usize>,
) -> Result<Vec<PageText>> {
    let mut command = Command::new("pdftotext");
    command.arg("-enc").arg("UTF-8").arg("-f").arg("1");
    if let Some(max_pages) = max_pages {
        command.arg("-l").arg(max_pages.to_string());
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    Ok(split_pages(&raw))
}

pub fn pdftotext_version() -> Result<String> {
    let output = Command::new("pdftotext")
        .arg("-v")
        .output()
        .context("failed to run pdftotext -v")?;

    // pdftotext prints its version on stderr.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let source = if stdout.trim().is_empty() {
        stderr.trim()
    } else {
        stdout.trim()
    };

    let version_line = source
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .unwrap_or("unknown");

    Ok(version_line.to_string())
}

/// Drops running headers and footers repeated across pages, known boilerplate
/// lines and bare page numbers, then re-joins words hyphenated at line ends.
pub fn normalize_pages(pages: &mut [PageText]) -> PageNormalizationStats {
    let header_candidates = detect_repeated_edge_lines(pages, true);
    let footer_candidates = detect_repeated_edge_lines(pages, false);
    let mut stats = PageNormalizationStats::default();

    for page in pages.iter_mut() {
        let mut lines = page
            .text
            .lines()
            .map(|line| line.to_string())
            .collect::<Vec<String>>();

        let before = lines.len();
        lines.retain(|line| !line_is_noise(line));
        stats.noise_lines_removed += before - lines.len();

        if let Some(index) = first_nonempty_line_index(&lines) {
            let candidate = normalize_edge_line(&lines[index]);
            if !candidate.is_empty() && header_candidates.contains(&candidate) {
                lines.remove(index);
                stats.header_lines_removed += 1;
            }
        }

        if let Some(index) = last_nonempty_line_index(&lines) {
            let candidate = normalize_edge_line(&lines[index]);
            if !candidate.is_empty() && footer_candidates.contains(&candidate) {
                lines.remove(index);
                stats.footer_lines_removed += 1;
            }
        }

        let (merged, merges) = merge_hyphenated_lines(lines);
        stats.dehyphenation_merges += merges;
        page.text = merged.join("\n");
    }

    stats
}

fn detect_repeated_edge_lines(pages: &[PageText], header: bool) -> HashSet<String> {
    let mut counts = HashMap::<String, usize>::new();
    for page in pages {
        let lines = page
            .text
            .lines()
            .map(str::trim)
            .filter(|line| !line_is_noise(line))
            .collect::<Vec<&str>>();
        let candidate = if header {
            lines.iter().copied().find(|line| !line.is_empty())
        } else {
            lines.iter().rev().copied().find(|line| !line.is_empty())
        };

        let Some(candidate) = candidate else {
            continue;
        };

        let normalized = normalize_edge_line(candidate);
        if normalized.is_empty() || normalized.len() > EDGE_LINE_MAX_CHARS {
            continue;
        }
        *counts.entry(normalized).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter_map(|(candidate, count)| {
            if count >= REPEATED_EDGE_LINE_MIN_PAGES {
                Some(candidate)
            } else {
                None
            }
        })
        .collect()
}

/// Running headers carry the page number (`... NATIONAL ASSEMBLY DEBATES 12`),
/// so digit runs are masked before lines are compared across pages.
fn normalize_edge_line(input: &str) -> String {
    let mut masked = String::with_capacity(input.len());
    let mut in_digits = false;
    for ch in collapse_whitespace(input).chars() {
        if ch.is_ascii_digit() {
            if !in_digits {
                masked.push('#');
            }
            in_digits = true;
        } else {
            masked.extend(ch.to_lowercase());
            in_digits = false;
        }
    }
    masked
}

/// `Page 12` or `Page 12 of 40`, on a line of its own.
fn is_page_label(lower: &str) -> bool {
    let Some(rest) = lower.strip_prefix("page") else {
        return false;
    };
    let words = rest.split_whitespace().collect::<Vec<&str>>();
    let is_number = |word: &str| !word.is_empty() && word.chars().all(|ch| ch.is_ascii_digit());

    match words.as_slice() {
        [number] => is_number(number),
        [number, "of", total] => is_number(number) && is_number(total),
        _ => false,
    }
}

fn line_is_noise(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }

    if trimmed.len() <= 4 && trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return true;
    }

    let lower = trimmed.to_ascii_lowercase();
    if is_page_label(&lower) {
        return true;
    }

    let is_disclaimer = lower.starts_with("disclaimer:") && lower.contains("hansard");
    let is_certified_copy_notice =
        lower.contains("certified version of this report") && lower.contains("hansard editor");
    is_disclaimer || is_certified_copy_notice
}

fn first_nonempty_line_index(lines: &[String]) -> Option<usize> {
    lines.iter().position(|line| !line.trim().is_empty())
}

fn last_nonempty_line_index(lines: &[String]) -> Option<usize> {
    lines.iter().rposition(|line| !line.trim().is_empty())
}

fn merge_hyphenated_lines(lines: Vec<String>) -> (Vec<String>, usize) {
    let mut merged = Vec::<String>::with_capacity(lines.len());
    let mut merges = 0usize;
    let mut index = 0usize;

    while index < lines.len() {
        let current = &lines[index];
        if let Some(next) = lines.get(index + 1) {
            if should_merge_hyphenated_pair(current, next) {
                merged.push(format!(
                    "{}{}",
                    current.trim_end().trim_end_matches('-'),
                    next.trim_start()
                ));
                merges += 1;
                index += 2;
                continue;
            }
        }

        merged.push(current.clone());
        index += 1;
    }

    (merged, merges)
}

fn should_merge_hyphenated_pair(current: &str, next: &str) -> bool {
    let left = current.trim_end();
    if !left.ends_with('-') {
        return false;
    }

    let right = next.trim_start();
    let starts_with_lowercase = right
        .chars()
        .next()
        .map(|character| character.is_lowercase())
        .unwrap_or(false);
    if !starts_with_lowercase {
        return false;
    }

    left.trim_end_matches('-')
        .chars()
        .last()
        .map(|character| character.is_alphabetic())
        .unwrap_or(false)
}
