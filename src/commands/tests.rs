use super::pages::{normalize_pages, split_pages};
use super::*;
use crate::transcript::PageText;

fn segmenter_args() -> SegmenterArgs {
    SegmenterArgs {
        include_presiding: false,
        min_statement_chars: crate::transcript::DEFAULT_MIN_STATEMENT_CHARS,
        bill_vocabulary_path: None,
    }
}

#[test]
fn split_pages_numbers_from_one_and_drops_trailing_blank_pages() {
    let pages = split_pages("first page\u{000C}second page\u{000C}  \n\u{000C}");

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0], PageText::new(1, "first page"));
    assert_eq!(pages[1], PageText::new(2, "second page"));
}

#[test]
fn split_pages_keeps_blank_pages_in_the_middle() {
    let pages = split_pages("one\u{000C}\u{000C}three");

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[1].page_number, 2);
    assert!(pages[1].text.is_empty());
    assert_eq!(pages[2].page_number, 3);
}

#[test]
fn normalize_pages_strips_repeated_headers_and_footers() {
    let bodies = ["I beg to move.", "I rise to second.", "I oppose the Motion."];
    let mut pages = (1..=3)
        .zip(bodies)
        .map(|(page_number, body)| {
            PageText::new(
                page_number,
                format!(
                    "NATIONAL ASSEMBLY DEBATES\nHon. Jane Doe: {body}\nDisclaimer: The electronic version of the Official Hansard Report is for information purposes only.\n{page_number}"
                ),
            )
        })
        .collect::<Vec<PageText>>();

    let stats = normalize_pages(&mut pages);

    assert_eq!(stats.header_lines_removed, 3);
    assert_eq!(stats.noise_lines_removed, 6);
    for page in &pages {
        assert!(!page.text.contains("NATIONAL ASSEMBLY DEBATES"));
        assert!(!page.text.contains("Disclaimer"));
        assert!(page.text.starts_with("Hon. Jane Doe"));
    }
}

#[test]
fn normalize_pages_strips_running_headers_with_page_numbers() {
    let bodies = ["I beg to move.", "I rise to second.", "I oppose the Motion."];
    let mut pages = (10..=12)
        .zip(bodies)
        .map(|(page_number, body)| {
            PageText::new(
                page_number,
                format!(
                    "Thursday, 4th December, 2025 NATIONAL ASSEMBLY DEBATES {page_number}\nHon. Jane Doe: {body}\nPage {page_number} of 40"
                ),
            )
        })
        .collect::<Vec<PageText>>();

    let stats = normalize_pages(&mut pages);

    assert_eq!(stats.header_lines_removed, 3);
    assert_eq!(stats.footer_lines_removed, 0);
    assert_eq!(stats.noise_lines_removed, 3);
    assert_eq!(pages[0].text, "Hon. Jane Doe: I beg to move.");
}

#[test]
fn normalize_pages_drops_bare_page_labels_only() {
    let mut pages = vec![PageText::new(
        1,
        "Page 7\nHon. Jane Doe: See page 7 of the Order Paper.\nPages 3 and 4 refer.",
    )];

    let stats = normalize_pages(&mut pages);

    assert_eq!(stats.noise_lines_removed, 1);
    assert_eq!(
        pages[0].text,
        "Hon. Jane Doe: See page 7 of the Order Paper.\nPages 3 and 4 refer."
    );
}

#[test]
fn normalize_pages_leaves_lines_seen_on_too_few_pages() {
    let mut pages = vec![
        PageText::new(1, "Thursday, 4th December 2025\nHon. Jane Doe: First."),
        PageText::new(2, "Thursday, 4th December 2025\nHon. Jane Doe: Second."),
    ];

    let stats = normalize_pages(&mut pages);

    assert_eq!(stats.header_lines_removed, 0);
    assert!(pages[0].text.starts_with("Thursday, 4th December 2025"));
}

#[test]
fn normalize_pages_merges_hyphenated_words_only_before_lowercase() {
    let mut pages = vec![PageText::new(
        1,
        "the appropri-\nation of funds and the Speaker-\nHon. Jane Doe: Yes.",
    )];

    let stats = normalize_pages(&mut pages);

    assert_eq!(stats.dehyphenation_merges, 1);
    assert_eq!(
        pages[0].text,
        "the appropriation of funds and the Speaker-\nHon. Jane Doe: Yes."
    );
}

#[test]
fn build_report_counts_statements_and_bill_references() {
    let pipeline = build_pipeline(&segmenter_args()).expect("pipeline");
    let pages = vec![
        PageText::new(
            1,
            "Hon. John Mbadi: I support the Finance Bill 2025 and Bill No. 12 of 2024.\nThe Speaker: Order!",
        ),
        PageText::new(2, "(The House rose at 6.30 p.m.)"),
    ];

    let report = build_report(
        ReportSource {
            source: "sitting.txt".to_string(),
            sha256: None,
            title: Some("Thursday, 4th December 2025".to_string()),
            session_date: Some("2025-12-04".to_string()),
            page_count: pages.len(),
        },
        pipeline.process(&pages),
    );

    assert_eq!(report.page_count, 2);
    assert_eq!(report.statement_count, 1);
    assert_eq!(report.bill_reference_count, 2);
    assert_eq!(report.low_information_pages, vec![2]);
    assert_eq!(report.statements[0].statement.speaker_name, "John Mbadi");
    assert_eq!(report.session_date.as_deref(), Some("2025-12-04"));
}

#[test]
fn build_pipeline_rejects_missing_vocabulary_file() {
    let args = SegmenterArgs {
        bill_vocabulary_path: Some(std::path::PathBuf::from(
            "/nonexistent/hansard/bill_vocabulary.json",
        )),
        ..segmenter_args()
    };

    assert!(build_pipeline(&args).is_err());
}
