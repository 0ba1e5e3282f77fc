use chrono::NaiveDate;

use super::*;

const ENGLISH_FULL_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn normalizer() -> DateNormalizer {
    DateNormalizer::new().expect("date patterns compile")
}

fn segmenter(config: SegmenterConfig) -> SpeakerSegmenter {
    SpeakerSegmenter::new(config).expect("speaker patterns compile")
}

fn resolver() -> BillReferenceResolver {
    BillReferenceResolver::new().expect("bill patterns compile")
}

#[test]
fn parse_date_handles_hansard_title_fixtures() {
    let dates = normalizer();

    assert_eq!(
        dates.parse("Thursday, 4th December 2025").as_deref(),
        Some("2025-12-04")
    );
    assert_eq!(dates.parse("21st January 2025").as_deref(), Some("2025-01-21"));
    assert_eq!(dates.parse("1st October 2025").as_deref(), Some("2025-10-01"));
}

#[test]
fn parse_date_accepts_each_supported_shape() {
    let dates = normalizer();

    let cases = [
        ("Sitting of 4 December 2025", "2025-12-04", DateShape::DayMonthNameYear),
        ("uploaded 2025-3-7", "2025-03-07", DateShape::IsoNumeric),
        ("Hansard 07/03/2025", "2025-03-07", DateShape::DayFirstNumeric),
        ("Hansard 7.3.2025", "2025-03-07", DateShape::DayFirstNumeric),
        ("March 7, 2025 sitting", "2025-03-07", DateShape::MonthNameDayYear),
        ("7 Mar 2025", "2025-03-07", DateShape::DayAbbreviatedMonthYear),
        ("4 Sept. 2025", "2025-09-04", DateShape::DayAbbreviatedMonthYear),
    ];

    for (input, expected, shape) in cases {
        let found = dates.find(input).expect("date is recognized");
        assert_eq!(found.canonical, expected, "input: {input}");
        assert_eq!(found.shape, shape, "input: {input}");
    }
}

#[test]
fn parse_date_reads_day_before_month_in_numeric_form() {
    let dates = normalizer();

    assert_eq!(dates.parse("05/11/2024").as_deref(), Some("2024-11-05"));
}

#[test]
fn parse_date_prefers_earlier_shape_over_leftmost_text() {
    let dates = normalizer();

    let input = "Uploaded 2025-01-02 for the sitting of 4th December 2025";
    let found = dates.find(input).expect("date is recognized");

    assert_eq!(found.canonical, "2025-12-04");
    assert_eq!(found.shape, DateShape::DayMonthNameYear);
}

#[test]
fn parse_date_takes_leftmost_match_within_a_shape() {
    let dates = normalizer();

    assert_eq!(
        dates
            .parse("1st October 2025 and 2nd October 2025")
            .as_deref(),
        Some("2025-10-01")
    );
}

#[test]
fn parse_date_skips_out_of_range_candidates() {
    let dates = normalizer();

    assert_eq!(
        dates.parse("13/13/2025 then 12/11/2025").as_deref(),
        Some("2025-11-12")
    );
}

#[test]
fn parse_date_reads_url_fragments() {
    let dates = normalizer();

    assert_eq!(
        dates
            .parse("hansard-report-thursday-4th-december-2025.pdf")
            .as_deref(),
        Some("2025-12-04")
    );
}

#[test]
fn parse_date_reads_dates_touching_underscores_and_letters() {
    let dates = normalizer();

    let cases = [
        ("hansard_thursday_4th_december_2025", "2025-12-04"),
        ("Hansard_Report_4th-December-2025", "2025-12-04"),
        ("sitting_2025-12-04", "2025-12-04"),
        ("2025-12-04T10:00:00Z", "2025-12-04"),
        ("report_04/12/2025", "2025-12-04"),
        ("Report_4_Dec_2025", "2025-12-04"),
        ("report_december_4_2025", "2025-12-04"),
    ];

    for (input, expected) in cases {
        assert_eq!(dates.parse(input).as_deref(), Some(expected), "input: {input}");
    }
}

#[test]
fn find_date_span_excludes_neighbouring_characters() {
    let dates = normalizer();

    let input = "sitting_2025-12-04T10:00:00Z";
    let found = dates.find(input).expect("date is recognized");

    assert_eq!(&input[found.start..found.end], "2025-12-04");
    assert_eq!(found.shape, DateShape::IsoNumeric);
}

#[test]
fn parse_date_does_not_split_longer_numbers() {
    let dates = normalizer();

    assert_eq!(dates.parse("ref 123 December 2025"), None);
    assert_eq!(dates.parse("serial 2025-12-041"), None);
    assert_eq!(
        dates.parse("13/13/2025,2/2/2025").as_deref(),
        Some("2025-02-02")
    );
}

#[test]
fn parse_date_returns_none_without_a_date() {
    let dates = normalizer();

    assert_eq!(dates.parse(""), None);
    assert_eq!(dates.parse("   "), None);
    assert_eq!(dates.parse("Order Paper for the afternoon sitting"), None);
}

#[test]
fn parse_date_is_repeatable() {
    let dates = normalizer();

    for input in [
        "Thursday, 4th December 2025",
        "2025-3-7",
        "07/03/2025",
        "March 7, 2025",
        "7 Mar 2025",
    ] {
        let first = dates.parse(input);
        assert!(first.is_some(), "input: {input}");
        assert_eq!(dates.parse(input), first);
        assert_eq!(dates.parse(input), first);
    }
}

#[test]
fn parse_naive_rejects_dates_missing_from_calendar() {
    let dates = normalizer();

    assert_eq!(dates.parse("31/02/2025").as_deref(), Some("2025-02-31"));
    assert_eq!(dates.parse_naive("31/02/2025"), None);
    assert_eq!(
        dates.parse_naive("28/02/2025"),
        NaiveDate::from_ymd_opt(2025, 2, 28)
    );
}

#[test]
fn ordinal_suffix_follows_english_rules() {
    for day in 1..=31u32 {
        let expected = match day {
            1 | 21 | 31 => "st",
            2 | 22 => "nd",
            3 | 23 => "rd",
            _ => "th",
        };
        assert_eq!(ordinal_suffix(day), expected, "day {day}");
    }
}

#[test]
fn long_form_dates_parse_back_to_iso() {
    let dates = normalizer();

    let sample = NaiveDate::from_ymd_opt(2025, 12, 4).expect("valid date");
    assert_eq!(dates.long_form(sample), "Thursday, 4th December 2025");

    for day in 1..=31u32 {
        let date = NaiveDate::from_ymd_opt(2025, 12, day).expect("valid date");
        let title = dates.long_form(date);
        assert_eq!(
            dates.parse(&title),
            Some(date.format("%Y-%m-%d").to_string()),
            "title: {title}"
        );
    }
}

#[test]
fn month_table_without_abbreviations_ignores_short_names() {
    let months = MonthTable::new(&ENGLISH_FULL_MONTHS, &[]).expect("valid month table");
    let dates = DateNormalizer::with_months(months).expect("date patterns compile");

    assert_eq!(dates.parse("7 Mar 2025"), None);
    assert_eq!(dates.parse("7 March 2025").as_deref(), Some("2025-03-07"));
}

#[test]
fn month_table_requires_twelve_names() {
    assert!(MonthTable::new(&["January"], &[]).is_err());
    assert!(MonthTable::new(&ENGLISH_FULL_MONTHS, &[("Foo", 13)]).is_err());
}

#[test]
fn normalize_name_strips_honorific_title_and_spacing() {
    let names = NameNormalizer::new().expect("name patterns compile");

    assert_eq!(
        names.normalize("  Hon. (Dr)  James   Opiyo   Wandayi  "),
        "James Opiyo Wandayi"
    );
    assert_eq!(names.normalize("Hon. Jane Doe, MP"), "Jane Doe");
    assert_eq!(names.normalize("Hon. Jane Doe, MP."), "Jane Doe");
    assert_eq!(names.normalize("Hon. Ali Mp"), "Ali Mp");
    assert_eq!(
        names.normalize("hon. JOHN o'brien (Kisumu West, ODM)"),
        "John O'Brien"
    );
}

#[test]
fn title_case_capitalizes_after_non_letters() {
    assert_eq!(title_case("mr. speaker"), "Mr. Speaker");
    assert_eq!(title_case("jean-paul MBOYA"), "Jean-Paul Mboya");
}

#[test]
fn segment_page_drops_presiding_officers_by_default() {
    let text = "The Speaker: Order!\nHon. Jane Doe: I rise to speak about health funding today and more.";

    let statements = segmenter(SegmenterConfig::default()).segment_page(text, None);

    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].speaker_name, "Jane Doe");
    assert_eq!(
        statements[0].text,
        "I rise to speak about health funding today and more."
    );
    assert_eq!(statements[0].start_offset, "The Speaker: Order!\n".len());
    assert_eq!(statements[0].end_offset, text.len());
    assert_eq!(statements[0].confidence, 1.0);
}

#[test]
fn segment_page_keeps_presiding_officers_when_requested() {
    let text = "The Speaker: Order, Members! Take your seats.\nHon. Jane Doe: I rise to speak about health funding today.";
    let config = SegmenterConfig {
        include_presiding_officers: true,
        ..SegmenterConfig::default()
    };

    let statements = segmenter(config).segment_page(text, Some(4));

    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].speaker_name, "The Speaker");
    assert_eq!(statements[0].text, "Order, Members! Take your seats.");
    assert_eq!(statements[0].start_offset, 0);
    assert_eq!(statements[0].end_offset, statements[1].start_offset);
    assert_eq!(statements[1].speaker_name, "Jane Doe");
    assert!(statements.iter().all(|s| s.page_number == Some(4)));
}

#[test]
fn segment_page_excludes_temporary_speaker_with_occupant_name() {
    let text = "The Temporary Speaker (Hon. Mary Njeri): Proceed, Member for Ugunja.\nHon. (Dr) James Opiyo Wandayi (Ugunja, ODM): Thank you, Hon. Temporary Speaker. I beg to move.";

    let statements = segmenter(SegmenterConfig::default()).segment_page(text, None);

    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].speaker_name, "James Opiyo Wandayi");
    assert!(statements[0].text.starts_with("Thank you"));
}

#[test]
fn segment_page_excludes_every_presiding_role_by_default() {
    let roles = [
        "The Speaker",
        "The Deputy Speaker",
        "The Temporary Speaker",
        "Mr. Speaker",
        "Mr Speaker",
        "Madam Speaker",
        "The Chairperson",
        "The Temporary Chairperson",
    ];

    for role in roles {
        let text = format!(
            "{role}: Order, Honourable Members!\nHon. Jane Doe: I rise to speak about health funding today."
        );

        let statements = segmenter(SegmenterConfig::default()).segment_page(&text, None);
        assert_eq!(statements.len(), 1, "role: {role}");
        assert_eq!(statements[0].speaker_name, "Jane Doe", "role: {role}");

        let config = SegmenterConfig {
            include_presiding_officers: true,
            ..SegmenterConfig::default()
        };
        let statements = segmenter(config).segment_page(&text, None);
        assert_eq!(statements.len(), 2, "role: {role}");
        assert_eq!(statements[0].speaker_name, role, "role: {role}");
    }
}

#[test]
fn segment_page_reads_varied_member_introductions() {
    let text = "\
Hon. (Dr.) (Eng.) John Mbadi: I beg to move the Motion.
Hon. Jane Doe (Nairobi) (ODM): I rise to oppose the Motion.
HON. MARY NJERI: On a point of order, Hon. Speaker.
Hon. Kimani wa Ichung'wah: I second the Motion today.";

    let statements = segmenter(SegmenterConfig::default()).segment_page(text, None);

    let speakers = statements
        .iter()
        .map(|statement| statement.speaker_name.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(
        speakers,
        vec!["John Mbadi", "Jane Doe", "Mary Njeri", "Kimani Wa Ichung'Wah"]
    );
    assert_eq!(statements[1].text, "I rise to oppose the Motion.");
    assert_eq!(statements[2].text, "On a point of order, Hon. Speaker.");
}

#[test]
fn segment_page_offsets_are_strictly_increasing() {
    let text = "\
Hon. Alice Kamau: The county allocation must reach every ward this year.
Hon. Brian Otieno: I concur and add that the roads budget is too thin.
Mr. Speaker: Hon. Members, let us have order in the House please.
Hon. Alice Kamau: On a point of order, the Member is misleading the House.
";
    let config = SegmenterConfig {
        include_presiding_officers: true,
        ..SegmenterConfig::default()
    };

    let statements = segmenter(config).segment_page(text, None);

    assert_eq!(statements.len(), 4);
    for pair in statements.windows(2) {
        assert!(pair[0].start_offset < pair[1].start_offset);
        assert!(pair[0].end_offset <= pair[1].start_offset);
    }
    for statement in &statements {
        assert!(statement.start_offset < statement.end_offset);
        assert!(text[statement.start_offset..statement.end_offset].contains(&statement.text));
    }
}

#[test]
fn segment_page_reads_one_introduction_per_line() {
    let text = "Hon. Alice Kamau: I agree with Hon. Brian Otieno: this matters a great deal.\n";

    let statements = segmenter(SegmenterConfig::default()).segment_page(text, None);

    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].speaker_name, "Alice Kamau");
    assert!(statements[0].text.contains("Hon. Brian Otieno:"));
}

#[test]
fn segment_page_drops_short_interjections() {
    let text = "Hon. Jane Doe: Yes.\nHon. John Roe: The Bill deserves our full support today.";

    let statements = segmenter(SegmenterConfig::default()).segment_page(text, None);

    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].speaker_name, "John Roe");
}

#[test]
fn segment_page_honors_custom_minimum_length() {
    let text = "Hon. Jane Doe: Yes.\nHon. John Roe: The Bill deserves our full support today.";
    let config = SegmenterConfig {
        min_statement_chars: 1,
        ..SegmenterConfig::default()
    };

    let statements = segmenter(config).segment_page(text, None);

    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].text, "Yes.");
}

#[test]
fn segment_page_without_speakers_is_empty() {
    let segmenter = segmenter(SegmenterConfig::default());

    assert!(segmenter.segment_page("", None).is_empty());
    assert!(segmenter.segment_page("   \n  ", None).is_empty());
    assert!(
        segmenter
            .segment_page("QUORUM\nThe House met at 2.30 p.m.", Some(1))
            .is_empty()
    );
}

#[test]
fn detect_introductions_orders_members_and_officers_by_offset() {
    let segmenter = segmenter(SegmenterConfig::default());
    let text = "Hon. Jane Doe: Thank you.\n  The Deputy Speaker: Next Order.";

    let introductions = segmenter.detect_introductions(text);

    assert_eq!(introductions.len(), 2);
    assert_eq!(introductions[0].kind, IntroductionKind::Member);
    assert_eq!(introductions[0].start, 0);
    assert_eq!(introductions[1].kind, IntroductionKind::PresidingOfficer);
    assert_eq!(introductions[1].raw_name, "The Deputy Speaker");
    assert_eq!(introductions[1].start, text.find("The Deputy").expect("present"));
}

#[test]
fn segment_pages_keeps_page_order_and_reports_empty_pages() {
    let pages = vec![
        PageText::new(3, "Hon. Brian Otieno: Third page remarks on the coffee sector."),
        PageText::new(1, "Hon. Alice Kamau: First page remarks on county funding."),
        PageText::new(2, "PAPERS LAID\nThe following papers were laid on the Table."),
    ];

    let document = segmenter(SegmenterConfig::default()).segment_pages(&pages);

    assert_eq!(document.statements.len(), 2);
    assert_eq!(document.statements[0].page_number, Some(1));
    assert_eq!(document.statements[0].speaker_name, "Alice Kamau");
    assert_eq!(document.statements[1].page_number, Some(3));
    assert_eq!(document.low_information_pages, vec![2]);
}

#[test]
fn segment_pages_never_joins_text_across_pages() {
    let pages = vec![
        PageText::new(1, "Hon. Alice Kamau: The allocation for water projects is"),
        PageText::new(2, "insufficient for the arid counties.\nHon. Brian Otieno: I agree entirely with that view."),
    ];

    let document = segmenter(SegmenterConfig::default()).segment_pages(&pages);

    assert_eq!(document.statements.len(), 2);
    assert_eq!(
        document.statements[0].text,
        "The allocation for water projects is"
    );
    assert_eq!(document.statements[1].speaker_name, "Brian Otieno");
    assert!(document.low_information_pages.is_empty());
}

struct TwoWordNames;

impl NameValidator for TwoWordNames {
    fn is_person_name(&self, name: &str) -> bool {
        name.split_whitespace().count() >= 2
    }
}

#[test]
fn name_validator_lowers_confidence_without_dropping_statement() {
    let text = "Hon. Members: We are ready to proceed with the vote.\nHon. Jane Doe: I rise to speak about health funding today.";
    let segmenter = segmenter(SegmenterConfig::default()).with_name_validator(Box::new(TwoWordNames));

    let statements = segmenter.segment_page(text, None);

    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].speaker_name, "Members");
    assert_eq!(statements[0].confidence, 0.5);
    assert_eq!(statements[1].confidence, 1.0);
}

#[test]
fn presiding_officers_match_case_insensitively() {
    let officers = PresidingOfficers::default();

    assert!(officers.contains("the speaker"));
    assert!(officers.contains("Mr. Speaker"));
    assert!(!officers.contains("Jane Doe"));
}

#[test]
fn resolve_bills_deduplicates_repeated_mentions() {
    let text = "Bill No. 123 is important. I support Bill No. 123. Bill No. 123 must pass.";

    let references = resolver().resolve(text);

    assert_eq!(references.len(), 1);
    assert_eq!(references[0].bill_number.as_deref(), Some("123"));
    assert_eq!(references[0].position, 0);
    assert_eq!(references[0].normalized, "Bill No. 123");
}

#[test]
fn resolve_bills_rejects_unknown_bill_types() {
    assert!(resolver().resolve("Random Bill 2024").is_empty());
}

#[test]
fn resolve_bills_prefers_article_form_for_named_bills() {
    let text = "The Finance Bill, 2024 was read. Later the finance bill 2024 passed.";

    let references = resolver().resolve(text);

    assert_eq!(references.len(), 1);
    assert_eq!(references[0].full_matched_text, "The Finance Bill, 2024");
    assert_eq!(references[0].bill_type.as_deref(), Some("Finance"));
    assert_eq!(references[0].bill_year.as_deref(), Some("2024"));
    assert_eq!(references[0].normalized, "Finance Bill 2024");
}

#[test]
fn resolve_bills_reads_parenthesized_year() {
    let references = resolver().resolve("We passed the Health Bill (2023) last week.");

    assert_eq!(references.len(), 1);
    assert_eq!(references[0].bill_type.as_deref(), Some("Health"));
    assert_eq!(references[0].bill_year.as_deref(), Some("2023"));
    assert_eq!(references[0].normalized, "Health Bill 2023");
}

#[test]
fn resolve_bills_normalizes_numbered_forms() {
    let resolver = resolver();

    let cases = [
        ("Bill 2024/007 is next", "Bill 2024/7", Some("7"), Some("2024")),
        ("see Bill 2024-000", "Bill 2024/0", Some("0"), Some("2024")),
        ("Bill Number 45 today", "Bill No. 45", Some("45"), None),
        ("on Bill 12 we differ", "Bill No. 12", Some("12"), None),
        ("Bill No. 5 of 2024 stands", "Bill 2024/5", Some("5"), Some("2024")),
    ];

    for (input, normalized, number, year) in cases {
        let references = resolver.resolve(input);
        assert_eq!(references.len(), 1, "input: {input}");
        assert_eq!(references[0].normalized, normalized, "input: {input}");
        assert_eq!(references[0].bill_number.as_deref(), number, "input: {input}");
        assert_eq!(references[0].bill_year.as_deref(), year, "input: {input}");
        assert_eq!(references[0].bill_type, None, "input: {input}");
    }
}

#[test]
fn resolve_bills_orders_by_position() {
    let text = "Bill 12 was withdrawn before The Finance Bill 2024 passed.";

    let references = resolver().resolve(text);

    assert_eq!(references.len(), 2);
    assert_eq!(references[0].normalized, "Bill No. 12");
    assert_eq!(references[1].normalized, "Finance Bill 2024");
    assert!(references[0].position < references[1].position);
}

#[test]
fn resolve_bills_handles_empty_input() {
    assert!(resolver().resolve("").is_empty());
    assert!(resolver().resolve("  \n ").is_empty());
}

#[test]
fn reduced_vocabulary_limits_named_bills() {
    let resolver = BillReferenceResolver::with_vocabulary(BillVocabulary::new(["Health"]))
        .expect("bill patterns compile");

    assert!(resolver.resolve("The Finance Bill 2024").is_empty());
    assert_eq!(resolver.resolve("Health Bill 2024").len(), 1);
}

#[test]
fn pipeline_attaches_bill_references_to_statements() {
    let pipeline = TranscriptPipeline::new(segmenter(SegmenterConfig::default()), resolver());
    let pages = vec![
        PageText::new(1, "Hon. Alice Kamau: I support the Finance Bill 2024 and Bill No. 7."),
        PageText::new(2, "Hon. Brian Otieno: My concerns are about procedure, not substance."),
    ];

    let processed = pipeline.process(&pages);

    assert_eq!(processed.statements.len(), 2);
    assert_eq!(processed.statements[0].bill_references.len(), 2);
    assert!(processed.statements[1].bill_references.is_empty());
    assert_eq!(processed.bill_reference_count(), 2);
}
