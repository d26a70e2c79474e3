use pretty_assertions::assert_eq;
use shellcheck_core::{
    AnnotationOptions, Issue, LineIndex, MappedRange, Severity, TextBuffer, annotate_issue,
    annotate_issues, map_issue,
};

fn issue(line: usize, column: usize) -> Issue {
    Issue {
        line,
        column,
        level: "warning".to_string(),
        code: Some("2086".to_string()),
        message: "quote this".to_string(),
        ..Issue::default()
    }
}

#[test]
fn test_plain_line_column_is_offset() {
    let buffer = LineIndex::from_text("#!/bin/sh\nrm -rf $dir/*\n");
    let line_start = buffer.line_start_offset(1);

    for column in 1..=13 {
        let mapped = map_issue(&buffer, &issue(2, column)).unwrap();
        assert_eq!(mapped.column_start_offset, line_start + column - 1);
    }
}

#[test]
fn test_leading_tabs_expand_to_width_eight() {
    for tabs in 1..=3 {
        let text = format!("{}echo", "\t".repeat(tabs));
        let buffer = LineIndex::from_text(&text);

        let mapped = map_issue(&buffer, &issue(1, 8 * tabs + 1)).unwrap();
        assert_eq!(mapped.column_start_offset, tabs, "{tabs} tab(s)");
    }
}

#[test]
fn test_column_beyond_line_maps_to_line_end() {
    let buffer = LineIndex::from_text("fi\nif true; then\n");

    let mapped = map_issue(&buffer, &issue(2, 40)).unwrap();
    assert_eq!(mapped.column_start_offset, buffer.line_end_offset(1));

    let annotation = annotate_issue(&buffer, &issue(2, 40), AnnotationOptions::default()).unwrap();
    assert!(annotation.anchor_at_line_end);
    assert!(annotation.range.is_empty());
}

#[test]
fn test_column_zero_maps_to_line_start() {
    let buffer = LineIndex::from_text("a\n  b\n");

    let mapped = map_issue(&buffer, &issue(2, 0)).unwrap();
    assert_eq!(mapped.column_start_offset, 2);
}

#[test]
fn test_lines_outside_buffer_are_dropped() {
    let buffer = LineIndex::from_text("echo one\necho two");

    assert_eq!(map_issue(&buffer, &issue(3, 1)), None);
    assert_eq!(map_issue(&buffer, &issue(0, 1)), None);

    let mut spans_past_end = issue(2, 1);
    spans_past_end.end_line = 5;
    assert_eq!(map_issue(&buffer, &spans_past_end), None);

    // Dropping is silent: the rest of the batch is still annotated.
    let annotations = annotate_issues(
        &buffer,
        &[issue(9, 1), issue(1, 6), issue(100, 2)],
        AnnotationOptions::default(),
    );
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].range.start, 5);
}

// `endLine == 0` / `endColumn == 0` are treated as "same as the start". Whether ShellCheck ever
// emits zeros on purpose is unknown; these pin the defaulting down.
#[test]
fn test_zero_end_column_equals_start_column() {
    let buffer = LineIndex::from_text("\tcp $src $dst\n");

    let mut unset = issue(1, 12);
    unset.end_column = 0;
    let mut explicit = issue(1, 12);
    explicit.end_column = 12;

    assert_eq!(map_issue(&buffer, &unset), map_issue(&buffer, &explicit));
}

#[test]
fn test_zero_end_line_equals_start_line() {
    let buffer = LineIndex::from_text("a\nbb\nccc\n");

    let mut unset = issue(2, 1);
    unset.end_line = 0;
    unset.end_column = 3;
    let mut explicit = unset.clone();
    explicit.end_line = 2;

    assert_eq!(map_issue(&buffer, &unset), map_issue(&buffer, &explicit));
}

#[test]
fn test_multi_line_issue() {
    let text = "if [ $a ]; then\n\tfoo\nfi";
    let buffer = LineIndex::from_text(text);

    let multi = Issue {
        line: 1,
        end_line: 3,
        column: 1,
        end_column: 3,
        level: "error".to_string(),
        code: Some("1009".to_string()),
        message: "The mentioned parser error was in this if expression.".to_string(),
    };

    let mapped = map_issue(&buffer, &multi).unwrap();
    assert_eq!(
        mapped,
        MappedRange {
            line_start_offset: 0,
            line_end_offset: 23,
            column_start_offset: 0,
            column_end_offset: 23,
        }
    );

    let precise = annotate_issue(&buffer, &multi, AnnotationOptions::default()).unwrap();
    assert_eq!((precise.range.start, precise.range.end), (0, 23));
    assert_eq!(precise.severity, Severity::Error);
}

#[test]
fn test_whole_line_multi_line_issue_spans_to_last_line_end() {
    let buffer = LineIndex::from_text("  if [ $a ]; then\n\tfoo\nfi");
    let options = AnnotationOptions {
        highlight_whole_line: true,
        ..AnnotationOptions::default()
    };

    let mut span = issue(1, 3);
    span.end_line = 3;
    span.end_column = 3;

    let annotation = annotate_issue(&buffer, &span, options).unwrap();
    assert_eq!((annotation.range.start, annotation.range.end), (2, 25));
}

#[test]
fn test_end_line_before_start_line_is_dropped() {
    let buffer = LineIndex::from_text("echo a\necho b\necho c\n");

    let mut reversed = issue(3, 1);
    reversed.end_line = 1;
    reversed.end_column = 2;
    assert_eq!(map_issue(&buffer, &reversed), None);

    for highlight_whole_line in [false, true] {
        let options = AnnotationOptions {
            highlight_whole_line,
            ..AnnotationOptions::default()
        };
        let annotations = annotate_issues(&buffer, &[reversed.clone(), issue(2, 1)], options);
        assert_eq!(annotations.len(), 1);
        assert!(annotations[0].range.start <= annotations[0].range.end);
        assert_eq!(annotations[0].range.start, 7);
    }
}

#[test]
fn test_multi_line_end_column_on_last_line() {
    let buffer = LineIndex::from_text("x=$(\n\t\tcat file\n)");

    let mut span = issue(1, 3);
    span.end_line = 2;
    span.end_column = 20;

    let mapped = map_issue(&buffer, &span).unwrap();
    assert_eq!(mapped.column_start_offset, 2);
    // Display column 20 on "\t\tcat file": tabs cover 1..=16, 'c' is 17, so column 20 is ' '.
    assert_eq!(mapped.column_end_offset, 5 + 5);
}

#[test]
fn test_whole_line_mode_starts_at_first_non_blank() {
    let buffer = LineIndex::from_text("  foo()");
    let options = AnnotationOptions {
        highlight_whole_line: true,
        ..AnnotationOptions::default()
    };

    let annotation = annotate_issue(&buffer, &issue(1, 5), options).unwrap();
    assert_eq!((annotation.range.start, annotation.range.end), (2, 7));
}

#[test]
fn test_tab_indented_scenario() {
    let buffer = LineIndex::from_text("#!/bin/bash\nx=1\n\techo $x\n");
    let line_start = buffer.line_start_offset(2);

    // Column 6 lies inside the tab's 8 display columns, so it lands on the tab itself.
    let inside_tab = issue(3, 6);
    let annotation = annotate_issue(&buffer, &inside_tab, AnnotationOptions::default()).unwrap();
    assert_eq!(annotation.range.start, line_start);
    assert_eq!(annotation.message, "quote this [SC2086]");
    assert_eq!(annotation.code.as_deref(), Some("SC2086"));
    assert_eq!(annotation.severity, Severity::Warning);

    // `$` sits after the tab (8) and "echo " (5): display column 14.
    let mut dollar = issue(3, 14);
    dollar.end_column = 16;
    let annotation = annotate_issue(&buffer, &dollar, AnnotationOptions::default()).unwrap();
    assert_eq!(buffer.char_at(annotation.range.start), Some('$'));
    assert_eq!(annotation.range.start, line_start + 6);
    assert_eq!(annotation.range.end, line_start + 8);
    assert!(!annotation.anchor_at_line_end);
}

#[test]
fn test_demoted_errors() {
    let buffer = LineIndex::from_text("echo $(");
    let mut err = issue(1, 6);
    err.level = "error".to_string();

    let options = AnnotationOptions {
        treat_all_issues_as_warnings: true,
        ..AnnotationOptions::default()
    };
    let annotation = annotate_issue(&buffer, &err, options).unwrap();
    assert_eq!(annotation.severity, Severity::Warning);
}
