//! Annotate a buffer from canned ShellCheck output
//!
//! Shows how tab-expanded columns reported by ShellCheck land on character offsets.

use shellcheck_core::{AnnotationOptions, LineIndex, TextBuffer, annotate_issues, parse_issues};

const SCRIPT: &str = "#!/bin/bash\nfor f in *.txt\ndo\n\tcp $f /backup\ndone\n";

const OUTPUT: &str = r#"[
  {"file":"-","line":4,"endLine":4,"column":12,"endColumn":14,"level":"info","code":2086,"message":"Double quote to prevent globbing and word splitting."},
  {"file":"-","line":2,"endLine":2,"column":10,"endColumn":15,"level":"warning","code":2035,"message":"Use ./*glob* or -- *glob* so names with dashes won't become options."},
  {"file":"-","line":9,"endLine":9,"column":1,"endColumn":2,"level":"error","code":1000,"message":"Stale finding for a line that no longer exists."}
]"#;

fn main() {
    let buffer = LineIndex::from_text(SCRIPT);
    let issues = parse_issues(OUTPUT).unwrap();
    println!("{} issues reported", issues.len());

    for (label, options) in [
        ("precise", AnnotationOptions::default()),
        (
            "whole line",
            AnnotationOptions {
                highlight_whole_line: true,
                ..AnnotationOptions::default()
            },
        ),
    ] {
        println!("\n{label}:");
        for annotation in annotate_issues(&buffer, &issues, options) {
            let (line, column) = buffer.char_offset_to_position(annotation.range.start);
            let text: String = (annotation.range.start..annotation.range.end)
                .filter_map(|offset| buffer.char_at(offset))
                .collect();
            println!(
                "  {}:{} {:7} {:?} {}",
                line + 1,
                column + 1,
                annotation.severity.as_str(),
                text,
                annotation.message
            );
            if let Some(source) = buffer.get_line_text(line) {
                println!("      in {source:?}");
            }
        }
    }
}
