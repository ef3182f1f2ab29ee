// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! CSV export of the annotation store

use std::fmt::Write;

use crate::annotation::{AnnotationRecord, LabelMode};

/// Media type of the export
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Serialize records to CSV: a header row, then one row per record in the
/// order given. Fields are quoted when they contain a comma, quote or line
/// break.
pub fn to_csv(records: &[AnnotationRecord], mode: LabelMode) -> String {
    let mut output = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(output, "document,{},comment", mode.label_column());

    for record in records {
        let _ = writeln!(
            output,
            "{},{},{}",
            escape_csv(&record.document),
            escape_csv(&record.labels.joined()),
            escape_csv(&record.comment),
        );
    }

    output
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Labels;

    /// Minimal RFC 4180 reader for checking exports
    fn parse_csv(input: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if in_quotes {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => in_quotes = false,
                    _ => field.push(c),
                }
            } else {
                match c {
                    '"' => in_quotes = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\n' => {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    _ => field.push(c),
                }
            }
        }
        if !field.is_empty() || !row.is_empty() {
            row.push(field);
            rows.push(row);
        }
        rows
    }

    fn multi(doc: &str, labels: &[&str], comment: &str) -> AnnotationRecord {
        AnnotationRecord::new(
            doc,
            Labels::Multi(labels.iter().map(|s| s.to_string()).collect()),
            comment,
        )
    }

    #[test]
    fn test_header_follows_mode() {
        assert_eq!(to_csv(&[], LabelMode::Multi), "document,labels,comment\n");
        assert_eq!(to_csv(&[], LabelMode::Single), "document,label,comment\n");
    }

    #[test]
    fn test_one_line_per_record() {
        let records = vec![
            multi("a.txt", &["Asbestos Report"], ""),
            multi("b.pdf", &[], "no labels"),
            multi("a.txt", &["EPC (Energy Performance Certificate)", "Lift Inspection Reports"], "again"),
        ];

        let csv = to_csv(&records, LabelMode::Multi);
        assert_eq!(csv.lines().count(), records.len() + 1);
        assert_eq!(
            csv.lines().nth(3),
            Some("a.txt,EPC (Energy Performance Certificate); Lift Inspection Reports,again")
        );
    }

    #[test]
    fn test_round_trip_with_special_characters() {
        let records = vec![
            multi("a.txt", &["Asbestos Report", "Custom, with comma"], "nice, clean doc"),
            multi("b \"quoted\".txt", &[], "line one\nline two"),
            multi("c.pdf", &["Fire Safety Certificates"], ""),
        ];

        let csv = to_csv(&records, LabelMode::Multi);
        assert!(csv.contains("\"nice, clean doc\""));

        let rows = parse_csv(&csv);
        assert_eq!(rows.len(), records.len() + 1);
        assert_eq!(rows[0], vec!["document", "labels", "comment"]);
        for (row, record) in rows[1..].iter().zip(&records) {
            assert_eq!(row[0], record.document);
            assert_eq!(row[1], record.labels.joined());
            assert_eq!(row[2], record.comment);
        }
    }

    #[test]
    fn test_single_mode_rows() {
        let records = vec![AnnotationRecord::new(
            "x.txt",
            Labels::Single("Fire Safety Certificates".to_string()),
            "ok",
        )];
        assert_eq!(
            to_csv(&records, LabelMode::Single),
            "document,label,comment\nx.txt,Fire Safety Certificates,ok\n"
        );
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("cr\rlf"), "\"cr\rlf\"");
    }
}
