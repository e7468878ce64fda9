use std::borrow::Cow;

use comfy_table::{Table, presets::ASCII_BORDERS_ONLY_CONDENSED};

use super::FilterResult;

/// Maximum width for annotation values (last-applied-configuration can be huge)
const MAX_VALUE_WIDTH: usize = 60;

/// Index of the annotation value column
const VALUE_COLUMN: usize = 3;

/// Truncate a string to max_len chars, adding "..." if truncated
fn truncate_value(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        Cow::Borrowed(s)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        Cow::Owned(format!("{}...", truncated))
    }
}

pub struct TableFormatter;

impl TableFormatter {
    pub fn format(result: &FilterResult, no_headers: bool) -> String {
        if result.rows.is_empty() {
            return "(0 rows)".to_string();
        }

        let mut table = Table::new();
        table.load_preset(ASCII_BORDERS_ONLY_CONDENSED);

        if !no_headers {
            table.set_header(&result.columns);
        }

        for row in &result.rows {
            let cells: Vec<Cow<'_, str>> = row
                .iter()
                .enumerate()
                .map(|(idx, val)| {
                    // Multi-line values would break row layout
                    let val = if val.contains('\n') {
                        Cow::Owned(val.replace('\n', " "))
                    } else {
                        Cow::Borrowed(val.as_str())
                    };
                    if idx == VALUE_COLUMN {
                        Cow::Owned(truncate_value(&val, MAX_VALUE_WIDTH).into_owned())
                    } else {
                        val
                    }
                })
                .collect();
            table.add_row(cells);
        }

        let output = table.to_string();
        format!("{}\n({} rows)", output, result.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_value_short() {
        let result = truncate_value("hello", 10);
        assert_eq!(result, "hello");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_value_too_long() {
        let long = "this is a very long string that needs truncation";
        let result = truncate_value(long, 20);
        assert!(result.ends_with("..."));
        assert_eq!(result.chars().count(), 20);
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[test]
    fn test_truncate_value_unicode() {
        let unicode = "日本語テストです長い文字列";
        let result = truncate_value(unicode, 8);
        assert!(result.chars().count() <= 8);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_empty_result() {
        let result = FilterResult::new("k");
        assert_eq!(TableFormatter::format(&result, false), "(0 rows)");
    }

    #[test]
    fn test_truncates_annotation_column_only() {
        let mut result = FilterResult::new("k");
        let long_name = "n".repeat(80);
        result.push("Node", None, &long_name, Some(&"a".repeat(80)));

        let output = TableFormatter::format(&result, false);
        assert!(!output.contains(&"a".repeat(80)));
        assert!(output.contains("..."));
        assert!(output.contains(&long_name));
        assert!(output.ends_with("(1 rows)"));
    }

    #[test]
    fn test_no_headers() {
        let mut result = FilterResult::new("owner");
        result.push("Node", None, "n1", Some("bob"));
        let output = TableFormatter::format(&result, true);
        assert!(!output.contains("KIND"));
        assert!(output.contains("bob"));
    }
}
