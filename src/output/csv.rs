use super::FilterResult;

pub struct CsvFormatter;

/// Quote a field when it contains a separator, quote or newline
fn escape(val: &str) -> String {
    if val.contains(',') || val.contains('"') || val.contains('\n') {
        format!("\"{}\"", val.replace('"', "\"\""))
    } else {
        val.to_string()
    }
}

impl CsvFormatter {
    pub fn format(result: &FilterResult, no_headers: bool) -> String {
        let mut lines = Vec::with_capacity(result.rows.len() + 1);

        if !no_headers {
            let header: Vec<String> = result.columns.iter().map(|c| escape(c)).collect();
            lines.push(header.join(","));
        }

        for row in &result.rows {
            let escaped: Vec<String> = row.iter().map(|val| escape(val)).collect();
            lines.push(escaped.join(","));
        }

        lines.join("\n")
    }
}
