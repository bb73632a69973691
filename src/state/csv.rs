// CSV text encoding for table exports.
// Comma-delimited, `\n`-terminated rows, quoting only when a cell needs it.

use std::borrow::Cow;

/// Quote a cell if it contains a comma, a double quote, or a newline.
/// Internal double quotes are doubled.
pub fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Append one escaped, newline-terminated row.
pub fn push_row<I, S>(out: &mut String, cells: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_cell(cell.as_ref()));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cell_untouched() {
        assert_eq!(escape_cell("Mario Rossi"), "Mario Rossi");
        assert_eq!(escape_cell(""), "");
    }

    #[test]
    fn test_comma_is_quoted() {
        assert_eq!(escape_cell("Rossi, Mario"), "\"Rossi, Mario\"");
    }

    #[test]
    fn test_quote_is_doubled() {
        assert_eq!(escape_cell("The \"VIP\" group"), "\"The \"\"VIP\"\" group\"");
    }

    #[test]
    fn test_newline_is_quoted() {
        assert_eq!(escape_cell("line one\nline two"), "\"line one\nline two\"");
    }

    #[test]
    fn test_carriage_return_alone_is_not_quoted() {
        assert_eq!(escape_cell("a\rb"), "a\rb");
    }

    #[test]
    fn test_push_row() {
        let mut out = String::new();
        push_row(&mut out, ["1", "Rossi, Mario", "Milano"]);
        push_row(&mut out, ["2", "Sara", "Tutti"]);
        assert_eq!(out, "1,\"Rossi, Mario\",Milano\n2,Sara,Tutti\n");
    }
}
