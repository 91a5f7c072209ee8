//! Lenient CSV tokenizer for vendor exports.
//!
//! Exports come from several scraping and commerce tools that disagree on
//! quoting and line endings, so the scanner never rejects input: unbalanced
//! quotes simply run to end of file and whatever was accumulated is flushed.
//! Cells are returned verbatim; trimming is left to callers.

/// One tokenized CSV record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow(Vec<String>);

impl RawRow {
    #[must_use]
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Cell at `column`, or `None` when the column is absent from the file's
    /// layout or the row is too short to reach it.
    #[must_use]
    pub fn get(&self, column: Option<usize>) -> Option<&str> {
        column.and_then(|idx| self.0.get(idx)).map(String::as_str)
    }

    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Splits `text` into rows of cells.
///
/// - `""` inside a quoted cell is a literal `"`.
/// - `\n`, `\r`, and `\r\n` end a row outside quotes; inside quotes they are
///   kept as part of the cell.
/// - Blank lines (a row that is a single empty cell) are dropped.
/// - A leading UTF-8 byte order mark is ignored so the first header still
///   matches its alias.
#[must_use]
pub fn tokenize(text: &str) -> Vec<RawRow> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => row.push(std::mem::take(&mut cell)),
            '\n' | '\r' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut cell));
                let finished = std::mem::take(&mut row);
                if !is_blank_line(&finished) {
                    rows.push(RawRow(finished));
                }
            }
            _ => cell.push(c),
        }
    }

    if !row.is_empty() || !cell.is_empty() {
        row.push(cell);
        rows.push(RawRow(row));
    }

    rows
}

fn is_blank_line(cells: &[String]) -> bool {
    matches!(cells, [only] if only.is_empty())
}

/// Wraps `value` in double quotes, doubling any quotes inside it.
#[must_use]
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
