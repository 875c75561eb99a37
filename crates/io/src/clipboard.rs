// Clipboard codec - tab-separated text with RFC 4180 quoting
//
// This format is the de facto wire protocol between the grid and external
// spreadsheet tools: tab between fields, newline between rows, quotes
// around any field containing a tab, line break or quote character.

use labtable_core::selection::RangeBounds;
use labtable_engine::grid::Grid;

/// Serialize the cells under `bounds` as tab-separated, newline-terminated
/// text.
///
/// One line per row in visible order; fields holding a tab, newline, CR or
/// quote are wrapped in quotes with internal quotes doubled, so the output
/// pastes cleanly into third-party spreadsheet tools and parses back.
pub fn serialize(grid: &Grid, bounds: &RangeBounds) -> Result<String, String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(Vec::new());

    for row in bounds.start_row..=bounds.end_row {
        let mut record: Vec<String> = Vec::with_capacity(bounds.col_count());
        for col in bounds.start_col..=bounds.end_col {
            let value = grid
                .column(col)
                .and_then(|column| grid.value(row, &column.id))
                .map(|v| v.to_display())
                .unwrap_or_default();
            record.push(value);
        }
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Parse clipboard text into rows of string cells.
///
/// Best effort: spreadsheet interop data is frequently irregular, and
/// clipboard input is never rejected outright.
/// - `\r\n` and `\n` line endings both accepted, trailing newline ignored
/// - quoted fields may span delimiters and line breaks
/// - an unterminated quote consumes to end of input
/// - short rows pass through as-is (the paste engine accepts jagged
///   blocks)
/// - empty input parses to an empty block
pub fn parse(text: &str) -> Vec<Vec<String>> {
    if text.is_empty() {
        return Vec::new();
    }

    // Fast path for text without quotes: plain line/tab split. This also
    // preserves interior empty lines, which the csv reader would drop.
    if !text.contains('"') {
        return text
            .lines()
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect();
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            // Keep whatever parses; a malformed row is skipped, not fatal
            Err(_) => continue,
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use labtable_engine::grid::{Column, Record};

    fn grid() -> Grid {
        Grid::new(
            vec![Column::text("name", "Name"), Column::number("ph", "pH")],
            vec![
                Record::new("r1").with_field("name", "A").with_field("ph", 7.0),
                Record::new("r2").with_field("name", "B").with_field("ph", 6.5),
                Record::new("r3").with_field("name", "C").with_field("ph", 7.2),
            ],
        )
    }

    #[test]
    fn test_serialize_range() {
        let text = serialize(&grid(), &RangeBounds::new(1, 0, 2, 1)).unwrap();
        assert_eq!(text, "B\t6.5\nC\t7.2\n");
    }

    #[test]
    fn test_serialize_quotes_special_characters() {
        let g = Grid::new(
            vec![Column::text("notes", "Notes")],
            vec![
                Record::new("r1").with_field("notes", "tab\there"),
                Record::new("r2").with_field("notes", "line\nbreak"),
                Record::new("r3").with_field("notes", "say \"hi\""),
            ],
        );
        let text = serialize(&g, &RangeBounds::new(0, 0, 2, 0)).unwrap();
        assert_eq!(text, "\"tab\there\"\n\"line\nbreak\"\n\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_parse_plain_block() {
        assert_eq!(
            parse("X\t5.0\nY\t5.5\n"),
            vec![vec!["X", "5.0"], vec!["Y", "5.5"]]
        );
    }

    #[test]
    fn test_parse_crlf_and_trailing_newline() {
        assert_eq!(
            parse("X\t5.0\r\nY\t5.5\r\n"),
            vec![vec!["X", "5.0"], vec!["Y", "5.5"]]
        );
        assert_eq!(parse("X"), vec![vec!["X"]]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_jagged_rows() {
        assert_eq!(
            parse("a\tb\tc\nd\ne\tf\n"),
            vec![vec!["a", "b", "c"], vec!["d"], vec!["e", "f"]]
        );
    }

    #[test]
    fn test_parse_quoted_fields() {
        assert_eq!(
            parse("\"tab\there\"\t\"say \"\"hi\"\"\"\n"),
            vec![vec!["tab\there", "say \"hi\""]]
        );
    }

    #[test]
    fn test_parse_quoted_field_spanning_lines() {
        assert_eq!(
            parse("\"line\nbreak\"\tplain\n"),
            vec![vec!["line\nbreak", "plain"]]
        );
    }

    #[test]
    fn test_parse_unterminated_quote_consumes_to_end() {
        // Best effort: never reject clipboard input outright
        assert_eq!(parse("\"abc\tdef\n"), vec![vec!["abc\tdef\n"]]);
    }

    #[test]
    fn test_parse_preserves_interior_empty_line() {
        assert_eq!(parse("a\n\nb\n"), vec![vec!["a"], vec![""], vec!["b"]]);
    }

    #[test]
    fn test_round_trip() {
        let g = Grid::new(
            vec![
                Column::text("name", "Name"),
                Column::text("notes", "Notes"),
                Column::number("ph", "pH"),
            ],
            vec![
                Record::new("r1")
                    .with_field("name", "A")
                    .with_field("notes", "has\ttab and \"quote\"")
                    .with_field("ph", 7.0),
                Record::new("r2")
                    .with_field("name", "B")
                    .with_field("notes", "multi\nline")
                    .with_field("ph", 6.5),
            ],
        );
        let text = serialize(&g, &RangeBounds::new(0, 0, 1, 2)).unwrap();
        assert_eq!(
            parse(&text),
            vec![
                vec!["A", "has\ttab and \"quote\"", "7"],
                vec!["B", "multi\nline", "6.5"],
            ]
        );
    }
}
