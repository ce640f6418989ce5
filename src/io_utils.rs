//! Line encoding for the plain comma-delimited format.
//!
//! Files carry no header and no quoting: a field is whatever sits between two
//! commas, quote characters included. Rows may have different lengths and
//! every line, blank ones included, is one row.

use std::io::{self, BufRead, Write};

use csv::{QuoteStyle, Terminator};

use crate::store::Row;

pub const DELIMITER: u8 = b',';
pub const LINE_TERMINATOR: u8 = b'\n';

pub fn open_csv_writer<W>(writer: W) -> csv::Writer<W>
where
    W: Write,
{
    let mut builder = csv::WriterBuilder::new();
    builder
        .has_headers(false)
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(LINE_TERMINATOR))
        .flexible(true);
    builder.from_writer(writer)
}

/// Reads every line from `reader` as a row, dropping trailing whitespace from
/// the end of each line.
pub fn read_rows<R>(reader: R) -> io::Result<Vec<Row>>
where
    R: BufRead,
{
    reader
        .lines()
        .map(|line| line.map(|text| split_row(text.trim_end())))
        .collect()
}

/// Encodes `row` as one terminated line.
///
/// A row holding a single empty field is a bare terminator; the csv writer
/// would quote it as `""` regardless of the quote style.
pub fn encode_row(row: &[String]) -> io::Result<Vec<u8>> {
    if is_blank(row) {
        return Ok(vec![LINE_TERMINATOR]);
    }
    let mut writer = open_csv_writer(Vec::new());
    writer.write_record(row)?;
    writer.into_inner().map_err(|err| err.into_error())
}

pub fn write_row<W>(out: &mut W, row: &[String]) -> io::Result<()>
where
    W: Write,
{
    out.write_all(&encode_row(row)?)
}

fn is_blank(row: &[String]) -> bool {
    match row {
        [] => true,
        [only] => only.is_empty(),
        _ => false,
    }
}

/// Splits one line into fields. Nothing is trimmed or unescaped.
pub fn split_row(line: &str) -> Row {
    line.split(char::from(DELIMITER)).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_from(text: &str) -> Vec<Row> {
        read_rows(text.as_bytes()).unwrap()
    }

    fn text_from(rows: &[Row]) -> String {
        let mut out = Vec::new();
        for row in rows {
            write_row(&mut out, row).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn reader_splits_on_commas_without_unquoting() {
        assert_eq!(rows_from("a,\"b\",c\n"), vec![row(&["a", "\"b\"", "c"])]);
    }

    #[test]
    fn reader_accepts_ragged_rows_and_crlf() {
        assert_eq!(rows_from("a,b\r\nc\r\n"), vec![row(&["a", "b"]), row(&["c"])]);
    }

    #[test]
    fn reader_trims_trailing_whitespace_only() {
        assert_eq!(rows_from(" a,b  \t\n"), vec![row(&[" a", "b"])]);
    }

    #[test]
    fn reader_keeps_blank_lines_as_single_empty_field_rows() {
        assert_eq!(
            rows_from("a,b\n\nc,d\n"),
            vec![row(&["a", "b"]), row(&[""]), row(&["c", "d"])]
        );
        assert_eq!(rows_from("\n"), vec![row(&[""])]);
        assert_eq!(rows_from("   \n"), vec![row(&[""])]);
    }

    #[test]
    fn reader_rejects_invalid_utf8() {
        let err = read_rows(&[0x61, 0xff, b'\n'][..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn writer_joins_fields_without_quoting() {
        let rows = vec![row(&["a b", "\"c\""]), row(&["1", "2", "3"])];
        assert_eq!(text_from(&rows), "a b,\"c\"\n1,2,3\n");
    }

    #[test]
    fn writer_emits_blank_rows_as_bare_terminators() {
        let rows = vec![row(&["a"]), row(&[""]), Vec::new(), row(&["b"])];
        assert_eq!(text_from(&rows), "a\n\n\nb\n");
    }

    #[test]
    fn writer_keeps_empty_fields_beside_others() {
        let rows = vec![row(&["", "x"]), row(&["", ""]), row(&["y", ""])];
        assert_eq!(text_from(&rows), ",x\n,\ny,\n");
    }

    #[test]
    fn split_row_keeps_empty_fields() {
        assert_eq!(split_row("a,,b,"), row(&["a", "", "b", ""]));
    }
}
