use std::path::Path;

use derive_more::Deref;

use crate::HarvestResult;

/// The field delimiter for uploaded and template files.
pub const FIELD_DELIMITER: char = ',';

/// Opens and closes a quoted field. Doubled inside a quoted field it stands
/// for a literal quote.
pub const QUOTE: char = '"';

/// The fields parsed from a single line of a delimited file.
///
/// Rows carry no identity beyond their position in the file. Row `0` is the
/// header row.
#[derive(Debug, Clone, Default, Deref, Eq, PartialEq)]
pub struct Row(Vec<String>);

impl Row {
	pub fn new(fields: Vec<String>) -> Self {
		Self(fields)
	}
}

/// Parse a single line into a [`Row`].
///
/// An empty line yields a row with no fields. Fields are split on unquoted
/// commas; a field that opens with `"` may contain commas and `""` escapes.
/// A quote that is never closed is literal text, so the rest of the line is
/// split on every comma.
///
/// A line that ends in a bare comma does **not** produce a trailing empty
/// field: `"John,"` parses to `["John"]`. Callers that need the true field
/// count pair the row with [`trailing_delimiter_flags`].
pub fn parse_row(line: &str) -> Row {
	if line.is_empty() {
		return Row::default();
	}

	let mut fields = Vec::new();
	let mut field = String::new();
	let mut chars = line.char_indices().peekable();
	let mut open_quote = None;
	let mut after_delimiter = false;

	while let Some((index, ch)) = chars.next() {
		after_delimiter = false;

		if open_quote.is_some() {
			if ch != QUOTE {
				field.push(ch);
			} else if chars.peek().map(|&(_, next)| next) == Some(QUOTE) {
				field.push(QUOTE);
				chars.next();
			} else {
				open_quote = None;
			}
		} else if ch == QUOTE && field.is_empty() {
			open_quote = Some(index);
		} else if ch == FIELD_DELIMITER {
			fields.push(std::mem::take(&mut field));
			after_delimiter = true;
		} else {
			field.push(ch);
		}
	}

	if let Some(start) = open_quote {
		let mut rest: Vec<String> = line[start..]
			.split(FIELD_DELIMITER)
			.map(str::to_string)
			.collect();
		// The first piece starts with the quote, so only a bare trailing comma
		// leaves an empty last piece.
		if rest.last().is_some_and(String::is_empty) {
			rest.pop();
		}
		fields.extend(rest);
		return Row(fields);
	}

	if !after_delimiter {
		fields.push(field);
	}

	Row(fields)
}

/// Split text into lines. `\r\n`, `\n` and a lone `\r` all end a line, and a
/// final line ending does not start another line.
pub fn split_lines(content: &str) -> Vec<&str> {
	let mut lines = Vec::new();
	let mut rest = content;

	while !rest.is_empty() {
		let Some(end) = rest.find(['\r', '\n']) else {
			lines.push(rest);
			break;
		};

		lines.push(&rest[..end]);
		let ending = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
		rest = &rest[end + ending..];
	}

	lines
}

/// Parse delimited text into rows, one row per line as split by
/// [`split_lines`]. Rows never span lines.
pub fn parse_rows(content: &str) -> Vec<Row> {
	split_lines(content).into_iter().map(parse_row).collect()
}

/// Scan raw lines and record, for each line index, whether the line text ends
/// with the field delimiter.
///
/// This runs over the raw text rather than the parsed rows so that the index
/// stays aligned with [`parse_rows`] while [`parse_row`] stays free of the
/// correction.
pub fn trailing_delimiter_flags(content: &str) -> Vec<bool> {
	split_lines(content)
		.into_iter()
		.map(|line| line.ends_with(FIELD_DELIMITER))
		.collect()
}

/// Read a text file. Bytes that are not valid UTF-8 are replaced rather than
/// rejected, so uploads saved in a legacy encoding still load.
pub fn read_text(path: &Path) -> HarvestResult<String> {
	let bytes = std::fs::read(path)?;
	Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a file and parse it into rows.
pub fn read_rows(path: &Path) -> HarvestResult<Vec<Row>> {
	let content = read_text(path)?;
	Ok(parse_rows(&content))
}
