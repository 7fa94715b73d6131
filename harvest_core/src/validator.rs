use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

use crate::HarvestError;
use crate::HarvestResult;
use crate::Row;
use crate::parse_rows;
use crate::read_rows;
use crate::read_text;
use crate::trailing_delimiter_flags;

/// A structural difference between an uploaded file and its template.
///
/// These are ordinary validation outcomes rather than failures of the
/// validator itself. The [`Display`](std::fmt::Display) output is the
/// human-readable message shown to whoever uploaded the file.
#[derive(Debug, Clone, Diagnostic, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum StructuralMismatch {
	#[error("No data in file")]
	#[diagnostic(code(harvest::empty_file))]
	EmptyFile,

	#[error(
		"File header does not match template: file header has {} column(s) [{}], template has {} \
		 column(s) [{}]",
		file_header.len(),
		file_header.join(", "),
		template_header.len(),
		template_header.join(", ")
	)]
	#[diagnostic(
		code(harvest::header_shape),
		help("the first line must list exactly the template's column names")
	)]
	HeaderShape {
		file_header: Vec<String>,
		template_header: Vec<String>,
	},

	#[error(
		"File header does not match template: file header column {column} = {found}, template \
		 column {column} = {expected}"
	)]
	#[diagnostic(
		code(harvest::header_value),
		help("header names are compared exactly, including case and whitespace")
	)]
	HeaderValue {
		/// 1-based column index.
		column: usize,
		found: String,
		expected: String,
	},

	#[error("Mismatch in number of entries in row {row}: expected {expected}, found {found}")]
	#[diagnostic(code(harvest::row_length))]
	RowLength {
		/// 0-based row index; the header is row 0.
		row: usize,
		expected: usize,
		found: usize,
	},
}

/// The outcome of structurally validating a file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Verdict {
	Passed,
	Failed(StructuralMismatch),
}

impl Verdict {
	pub fn is_passed(&self) -> bool {
		matches!(self, Self::Passed)
	}

	pub fn mismatch(&self) -> Option<&StructuralMismatch> {
		match self {
			Self::Passed => None,
			Self::Failed(mismatch) => Some(mismatch),
		}
	}

	/// `None` when validation passed, otherwise the mismatch message.
	pub fn into_message(self) -> Option<String> {
		match self {
			Self::Passed => None,
			Self::Failed(mismatch) => Some(mismatch.to_string()),
		}
	}
}

impl From<Result<(), StructuralMismatch>> for Verdict {
	fn from(result: Result<(), StructuralMismatch>) -> Self {
		match result {
			Ok(()) => Self::Passed,
			Err(mismatch) => Self::Failed(mismatch),
		}
	}
}

/// Check parsed rows against a template header.
///
/// `trailing_delimiters[i]` records whether raw line `i` ended in a bare
/// delimiter. A data row's effective field count is its parsed field count
/// plus one when the flag is set. Row `0` is compared value by value and is
/// not corrected. Data rows with no fields are skipped.
pub fn check_rows(
	template_header: &[String],
	rows: &[Row],
	trailing_delimiters: &[bool],
) -> Verdict {
	check_rows_inner(template_header, rows, trailing_delimiters).into()
}

fn check_rows_inner(
	template_header: &[String],
	rows: &[Row],
	trailing_delimiters: &[bool],
) -> Result<(), StructuralMismatch> {
	let Some((header, data)) = rows.split_first() else {
		return Err(StructuralMismatch::EmptyFile);
	};

	check_header(template_header, header)?;

	for (offset, row) in data.iter().enumerate() {
		let index = offset + 1;
		if row.is_empty() {
			continue;
		}

		let ends_in_delimiter = trailing_delimiters.get(index).copied().unwrap_or(false);
		let effective = row.len() + usize::from(ends_in_delimiter);
		if effective != template_header.len() {
			return Err(StructuralMismatch::RowLength {
				row: index,
				expected: template_header.len(),
				found: effective,
			});
		}
	}

	Ok(())
}

fn check_header(template_header: &[String], header: &Row) -> Result<(), StructuralMismatch> {
	if header.len() != template_header.len() {
		return Err(StructuralMismatch::HeaderShape {
			file_header: header.to_vec(),
			template_header: template_header.to_vec(),
		});
	}

	let first_difference = header
		.iter()
		.zip(template_header)
		.position(|(found, expected)| found != expected);

	match first_difference {
		Some(index) => Err(StructuralMismatch::HeaderValue {
			column: index + 1,
			found: header[index].clone(),
			expected: template_header[index].clone(),
		}),
		None => Ok(()),
	}
}

/// Validate the structure of `candidate` against the header of `template`.
///
/// Read failures and an empty template are returned as errors; structural
/// differences are returned as [`Verdict::Failed`].
#[tracing::instrument(
	level = "debug",
	skip_all,
	fields(candidate = %candidate.display(), template = %template.display())
)]
pub fn check_upload(candidate: &Path, template: &Path) -> HarvestResult<Verdict> {
	let template_header = read_rows(template)?
		.into_iter()
		.next()
		.ok_or_else(|| HarvestError::EmptyTemplate {
			path: template.display().to_string(),
		})?;

	let content = read_text(candidate)?;
	let rows = parse_rows(&content);
	let trailing_delimiters = trailing_delimiter_flags(&content);

	let verdict = check_rows(&template_header, &rows, &trailing_delimiters);
	match &verdict {
		Verdict::Passed => tracing::debug!(rows = rows.len(), "upload matches template"),
		Verdict::Failed(mismatch) => tracing::debug!(%mismatch, "upload does not match template"),
	}

	Ok(verdict)
}

/// Validate `candidate` against `template`, returning `None` when the file
/// conforms and a message otherwise.
///
/// Structural mismatches produce their descriptive message. Read failures are
/// logged and produce the underlying error text unchanged.
pub fn validate_upload(candidate: &Path, template: &Path) -> Option<String> {
	match check_upload(candidate, template) {
		Ok(verdict) => verdict.into_message(),
		Err(error) => {
			tracing::error!(%error, candidate = %candidate.display(), "failed to validate upload");
			Some(error.to_string())
		}
	}
}
