use std::path::Path;

use crate::HarvestResult;
use crate::read_text;

/// Replaced with the harvester's working directory.
pub const WORKING_DIRECTORY_TOKEN: &str = "${WORKING_DIRECTORY}";
/// Replaced with the folder holding this session's uploaded files.
pub const UPLOADS_FOLDER_TOKEN: &str = "${UPLOADS_FOLDER}";
/// Replaced with the folder the harvest writes its output to.
pub const HARVESTED_DATA_PATH_TOKEN: &str = "${HARVESTED_DATA_PATH}";

const TOKEN_OPENER: &str = "${";

/// The resolved values substituted into a script template.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ScriptSubstitutions {
	pub working_directory: String,
	pub uploads_folder: String,
	pub harvested_data_path: String,
}

impl ScriptSubstitutions {
	/// Build substitutions from directory paths. Each value is rendered with a
	/// trailing separator so templates can append file names directly.
	pub fn from_dirs(
		working_directory: &Path,
		uploads_folder: &Path,
		harvested_data_path: &Path,
	) -> Self {
		Self {
			working_directory: dir_string(working_directory),
			uploads_folder: dir_string(uploads_folder),
			harvested_data_path: dir_string(harvested_data_path),
		}
	}

	fn pairs(&self) -> [(&'static str, &str); 3] {
		[
			(WORKING_DIRECTORY_TOKEN, self.working_directory.as_str()),
			(UPLOADS_FOLDER_TOKEN, self.uploads_folder.as_str()),
			(HARVESTED_DATA_PATH_TOKEN, self.harvested_data_path.as_str()),
		]
	}
}

/// Render a directory path as a string ending in the platform separator.
pub fn dir_string(path: &Path) -> String {
	let mut rendered = path.display().to_string();
	if !rendered.ends_with(std::path::MAIN_SEPARATOR) && !rendered.ends_with('/') {
		rendered.push(std::path::MAIN_SEPARATOR);
	}
	rendered
}

/// Replace every occurrence of the known placeholder tokens in `template`.
///
/// The template is scanned once from left to right, so substituted values are
/// inserted verbatim and never rescanned. Any other `${...}` text is kept as
/// is.
pub fn substitute_placeholders(template: &str, substitutions: &ScriptSubstitutions) -> String {
	let pairs = substitutions.pairs();
	let mut output = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(start) = rest.find(TOKEN_OPENER) {
		output.push_str(&rest[..start]);
		let candidate = &rest[start..];

		let matched = pairs
			.iter()
			.find(|(token, _)| candidate.starts_with(token));

		if let Some((token, value)) = matched {
			output.push_str(value);
			rest = &candidate[token.len()..];
		} else {
			output.push_str(TOKEN_OPENER);
			rest = &candidate[TOKEN_OPENER.len()..];
		}
	}

	output.push_str(rest);
	output
}

/// Read a script template and substitute the placeholder tokens.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn try_render_script(
	path: &Path,
	substitutions: &ScriptSubstitutions,
) -> HarvestResult<String> {
	let template = read_text(path)?;
	Ok(substitute_placeholders(&template, substitutions))
}

/// Read a script template and substitute the placeholder tokens.
///
/// Returns `None` when the template cannot be read; the failure is logged.
pub fn render_script(path: &Path, substitutions: &ScriptSubstitutions) -> Option<String> {
	match try_render_script(path, substitutions) {
		Ok(script) => Some(script),
		Err(error) => {
			tracing::error!(%error, path = %path.display(), "failed to read script template");
			None
		}
	}
}
