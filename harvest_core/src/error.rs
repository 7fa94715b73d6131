use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum HarvestError {
	#[error(transparent)]
	#[diagnostic(code(harvest::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(harvest::config_parse),
		help("check that harvest.toml is valid TOML with `working_directory` and `file_harvest_root`")
	)]
	ConfigParse(String),

	#[error("template file has no header row: `{path}`")]
	#[diagnostic(
		code(harvest::empty_template),
		help("the first line of a template file lists the expected column names")
	)]
	EmptyTemplate { path: String },

	#[error("unknown job type: `{0}`")]
	#[diagnostic(
		code(harvest::unknown_job_type),
		help("run `harvest jobs` to list the available job types")
	)]
	UnknownJobType(String),

	#[error("invalid session id: `{0}`")]
	#[diagnostic(
		code(harvest::invalid_session_id),
		help("session ids name a single directory and cannot be empty or contain path separators")
	)]
	InvalidSessionId(String),
}

pub type HarvestResult<T> = Result<T, HarvestError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
