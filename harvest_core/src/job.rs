use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::HarvestConfig;
use crate::HarvestError;
use crate::HarvestResult;
use crate::ScriptSubstitutions;
use crate::Verdict;
use crate::render_script;
use crate::try_render_script;
use crate::validator;

/// File name written into a session's harvested data folder with the triples
/// added by a harvest.
pub const ADDITIONS_FILE_NAME: &str = "additions.rdf.xml";

const TEMPLATE_DOWNLOAD_HELP: &str =
	"Click here to download a template file to assist you with harvesting the data.";

const TEMPLATE_FILL_IN_HELP: &str = "<p>A CSV, or <b>C</b>omma-<b>S</b>eparated <b>V</b>alues \
	file, is a method of storing tabular data in plain text.  The first line of a CSV file \
	contains header information, while each subsequent line contains a data record.</p>\n<p>The \
	template we provide contains only the header, which you will then fill in accordingly.  For \
	example, if the template contains the text \"firstName,lastName\", then you might add two \
	more lines, \"John,Doe\" and \"Jane,Public\".</p>\n";

/// A kind of CSV harvest. The set of job types is fixed; see [`JOB_TYPES`].
#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct JobType {
	/// Identifier used to select the job type, e.g. from a request parameter.
	pub key: &'static str,
	pub template_file_name: &'static str,
	pub script_file_name: &'static str,
	/// Name for the kind of data imported, such as `"Grant"`.
	pub friendly_name: &'static str,
	/// Heading shown above links to newly harvested entities.
	pub link_header: &'static str,
	/// Shown when a harvest produced no new entities.
	pub no_new_data_message: &'static str,
	/// `rdf:type` values used to pick out harvested entities for links.
	pub rdf_types_for_links: &'static [&'static str],
}

pub static JOB_TYPES: [JobType; 2] = [
	JobType {
		key: "csvGrant",
		template_file_name: "granttemplate.csv",
		script_file_name: "CSVtoRDFgrant.sh",
		friendly_name: "Grant",
		link_header: "Imported Grants",
		no_new_data_message: "No new grants were imported.",
		rdf_types_for_links: &["http://vivoweb.org/ontology/core#Grant"],
	},
	JobType {
		key: "csvPerson",
		template_file_name: "persontemplate.csv",
		script_file_name: "CSVtoRDFperson.sh",
		friendly_name: "Person",
		link_header: "Imported Persons",
		no_new_data_message: "No new persons were imported.",
		rdf_types_for_links: &["http://xmlns.com/foaf/0.1/Person"],
	},
];

impl JobType {
	/// Find the job type whose key matches `key`, ignoring ASCII case.
	/// Returns `None` for unknown keys and for `None`.
	pub fn lookup(key: Option<&str>) -> Option<&'static JobType> {
		let key = key?;
		JOB_TYPES
			.iter()
			.find(|job_type| job_type.key.eq_ignore_ascii_case(key))
	}

	/// Whether a job type with this key exists.
	pub fn contains(key: Option<&str>) -> bool {
		Self::lookup(key).is_some()
	}

	/// Like [`JobType::lookup`] but reports unknown keys as an error.
	pub fn require(key: &str) -> HarvestResult<&'static JobType> {
		Self::lookup(Some(key)).ok_or_else(|| HarvestError::UnknownJobType(key.to_string()))
	}

	/// Bind this job type to a session, resolving all of its paths from
	/// `config`.
	pub fn create_job(
		&'static self,
		session_id: &str,
		namespace: &str,
		config: &HarvestConfig,
	) -> HarvestResult<HarvestJob> {
		if !is_valid_session_id(session_id) {
			return Err(HarvestError::InvalidSessionId(session_id.to_string()));
		}

		let job = HarvestJob {
			job_type: self,
			session_id: session_id.to_string(),
			namespace: namespace.to_string(),
			working_directory: config.working_directory.clone(),
			template_file: config.template_dir().join(self.template_file_name),
			script_file: config.script_dir().join(self.script_file_name),
			uploads_folder: config.uploads_dir(session_id),
			harvested_data_path: config.harvested_data_dir(session_id),
		};

		tracing::debug!(
			job_type = self.key,
			session_id,
			template = %job.template_file.display(),
			script = %job.script_file.display(),
			"created harvest job"
		);

		Ok(job)
	}
}

/// Session ids become a single path component under the harvest root.
fn is_valid_session_id(session_id: &str) -> bool {
	!session_id.is_empty()
		&& session_id != "."
		&& session_id != ".."
		&& !session_id.contains(['/', '\\'])
}

/// A harvest bound to one job type and one session.
///
/// All paths are resolved when the job is created and do not change
/// afterwards.
#[derive(Debug, Clone)]
pub struct HarvestJob {
	job_type: &'static JobType,
	session_id: String,
	namespace: String,
	working_directory: PathBuf,
	template_file: PathBuf,
	script_file: PathBuf,
	uploads_folder: PathBuf,
	harvested_data_path: PathBuf,
}

impl HarvestJob {
	pub fn job_type(&self) -> &'static JobType {
		self.job_type
	}

	pub fn session_id(&self) -> &str {
		&self.session_id
	}

	/// Namespace for the URIs minted by the harvest.
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// The template that uploaded files are validated against.
	pub fn template_file_path(&self) -> &Path {
		&self.template_file
	}

	pub fn script_file_path(&self) -> &Path {
		&self.script_file
	}

	pub fn uploads_folder(&self) -> &Path {
		&self.uploads_folder
	}

	pub fn harvested_data_path(&self) -> &Path {
		&self.harvested_data_path
	}

	pub fn additions_file_path(&self) -> PathBuf {
		self.harvested_data_path.join(ADDITIONS_FILE_NAME)
	}

	pub fn page_header(&self) -> String {
		format!("Harvest {} data from CSV file(s)", self.job_type.friendly_name)
	}

	pub fn link_header(&self) -> &'static str {
		self.job_type.link_header
	}

	pub fn no_new_data_message(&self) -> &'static str {
		self.job_type.no_new_data_message
	}

	pub fn rdf_types_for_links(&self) -> &'static [&'static str] {
		self.job_type.rdf_types_for_links
	}

	pub fn template_download_help(&self) -> &'static str {
		TEMPLATE_DOWNLOAD_HELP
	}

	/// HTML help explaining how to fill in the template.
	pub fn template_fill_in_help(&self) -> &'static str {
		TEMPLATE_FILL_IN_HELP
	}

	/// Validate an uploaded file against this job's template. `None` means
	/// the file conforms.
	pub fn validate_upload(&self, candidate: &Path) -> Option<String> {
		validator::validate_upload(candidate, &self.template_file)
	}

	pub fn check_upload(&self, candidate: &Path) -> HarvestResult<Verdict> {
		validator::check_upload(candidate, &self.template_file)
	}

	pub fn script_substitutions(&self) -> ScriptSubstitutions {
		ScriptSubstitutions::from_dirs(
			&self.working_directory,
			&self.uploads_folder,
			&self.harvested_data_path,
		)
	}

	/// The harvest script for this job, or `None` if the script template is
	/// unavailable.
	pub fn script(&self) -> Option<String> {
		render_script(&self.script_file, &self.script_substitutions())
	}

	pub fn try_script(&self) -> HarvestResult<String> {
		try_render_script(&self.script_file, &self.script_substitutions())
	}
}
