use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::HarvestError;
use crate::HarvestResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["harvest.toml", ".harvest.toml", ".config/harvest.toml"];

/// Configuration loaded from a `harvest.toml` file.
///
/// ```toml
/// working_directory = "/usr/local/vivo/harvester"
/// file_harvest_root = "/usr/local/vivo/uploads/harvester"
///
/// [paths]
/// templates = "files"
/// scripts = "scripts"
/// uploads = "uploads"
/// harvested_data = "harvested-data/csv"
/// ```
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct HarvestConfig {
	/// Root of the harvester installation. Substituted for
	/// `${WORKING_DIRECTORY}` in scripts.
	pub working_directory: PathBuf,
	/// Root under which uploads and harvested data are stored per session.
	pub file_harvest_root: PathBuf,
	/// Fixed relative subpaths for each kind of artifact.
	#[serde(default)]
	pub paths: PathsConfig,
}

/// Relative locations of each kind of artifact.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
	/// Template files, relative to `working_directory`.
	pub templates: PathBuf,
	/// Script templates, relative to `working_directory`.
	pub scripts: PathBuf,
	/// Per-session upload folders, relative to `file_harvest_root`.
	pub uploads: PathBuf,
	/// Per-session harvest output folders, relative to `file_harvest_root`.
	pub harvested_data: PathBuf,
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			templates: PathBuf::from("files"),
			scripts: PathBuf::from("scripts"),
			uploads: PathBuf::from("uploads"),
			harvested_data: PathBuf::from("harvested-data").join("csv"),
		}
	}
}

impl HarvestConfig {
	pub fn new(
		working_directory: impl Into<PathBuf>,
		file_harvest_root: impl Into<PathBuf>,
	) -> Self {
		Self {
			working_directory: working_directory.into(),
			file_harvest_root: file_harvest_root.into(),
			paths: PathsConfig::default(),
		}
	}

	/// A config that keeps everything under a single directory.
	pub fn for_root(root: &Path) -> Self {
		Self::new(root, root)
	}

	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	///
	/// Relative roots in the file are resolved against `root`.
	pub fn load(root: &Path) -> HarvestResult<Option<HarvestConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;

		tracing::debug!(path = %config_path.display(), "loaded harvest config");
		Ok(Some(config.resolved_against(root)))
	}

	/// Parse config file contents without resolving relative paths.
	pub fn parse(content: &str) -> HarvestResult<HarvestConfig> {
		toml::from_str(content).map_err(|e| HarvestError::ConfigParse(e.to_string()))
	}

	fn resolved_against(mut self, root: &Path) -> Self {
		if self.working_directory.is_relative() {
			self.working_directory = root.join(&self.working_directory);
		}
		if self.file_harvest_root.is_relative() {
			self.file_harvest_root = root.join(&self.file_harvest_root);
		}
		self
	}

	/// Directory holding the CSV template files.
	pub fn template_dir(&self) -> PathBuf {
		self.working_directory.join(&self.paths.templates)
	}

	/// Directory holding the harvest script templates.
	pub fn script_dir(&self) -> PathBuf {
		self.working_directory.join(&self.paths.scripts)
	}

	/// Upload folder for a session.
	pub fn uploads_dir(&self, session_id: &str) -> PathBuf {
		self.file_harvest_root.join(&self.paths.uploads).join(session_id)
	}

	/// Harvest output folder for a session.
	pub fn harvested_data_dir(&self, session_id: &str) -> PathBuf {
		self.file_harvest_root
			.join(&self.paths.harvested_data)
			.join(session_id)
	}
}
