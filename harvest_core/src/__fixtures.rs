use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::HarvestConfig;
use crate::HarvestResult;
use crate::ScriptSubstitutions;

pub const PERSON_HEADER: &str = "firstName,lastName";
pub const GRANT_HEADER: &str = "grantId,title,principalInvestigator,startDate";

pub const GRANT_SCRIPT: &str = "#!/bin/bash\n\ncd ${WORKING_DIRECTORY}\nharvester/bin/csvtojdbc \
                                -i ${UPLOADS_FOLDER}\nharvester/bin/transfer -o \
                                ${HARVESTED_DATA_PATH}additions.rdf.xml\n";

pub fn header(fields: &[&str]) -> Vec<String> {
	fields.iter().map(ToString::to_string).collect()
}

pub fn write_file(dir: &Path, relative: &str, content: &str) -> HarvestResult<PathBuf> {
	let path = dir.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(&path, content)?;
	Ok(path)
}

/// A harvester installation in a temporary directory with the grant and
/// person templates and the grant script template in their default
/// locations.
pub fn harvester_install() -> HarvestResult<(TempDir, HarvestConfig)> {
	let tmp = tempfile::tempdir()?;
	let config = HarvestConfig::new(tmp.path().join("harvester"), tmp.path().join("harvest-root"));

	write_file(
		&config.template_dir(),
		"granttemplate.csv",
		&format!("{GRANT_HEADER}\n"),
	)?;
	write_file(
		&config.template_dir(),
		"persontemplate.csv",
		&format!("{PERSON_HEADER}\n"),
	)?;
	write_file(&config.script_dir(), "CSVtoRDFgrant.sh", GRANT_SCRIPT)?;

	Ok((tmp, config))
}

pub fn substitutions() -> ScriptSubstitutions {
	ScriptSubstitutions {
		working_directory: "/opt/harvester/".to_string(),
		uploads_folder: "/srv/harvest/uploads/abc/".to_string(),
		harvested_data_path: "/srv/harvest/harvested-data/csv/abc/".to_string(),
	}
}
