mod common;

use std::path::Path;

use harvest_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use serde_json::Value;

fn person_project(root: &Path) -> std::io::Result<()> {
	common::write_file(root, "files/persontemplate.csv", "firstName,lastName\n")?;
	Ok(())
}

#[test]
fn validate_passes_matching_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	person_project(tmp.path())?;
	let upload = common::write_file(tmp.path(), "upload.csv", "firstName,lastName\nJohn,Doe\nJane,\n")?;

	common::harvest_cmd()
		.arg("validate")
		.arg("--path")
		.arg(tmp.path())
		.arg("--job")
		.arg("csvPerson")
		.arg(&upload)
		.assert()
		.success()
		.stdout(predicates::str::contains("Validation passed"))
		.stdout(predicates::str::contains("Person template"));

	Ok(())
}

#[test]
fn validate_matches_job_key_case_insensitively() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	person_project(tmp.path())?;
	let upload = common::write_file(tmp.path(), "upload.csv", "firstName,lastName\n")?;

	common::harvest_cmd()
		.arg("validate")
		.arg("--path")
		.arg(tmp.path())
		.arg("-j")
		.arg("CSVPERSON")
		.arg(&upload)
		.assert()
		.success();

	Ok(())
}

#[test]
fn validate_reports_row_mismatch() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	person_project(tmp.path())?;
	let upload = common::write_file(tmp.path(), "upload.csv", "firstName,lastName\nJohn\n")?;

	common::harvest_cmd()
		.arg("validate")
		.arg("--path")
		.arg(tmp.path())
		.arg("--job")
		.arg("csvPerson")
		.arg(&upload)
		.assert()
		.failure()
		.code(1)
		.stderr(predicates::str::contains(
			"Mismatch in number of entries in row 1: expected 2, found 1",
		));

	Ok(())
}

#[test]
fn validate_reports_header_mismatch() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	person_project(tmp.path())?;
	let upload = common::write_file(tmp.path(), "upload.csv", "firstName,surname\nJohn,Doe\n")?;

	common::harvest_cmd()
		.arg("validate")
		.arg("--path")
		.arg(tmp.path())
		.arg("--job")
		.arg("csvPerson")
		.arg(&upload)
		.assert()
		.code(1)
		.stderr(
			predicates::str::contains("file header column 2 = surname")
				.and(predicates::str::contains("template column 2 = lastName")),
		);

	Ok(())
}

#[test]
fn validate_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	person_project(tmp.path())?;
	let upload = common::write_file(tmp.path(), "upload.csv", "")?;

	let output = common::harvest_cmd()
		.arg("validate")
		.arg("--path")
		.arg(tmp.path())
		.arg("--job")
		.arg("csvPerson")
		.arg("--format")
		.arg("json")
		.arg(&upload)
		.output()?;
	assert_eq!(output.status.code(), Some(1));

	let result: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(result["ok"], false);
	assert_eq!(result["job"], "csvPerson");
	assert_eq!(result["message"], "No data in file");

	Ok(())
}

#[test]
fn validate_uses_config_paths() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"harvest.toml",
		"working_directory = \"install\"\nfile_harvest_root = \"data\"\n\n[paths]\ntemplates = \
		 \"csv-templates\"\n",
	)?;
	common::write_file(
		tmp.path(),
		"install/csv-templates/granttemplate.csv",
		"grantId,title\n",
	)?;
	let upload = common::write_file(tmp.path(), "grants.csv", "grantId,title\ng1,Ocean Study\n")?;

	common::harvest_cmd()
		.arg("validate")
		.arg("--path")
		.arg(tmp.path())
		.arg("--job")
		.arg("csvGrant")
		.arg(&upload)
		.assert()
		.success();

	Ok(())
}

#[test]
fn validate_missing_file_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	person_project(tmp.path())?;

	common::harvest_cmd()
		.arg("validate")
		.arg("--path")
		.arg(tmp.path())
		.arg("--job")
		.arg("csvPerson")
		.arg(tmp.path().join("missing.csv"))
		.assert()
		.code(2)
		.stdout(predicates::str::contains("Validation").not());

	Ok(())
}

#[test]
fn validate_unknown_job_type() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let upload = common::write_file(tmp.path(), "upload.csv", "a\n")?;

	common::harvest_cmd()
		.arg("validate")
		.arg("--path")
		.arg(tmp.path())
		.arg("--job")
		.arg("csvBook")
		.arg(&upload)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unknown job type"));

	Ok(())
}
