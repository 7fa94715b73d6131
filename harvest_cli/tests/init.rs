mod common;

use harvest_core::AnyEmptyResult;
use harvest_core::HarvestConfig;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::harvest_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created config file"))
		.stdout(predicates::str::contains("Next steps"));

	let config_path = tmp.path().join("harvest.toml");
	let content = std::fs::read_to_string(&config_path)?;
	assert!(content.contains("working_directory"));
	assert!(content.contains("file_harvest_root"));

	let config = HarvestConfig::load(tmp.path())?;
	assert!(config.is_some_and(|config| config.template_dir() == tmp.path().join(".").join("files")));

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config_path = common::write_file(tmp.path(), ".config/harvest.toml", "existing config")?;

	common::harvest_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&config_path)?, "existing config");
	assert!(!tmp.path().join("harvest.toml").exists());

	Ok(())
}

#[test]
fn no_subcommand_fails() {
	common::harvest_cmd()
		.assert()
		.failure()
		.code(1)
		.stderr(predicates::str::contains("No subcommand specified"));
}
