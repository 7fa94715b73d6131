use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn harvest_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("harvest"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("HARVEST_LOG");
	cmd
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, relative: &str, content: &str) -> std::io::Result<PathBuf> {
	let path = dir.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(&path, content)?;
	Ok(path)
}
