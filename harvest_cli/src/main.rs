use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use harvest_cli::Commands;
use harvest_cli::HarvestCli;
use harvest_cli::LOG_ENV;
use harvest_cli::OutputFormat;
use harvest_core::AnyEmptyResult;
use harvest_core::HarvestConfig;
use harvest_core::HarvestError;
use harvest_core::HarvestJob;
use harvest_core::JOB_TYPES;
use harvest_core::JobType;
use harvest_core::Verdict;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

const SAMPLE_CONFIG: &str = "# harvest configuration\n\n# Root of the harvester installation. \
                             Substituted for ${WORKING_DIRECTORY}.\nworking_directory = \
                             \".\"\n\n# Uploads and harvested data are stored per session under \
                             this directory.\nfile_harvest_root = \".\"\n\n# Locations of each \
                             kind of artifact. These are the defaults.\n# [paths]\n# templates = \
                             \"files\"\n# scripts = \"scripts\"\n# uploads = \"uploads\"\n# \
                             harvested_data = \"harvested-data/csv\"\n";

fn main() {
	let args = HarvestCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Jobs { format }) => run_jobs(*format),
		Some(Commands::Validate {
			job,
			session,
			format,
			file,
		}) => run_validate(&args, job, session, *format, file),
		Some(Commands::Script {
			job,
			session,
			namespace,
			output,
		}) => run_script(&args, job, session, namespace, output.as_deref()),
		None => {
			eprintln!("No subcommand specified. Run `harvest --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<HarvestError>() {
			Ok(harvest_err) => {
				let report: miette::Report = (*harvest_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr, filtered by `HARVEST_LOG` when set.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &HarvestCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(root: &Path) -> Result<HarvestConfig, HarvestError> {
	let config = HarvestConfig::load(root)?;
	if config.is_none() {
		tracing::debug!(root = %root.display(), "no harvest config found, using project root");
	}
	Ok(config.unwrap_or_else(|| HarvestConfig::for_root(root)))
}

fn create_job(
	args: &HarvestCli,
	key: &str,
	session: &str,
	namespace: &str,
) -> Result<HarvestJob, HarvestError> {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	JobType::require(key)?.create_job(session, namespace, &config)
}

fn run_init(args: &HarvestCli) -> AnyEmptyResult {
	let root = resolve_root(args);

	if let Some(existing) = HarvestConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("harvest.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created config file: {}", config_path.display());

	let config = HarvestConfig::for_root(&root);
	println!();
	println!("Next steps:");
	println!(
		"  1. Put CSV templates in {}",
		config.template_dir().display()
	);
	println!(
		"  2. Put harvest script templates in {}",
		config.script_dir().display()
	);
	println!("  3. Run `harvest validate --job <key> <file>` to check an upload");

	Ok(())
}

fn run_jobs(format: OutputFormat) -> AnyEmptyResult {
	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string(&JOB_TYPES)?);
		}
		OutputFormat::Text => {
			println!("{}", colored!("Job types:", bold));
			for job_type in &JOB_TYPES {
				println!(
					"  {:<12} {:<8} template: {}, script: {}",
					job_type.key,
					job_type.friendly_name,
					job_type.template_file_name,
					job_type.script_file_name
				);
				for rdf_type in job_type.rdf_types_for_links {
					println!("  {:<12} {:<8} links: {rdf_type}", "", "");
				}
			}
		}
	}

	Ok(())
}

fn run_validate(
	args: &HarvestCli,
	key: &str,
	session: &str,
	format: OutputFormat,
	file: &Path,
) -> AnyEmptyResult {
	let job = create_job(args, key, session, "")?;
	let verdict = job.check_upload(file)?;

	if args.verbose {
		eprintln!("Template: {}", job.template_file_path().display());
	}

	match (format, &verdict) {
		(OutputFormat::Json, _) => {
			let output = serde_json::json!({
				"ok": verdict.is_passed(),
				"job": job.job_type().key,
				"file": file.display().to_string(),
				"message": verdict.mismatch().map(ToString::to_string),
			});
			println!("{output}");
		}
		(OutputFormat::Text, Verdict::Passed) => {
			println!(
				"{} {} matches the {} template.",
				colored!("Validation passed:", green),
				file.display(),
				job.job_type().friendly_name
			);
		}
		(OutputFormat::Text, Verdict::Failed(mismatch)) => {
			eprintln!("{} {mismatch}", colored!("Validation failed:", red));
		}
	}

	if !verdict.is_passed() {
		process::exit(1);
	}

	Ok(())
}

fn run_script(
	args: &HarvestCli,
	key: &str,
	session: &str,
	namespace: &str,
	output: Option<&Path>,
) -> AnyEmptyResult {
	let job = create_job(args, key, session, namespace)?;
	let script = job.try_script()?;

	match output {
		Some(path) => {
			std::fs::write(path, &script)?;
			println!("Wrote harvest script to {}", path.display());
		}
		None => print!("{script}"),
	}

	Ok(())
}
