use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

/// Environment variable holding a `tracing` filter directive for log output.
pub const LOG_ENV: &str = "HARVEST_LOG";

/// Session id used when none is given on the command line.
pub const DEFAULT_SESSION: &str = "local";

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Validate CSV uploads against harvest templates and render harvest scripts.",
	long_about = "harvest checks that an uploaded CSV file has the same header and the same \
	              number of columns on every row as the template for a harvest job, and renders \
	              the shell script that runs the harvest.\n\nQuick start:\n  harvest init      \
	              Create a harvest.toml\n  harvest jobs      List the available job types\n  \
	              harvest validate  Check a CSV file against a job template\n  harvest script    \
	              Print the harvest script for a job"
)]
pub struct HarvestCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the directory holding `harvest.toml`. Without a config file,
	/// templates and scripts are looked up under this directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `harvest.toml` in the project directory.
	///
	/// If a config file already exists this command is a no-op and exits
	/// successfully.
	Init,
	/// List the available harvest job types.
	Jobs {
		/// Output format for the job list.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Check a CSV file against the template of a job type.
	///
	/// The first line of the file must match the template header exactly and
	/// every non-blank line after it must have as many fields as the header.
	/// Exits with status 1 when the file does not match and 2 when a file
	/// cannot be read.
	Validate {
		/// Job type key, e.g. `csvGrant`. Matched case-insensitively.
		#[arg(long, short)]
		job: String,

		/// Session the upload belongs to.
		#[arg(long, default_value = DEFAULT_SESSION)]
		session: String,

		/// Output format for the validation result.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,

		/// The CSV file to validate.
		file: PathBuf,
	},
	/// Render the harvest script for a job type.
	///
	/// Reads the job's script template and replaces `${WORKING_DIRECTORY}`,
	/// `${UPLOADS_FOLDER}` and `${HARVESTED_DATA_PATH}` with the directories
	/// configured for the session.
	Script {
		/// Job type key, e.g. `csvPerson`. Matched case-insensitively.
		#[arg(long, short)]
		job: String,

		/// Session whose upload and output folders are substituted.
		#[arg(long, default_value = DEFAULT_SESSION)]
		session: String,

		/// Namespace for URIs minted by the harvest.
		#[arg(long, default_value = "")]
		namespace: String,

		/// Write the script to this file instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
