//! `harvest_core` checks uploaded CSV files against a harvest template and
//! renders the shell script that turns those files into RDF.
//!
//! ## Validation
//!
//! The first line of a template file is its header. An uploaded file passes
//! when its first line equals the template header field for field and every
//! non-blank data line has as many fields as the header. A data line ending in
//! a bare comma (`John,`) counts the empty field after the comma.
//!
//! ## Script rendering
//!
//! Script templates are plain text containing `${WORKING_DIRECTORY}`,
//! `${UPLOADS_FOLDER}` and `${HARVESTED_DATA_PATH}`. Each is replaced with a
//! directory resolved from [`HarvestConfig`] for the current session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use harvest_core::HarvestConfig;
//! use harvest_core::JobType;
//! use std::path::Path;
//!
//! let config = HarvestConfig::new("/usr/local/vivo/harvester", "/srv/harvest");
//! let job_type = JobType::lookup(Some("csvgrant")).expect("known job type");
//! let job = job_type.create_job("session-1", "http://example.org/individual/", &config)?;
//!
//! if let Some(message) = job.validate_upload(Path::new("grants.csv")) {
//!     eprintln!("{message}");
//! }
//!
//! let script = job.script();
//! # Ok::<(), harvest_core::HarvestError>(())
//! ```

pub use config::*;
pub use error::*;
pub use job::*;
pub use rows::*;
pub use script::*;
pub use validator::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod job;
mod rows;
mod script;
mod validator;

#[cfg(test)]
mod __fixtures;
