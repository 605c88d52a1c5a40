use std::fs;
use std::path::{Path, PathBuf};

use attrcheck_core::{Record, ValidateOptions};
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::exit::{io_error, json_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod check;
pub mod request;
pub mod validators;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one record against a schema.
    Check(CheckArgs),
    /// Validate path, query and body records against a request schema.
    Request(RequestArgs),
    /// List the registered validator names.
    Validators(ValidatorsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::Request(args) => request::run(args, format),
        Command::Validators(args) => validators::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Emit bare messages without the attribute name prefix.
    #[arg(long)]
    pub bare_messages: bool,
}

impl MessageArgs {
    pub fn options(&self) -> ValidateOptions {
        ValidateOptions {
            full_messages: !self.bare_messages,
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file (JSON object of attribute -> constraints).
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,
    /// Record file (JSON object).
    #[arg(long, value_name = "FILE")]
    pub record: PathBuf,
    #[command(flatten)]
    pub messages: MessageArgs,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Request schema file (JSON object with path, query and/or body).
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,
    /// Path parameters (JSON object).
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,
    /// Query parameters (JSON object).
    #[arg(long, value_name = "FILE")]
    pub query: Option<PathBuf>,
    /// Request body (JSON object).
    #[arg(long, value_name = "FILE")]
    pub body: Option<PathBuf>,
    #[command(flatten)]
    pub messages: MessageArgs,
}

#[derive(Args, Debug, Default)]
pub struct ValidatorsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn read_json(path: &Path) -> CliResult<Value> {
    let text = fs::read_to_string(path).map_err(|err| io_error(path, err))?;
    serde_json::from_str(&text).map_err(|err| json_error(path, err))
}

pub(crate) fn read_record(path: &Path) -> CliResult<Record> {
    match read_json(path)? {
        Value::Object(record) => Ok(record),
        _ => Err(CliError::new(
            USAGE,
            format!("{}: record must be a JSON object", path.display()),
        )),
    }
}
