use attrcheck_core::{Schema, ValidationErrors, ValidatorRegistry};
use serde::Serialize;
use tracing::debug;

use crate::cmd::{read_json, read_record, CheckArgs};
use crate::exit::{constraint_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{error_table, print_json, OutputFormat};

#[derive(Serialize)]
struct CheckOutput<'a> {
    valid: bool,
    errors: Option<&'a ValidationErrors>,
}

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let schema = Schema::from_value(&read_json(&args.schema)?)
        .map_err(|err| constraint_error("schema", err))?;
    let record = read_record(&args.record)?;
    let registry = ValidatorRegistry::with_builtins();
    registry
        .check_schema(&schema)
        .map_err(|err| constraint_error("schema", err))?;
    debug!(attributes = schema.len(), "checking record");

    let errors = registry
        .validate_with(&record, &schema, &args.messages.options())
        .map_err(|err| constraint_error("validate", err))?;

    match format {
        OutputFormat::Json | OutputFormat::Pretty => {
            let out = CheckOutput {
                valid: errors.is_none(),
                errors: errors.as_ref(),
            };
            print_json(&serde_json::to_value(&out).unwrap_or_default(), format);
        }
        OutputFormat::Table => match &errors {
            None => println!("valid"),
            Some(errors) => println!("{}", error_table(errors)),
        },
    }

    Ok(if errors.is_some() { DATA_INVALID } else { SUCCESS })
}
