use attrcheck_core::ValidatorRegistry;
use serde_json::json;

use crate::cmd::ValidatorsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{name_table, print_json, OutputFormat};

pub fn run(_args: ValidatorsArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = ValidatorRegistry::with_builtins();
    let names = registry.names();

    match format {
        OutputFormat::Json | OutputFormat::Pretty => {
            print_json(&json!({"validators": names}), format);
        }
        OutputFormat::Table => println!("{}", name_table("VALIDATOR", names)),
    }

    Ok(SUCCESS)
}
