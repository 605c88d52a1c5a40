use std::path::Path;
use std::sync::Arc;

use attrcheck_core::{Record, ValidatorRegistry};
use attrcheck_request::{Middleware, RecordedResponse, RequestParts};
use serde::Serialize;
use serde_json::Value;

use crate::cmd::{read_json, read_record, RequestArgs};
use crate::exit::{request_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct RequestOutput {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

pub fn run(args: RequestArgs, format: OutputFormat) -> CliResult<i32> {
    let middleware = Middleware::new(Arc::new(ValidatorRegistry::with_builtins()))
        .with_options(args.messages.options());
    let handler = middleware
        .build_handler_from_value(&read_json(&args.schema)?)
        .map_err(|err| request_error("schema", err))?;

    let request = RequestParts {
        params: load(args.params.as_deref())?,
        query: load(args.query.as_deref())?,
        body: load(args.body.as_deref())?,
    };

    let mut response = RecordedResponse::default();
    let mut accepted = false;
    handler
        .handle(&request, &mut response, || accepted = true)
        .map_err(|err| request_error("validate", err))?;

    let out = RequestOutput {
        accepted,
        status: response.status,
        payload: response.body,
    };
    match format {
        OutputFormat::Json | OutputFormat::Pretty => {
            print_json(&serde_json::to_value(&out).unwrap_or_default(), format);
        }
        OutputFormat::Table => match (out.status, &out.payload) {
            (Some(status), Some(payload)) => {
                println!("rejected ({status})");
                print_json(payload, OutputFormat::Pretty);
            }
            _ => println!("accepted"),
        },
    }

    Ok(if accepted { SUCCESS } else { DATA_INVALID })
}

fn load(path: Option<&Path>) -> CliResult<Option<Record>> {
    path.map(read_record).transpose()
}
