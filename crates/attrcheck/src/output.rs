use std::io::IsTerminal;

use attrcheck_core::ValidationErrors;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::Value;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_json(value: &Value, format: OutputFormat) {
    let text = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
        _ => serde_json::to_string(value),
    };
    println!("{}", text.unwrap_or_else(|_| "{}".to_string()));
}

/// One row per message; an attribute with several messages spans several rows.
pub fn error_table(errors: &ValidationErrors) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ATTRIBUTE", "MESSAGE"]);
    for (attribute, messages) in errors.iter() {
        for message in messages {
            table.add_row(vec![attribute.to_string(), message.clone()]);
        }
    }
    table
}

pub fn name_table<'a>(header: &str, names: impl IntoIterator<Item = &'a str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![header]);
    for name in names {
        table.add_row(vec![name]);
    }
    table
}
