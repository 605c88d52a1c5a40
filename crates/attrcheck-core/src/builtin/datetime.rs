//! Datetime constraint with pluggable parsing and formatting.
//!
//! Values and bounds are parsed into UTC millisecond timestamps; every
//! comparison happens on those instants. The formatter only renders
//! messages.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::builtin::decode_options;
use crate::error::{ConstraintError, Result};
use crate::messages::{display_value, interpolate};
use crate::outcome::Outcome;
use crate::registry::Validator;
use crate::schema::Record;

const MILLIS_PER_DAY: i64 = 86_400_000;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a raw value into UTC milliseconds; `None` marks an invalid date.
pub type ParseFn = dyn Fn(&Value) -> Option<i64> + Send + Sync;

/// Renders UTC milliseconds for messages.
pub type FormatFn = dyn Fn(i64, &DatetimeOptions) -> String + Send + Sync;

/// Options accepted by `datetime` and `date`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatetimeOptions {
    pub earliest: Option<Value>,
    pub latest: Option<Value>,
    pub date_only: bool,
    pub message: Option<String>,
    pub not_valid: Option<String>,
    pub too_early: Option<String>,
    pub too_late: Option<String>,
}

/// The parse/format pair shared by every datetime evaluation.
#[derive(Clone)]
pub struct DatetimeConfig {
    parse: Arc<ParseFn>,
    format: Arc<FormatFn>,
}

impl DatetimeConfig {
    pub fn new<P, F>(parse: P, format: F) -> Self
    where
        P: Fn(&Value) -> Option<i64> + Send + Sync + 'static,
        F: Fn(i64, &DatetimeOptions) -> String + Send + Sync + 'static,
    {
        Self {
            parse: Arc::new(parse),
            format: Arc::new(format),
        }
    }

    pub fn parse(&self, value: &Value) -> Option<i64> {
        (self.parse)(value)
    }

    pub fn format(&self, timestamp: i64, options: &DatetimeOptions) -> String {
        (self.format)(timestamp, options)
    }
}

impl Default for DatetimeConfig {
    fn default() -> Self {
        Self::new(parse_timestamp, format_timestamp)
    }
}

impl fmt::Debug for DatetimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatetimeConfig").finish_non_exhaustive()
    }
}

/// Default parser.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.fff][Z|offset]`, offset-less
/// date-times (taken as UTC), bare `YYYY-MM-DD` dates, and numeric
/// millisecond timestamps.
pub fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|n| n.is_finite()).map(|n| n as i64)),
        Value::String(text) => parse_str(text.trim()),
        _ => None,
    }
}

fn parse_str(text: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Some(parsed.timestamp_millis());
        }
    }

    let naive = text.strip_suffix(['Z', 'z']).unwrap_or(text);
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(parsed.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

/// Default formatter: `YYYY-MM-DD` with `dateOnly`, otherwise
/// `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_timestamp(timestamp: i64, options: &DatetimeOptions) -> String {
    let Some(instant) = DateTime::<Utc>::from_timestamp_millis(timestamp) else {
        return timestamp.to_string();
    };
    if options.date_only {
        instant.format("%Y-%m-%d").to_string()
    } else {
        instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }
}

/// `datetime` (and, with date-only forced, `date`).
#[derive(Debug, Clone)]
pub struct DatetimeValidator {
    config: DatetimeConfig,
    force_date_only: bool,
}

impl DatetimeValidator {
    pub fn new(config: DatetimeConfig) -> Self {
        Self {
            config,
            force_date_only: false,
        }
    }

    pub fn date_only(config: DatetimeConfig) -> Self {
        Self {
            config,
            force_date_only: true,
        }
    }

    fn name(&self) -> &'static str {
        if self.force_date_only {
            "date"
        } else {
            "datetime"
        }
    }

    /// Decode options and parse both bounds.
    fn prepare(
        &self,
        options: &Value,
        attribute: &str,
    ) -> Result<(DatetimeOptions, Option<i64>, Option<i64>)> {
        let name = self.name();
        let mut options: DatetimeOptions = decode_options(name, attribute, options)?;
        options.date_only |= self.force_date_only;

        let earliest = self.bound(options.earliest.as_ref(), name, attribute)?;
        let latest = self.bound(options.latest.as_ref(), name, attribute)?;
        Ok((options, earliest, latest))
    }

    fn bound(&self, bound: Option<&Value>, name: &str, attribute: &str) -> Result<Option<i64>> {
        let Some(bound) = bound else {
            return Ok(None);
        };
        self.config.parse(bound).map(Some).ok_or_else(|| {
            ConstraintError::invalid_options(
                name,
                attribute,
                format!("bound {bound} is not a valid date"),
            )
        })
    }
}

impl Validator for DatetimeValidator {
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        _record: &Record,
    ) -> Result<Outcome> {
        let (options, earliest, latest) = self.prepare(options, attribute)?;
        let Some(value) = value else {
            return Ok(Outcome::Valid);
        };

        let parsed = self
            .config
            .parse(value)
            .filter(|ts| !options.date_only || ts.rem_euclid(MILLIS_PER_DAY) == 0);
        let Some(timestamp) = parsed else {
            let template = options
                .not_valid
                .as_deref()
                .or(options.message.as_deref())
                .unwrap_or("must be a valid date");
            let raw = display_value(value);
            return Ok(Outcome::invalid(interpolate(template, &[("value", raw.as_str())])));
        };

        let shown = self.config.format(timestamp, &options);
        let mut errors = Vec::new();
        if let Some(earliest) = earliest.filter(|bound| timestamp < *bound) {
            let template = options
                .too_early
                .as_deref()
                .or(options.message.as_deref())
                .unwrap_or("must be no earlier than %{date}");
            let date = self.config.format(earliest, &options);
            errors.push(interpolate(
                template,
                &[("date", date.as_str()), ("value", shown.as_str())],
            ));
        }
        if let Some(latest) = latest.filter(|bound| timestamp > *bound) {
            let template = options
                .too_late
                .as_deref()
                .or(options.message.as_deref())
                .unwrap_or("must be no later than %{date}");
            let date = self.config.format(latest, &options);
            errors.push(interpolate(
                template,
                &[("date", date.as_str()), ("value", shown.as_str())],
            ));
        }
        Ok(errors.into())
    }

    fn check_options(&self, options: &Value, attribute: &str) -> Result<()> {
        self.prepare(options, attribute).map(|_| ())
    }
}
