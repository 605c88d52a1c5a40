use std::fmt;
use std::sync::Arc;

use attrcheck_core::{Record, Schema, ValidateOptions, ValidationErrors, ValidatorRegistry};
use serde_json::Value;
use tracing::debug;

use crate::error::{RequestError, Result};
use crate::formatter::{render, ErrorFormatter};
use crate::http::{Request, Response, BAD_REQUEST};
use crate::schema::RequestSchema;

/// Outcome of validating one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted,
    /// Carries the (possibly formatted) error payload.
    Rejected(Value),
}

/// Handler factory sharing one registry and one optional error formatter.
///
/// Register the formatter before building handlers: each handler keeps the
/// formatter that was active when it was built.
#[derive(Clone)]
pub struct Middleware {
    registry: Arc<ValidatorRegistry>,
    formatter: Option<ErrorFormatter>,
    options: ValidateOptions,
}

impl Middleware {
    pub fn new(registry: Arc<ValidatorRegistry>) -> Self {
        Self {
            registry,
            formatter: None,
            options: ValidateOptions::default(),
        }
    }

    /// Install (`Some`) or clear (`None`) the error formatter. Replaces any
    /// previous one.
    pub fn register_error_formatter(&mut self, formatter: Option<ErrorFormatter>) -> &mut Self {
        debug!(installed = formatter.is_some(), "error formatter updated");
        self.formatter = formatter;
        self
    }

    pub fn with_options(mut self, options: ValidateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Arc<ValidatorRegistry> {
        &self.registry
    }

    /// Build a reusable handler.
    ///
    /// Fails when the schema is empty, names a validator the registry does
    /// not know, or gives a validator options it cannot use. A built
    /// handler only returns `Err` for configuration a custom validator
    /// rejects at evaluation time.
    pub fn build_handler(&self, schema: RequestSchema) -> Result<Handler> {
        if schema.is_empty() {
            return Err(RequestError::Empty);
        }
        for section in [&schema.path, &schema.query, &schema.body]
            .into_iter()
            .flatten()
        {
            self.registry.check_schema(section)?;
        }

        Ok(Handler {
            registry: Arc::clone(&self.registry),
            schema,
            formatter: self.formatter.clone(),
            options: self.options,
        })
    }

    /// Build a handler from an untyped schema document.
    pub fn build_handler_from_value(&self, schema: &Value) -> Result<Handler> {
        self.build_handler(RequestSchema::from_value(schema)?)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("registry", &self.registry)
            .field("formatter", &self.formatter.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// Validates requests against one [`RequestSchema`]. Holds no per-request
/// state.
#[derive(Clone)]
pub struct Handler {
    registry: Arc<ValidatorRegistry>,
    schema: RequestSchema,
    formatter: Option<ErrorFormatter>,
    options: ValidateOptions,
}

impl Handler {
    pub fn schema(&self) -> &RequestSchema {
        &self.schema
    }

    /// Validate path, query and body independently and merge the results.
    ///
    /// An attribute failing in more than one section keeps all of its
    /// messages, in path, query, body order. Callers should still keep the
    /// attribute names of the three sections distinct.
    pub fn errors<R>(&self, request: &R) -> Result<ValidationErrors>
    where
        R: Request + ?Sized,
    {
        let mut errors = ValidationErrors::new();
        for (section, record) in [
            (&self.schema.path, request.params()),
            (&self.schema.query, request.query()),
            (&self.schema.body, request.body()),
        ] {
            if let Some(schema) = section {
                errors.merge(self.validate_section(schema, record)?);
            }
        }
        Ok(errors)
    }

    /// Decide whether a request is accepted, formatting the payload when it
    /// is not.
    pub fn evaluate<R>(&self, request: &R) -> Result<Verdict>
    where
        R: Request + ?Sized,
    {
        let errors = self.errors(request)?;
        if errors.is_empty() {
            debug!("request accepted");
            return Ok(Verdict::Accepted);
        }

        debug!(attributes = errors.len(), "request rejected");
        Ok(Verdict::Rejected(render(self.formatter.as_ref(), &errors)))
    }

    /// Run the handler: exactly one of `next()` or
    /// `response.status(400).json(payload)` is invoked, once.
    ///
    /// `Err` is returned (and neither continuation runs) only if evaluation
    /// hits a configuration error.
    pub fn handle<R, S, N>(&self, request: &R, response: &mut S, next: N) -> Result<()>
    where
        R: Request + ?Sized,
        S: Response + ?Sized,
        N: FnOnce(),
    {
        match self.evaluate(request)? {
            Verdict::Accepted => next(),
            Verdict::Rejected(payload) => response.status(BAD_REQUEST).json(payload),
        }
        Ok(())
    }

    fn validate_section(&self, schema: &Schema, record: Option<&Record>) -> Result<ValidationErrors> {
        let empty = Record::new();
        let record = record.unwrap_or(&empty);
        Ok(attrcheck_core::validate_record(
            &self.registry,
            record,
            schema,
            &self.options,
        )?)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("schema", &self.schema)
            .field("formatter", &self.formatter.is_some())
            .field("options", &self.options)
            .finish()
    }
}
