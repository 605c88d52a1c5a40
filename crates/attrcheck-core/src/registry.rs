use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::builtin;
use crate::builtin::datetime::{DatetimeConfig, DatetimeValidator};
use crate::config::ValidateOptions;
use crate::error::{ConstraintError, Result};
use crate::outcome::Outcome;
use crate::result::ValidationErrors;
use crate::schema::{Record, Schema};
use crate::validator::validate_record;

/// One named check applied to one attribute value.
pub trait Validator: Send + Sync {
    /// Check `value` (absent when the record lacks the attribute or holds
    /// `null`) under `options`. `record` is the full input for cross-field
    /// checks.
    ///
    /// Returns `Err` only for configuration problems such as options the
    /// validator cannot interpret.
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        record: &Record,
    ) -> Result<Outcome>;

    /// Whether the validator runs when the value is absent.
    ///
    /// Only `presence` does by default; everything else leaves missing
    /// values to it.
    fn validates_absent(&self) -> bool {
        false
    }

    /// Reject options the validator could never interpret, independent of
    /// any value. Run for every enabled constraint by
    /// [`ValidatorRegistry::check_schema`].
    fn check_options(&self, _options: &Value, _attribute: &str) -> Result<()> {
        Ok(())
    }
}

/// Adapts a plain function or closure into a [`Validator`].
pub struct FnValidator<F> {
    func: F,
    validates_absent: bool,
}

impl<F> FnValidator<F> {
    pub fn new(func: F) -> Self {
        Self {
            func,
            validates_absent: false,
        }
    }

    /// Like [`FnValidator::new`], but the function is also called for
    /// absent and `null` values (with `value` set to `None`).
    pub fn validating_absent(func: F) -> Self {
        Self {
            func,
            validates_absent: true,
        }
    }
}

impl<F, O> Validator for FnValidator<F>
where
    F: Fn(Option<&Value>, &Value, &str, &Record) -> O + Send + Sync,
    O: Into<Outcome>,
{
    fn validate(
        &self,
        value: Option<&Value>,
        options: &Value,
        attribute: &str,
        record: &Record,
    ) -> Result<Outcome> {
        Ok((self.func)(value, options, attribute, record).into())
    }

    fn validates_absent(&self) -> bool {
        self.validates_absent
    }
}

/// Mutable registration phase. Consumed by [`RegistryBuilder::build`].
pub struct RegistryBuilder {
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl RegistryBuilder {
    /// Builder pre-loaded with the built-in catalog.
    pub fn new() -> Self {
        let mut builder = Self::empty();
        builtin::register_all(&mut builder);
        builder
    }

    /// Builder with no validators at all.
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// Store `validator` under `name`. An existing entry is replaced.
    pub fn register<V>(&mut self, name: impl Into<String>, validator: V) -> &mut Self
    where
        V: Validator + 'static,
    {
        self.register_arc(name, Arc::new(validator))
    }

    /// Register a closure with the `(value, options, attribute, record)` shape.
    pub fn register_fn<F, O>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(Option<&Value>, &Value, &str, &Record) -> O + Send + Sync + 'static,
        O: Into<Outcome> + 'static,
    {
        self.register(name, FnValidator::new(func))
    }

    pub fn register_arc(
        &mut self,
        name: impl Into<String>,
        validator: Arc<dyn Validator>,
    ) -> &mut Self {
        let name = name.into();
        if self.validators.insert(name.clone(), validator).is_some() {
            warn!(validator = %name, "replacing previously registered validator");
        } else {
            debug!(validator = %name, "registered validator");
        }
        self
    }

    /// Install a datetime parse/format pair for both `datetime` and `date`.
    pub fn datetime(&mut self, config: DatetimeConfig) -> &mut Self {
        self.register("datetime", DatetimeValidator::new(config.clone()));
        self.register("date", DatetimeValidator::date_only(config));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Freeze the registrations.
    pub fn build(self) -> ValidatorRegistry {
        debug!(validators = self.validators.len(), "validator registry frozen");
        ValidatorRegistry {
            validators: self.validators,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable name-keyed table of validators.
///
/// Built once at startup through [`RegistryBuilder`] and shared (usually
/// behind an `Arc`) by every evaluation afterwards.
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry containing only the built-in catalog.
    pub fn with_builtins() -> Self {
        RegistryBuilder::new().build()
    }

    pub fn resolve(&self, name: &str) -> Option<&dyn Validator> {
        self.validators.get(name).map(|validator| validator.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Fail on the first constraint naming an unregistered validator or
    /// carrying options its validator rejects. Disabled constraints only
    /// need a registered name.
    pub fn check_schema(&self, schema: &Schema) -> Result<()> {
        for (attribute, constraints) in schema.iter() {
            for (name, options) in constraints.iter() {
                let validator =
                    self.resolve(name)
                        .ok_or_else(|| ConstraintError::UnknownValidator {
                            name: name.to_string(),
                            attribute: attribute.to_string(),
                        })?;
                if !matches!(options, Value::Null | Value::Bool(false)) {
                    validator.check_options(options, attribute)?;
                }
            }
        }
        Ok(())
    }

    /// Validate `record` against `schema` with default options.
    ///
    /// `Ok(None)` means the record is valid.
    pub fn validate(&self, record: &Record, schema: &Schema) -> Result<Option<ValidationErrors>> {
        self.validate_with(record, schema, &ValidateOptions::default())
    }

    pub fn validate_with(
        &self,
        record: &Record,
        schema: &Schema,
        options: &ValidateOptions,
    ) -> Result<Option<ValidationErrors>> {
        validate_record(self, record, schema, options).map(ValidationErrors::into_option)
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.names())
            .finish()
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.validators.keys().collect();
        names.sort_unstable();
        f.debug_struct("RegistryBuilder")
            .field("validators", &names)
            .finish()
    }
}
