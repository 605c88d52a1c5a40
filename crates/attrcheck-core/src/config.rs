/// Controls how validation messages are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    /// When true, each message is prefixed with the prettified attribute name
    /// ("first_name" + "can't be blank" -> "First name can't be blank").
    /// Messages starting with `^` are never prefixed.
    pub full_messages: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            full_messages: true,
        }
    }
}
