/// Normalized result of a single validator invocation.
///
/// Validators may produce nothing, one message, or several messages. All of
/// those shapes convert into an `Outcome` at the call boundary so the
/// aggregation code only ever sees this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Valid,
    Invalid(Vec<String>),
}

impl Outcome {
    /// A single-message failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(vec![message.into()])
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Messages in emission order; empty when valid.
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::Valid => Vec::new(),
            Self::Invalid(messages) => messages,
        }
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Self::Valid
    }
}

impl From<String> for Outcome {
    fn from(message: String) -> Self {
        Self::Invalid(vec![message])
    }
}

impl From<&str> for Outcome {
    fn from(message: &str) -> Self {
        Self::Invalid(vec![message.to_string()])
    }
}

impl From<Vec<String>> for Outcome {
    fn from(messages: Vec<String>) -> Self {
        if messages.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(messages)
        }
    }
}

impl From<Vec<&str>> for Outcome {
    fn from(messages: Vec<&str>) -> Self {
        messages
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }
}

impl<T: Into<Outcome>> From<Option<T>> for Outcome {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Valid, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_shapes_are_valid() {
        assert!(Outcome::from(()).is_valid());
        assert!(Outcome::from(None::<String>).is_valid());
        assert!(Outcome::from(Vec::<String>::new()).is_valid());
    }

    #[test]
    fn single_message_becomes_one_element_sequence() {
        assert_eq!(
            Outcome::from("must be bar").into_messages(),
            vec!["must be bar".to_string()]
        );
        assert_eq!(
            Outcome::from(Some("must be bar".to_string())).into_messages(),
            vec!["must be bar".to_string()]
        );
    }

    #[test]
    fn sequences_keep_their_order() {
        let outcome = Outcome::from(vec!["first", "second"]);
        assert_eq!(
            outcome.into_messages(),
            vec!["first".to_string(), "second".to_string()]
        );
    }
}
