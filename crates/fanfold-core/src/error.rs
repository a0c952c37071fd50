use crate::consumer::AggregateKind;
use std::fmt;
use thiserror::Error as ThisError;

///
/// AggregateError
///
/// Structured evaluation error with a stable classification.
/// `kind` names the aggregation that failed and is absent for node-level
/// failures (element limit, interrupted pass, misuse of a request node).
/// `slot` is filled in by the fan-out driver when a consumer fails.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct AggregateError {
    pub class: ErrorClass,
    pub kind: Option<AggregateKind>,
    pub slot: Option<usize>,
    pub message: String,
}

impl AggregateError {
    /// Construct an error for one aggregation kind.
    pub fn new(class: ErrorClass, kind: AggregateKind, message: impl Into<String>) -> Self {
        Self {
            class,
            kind: Some(kind),
            slot: None,
            message: format!("{kind}: {}", message.into()),
        }
    }

    /// Construct a node-level error that is not owned by any consumer.
    pub(crate) fn node(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            kind: None,
            slot: None,
            message: message.into(),
        }
    }

    /// An absent or unusable argument was passed to a builder entry point.
    pub fn invalid_argument(kind: AggregateKind, argument: &str) -> Self {
        Self::new(
            ErrorClass::InvalidArgument,
            kind,
            format!("argument '{argument}' is required"),
        )
    }

    /// A node-level argument or usage error.
    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Self::node(ErrorClass::InvalidArgument, message)
    }

    /// The aggregation needs at least one element and saw none.
    pub fn empty_sequence(kind: AggregateKind) -> Self {
        Self::new(
            ErrorClass::EmptySequence,
            kind,
            "sequence contains no elements",
        )
    }

    /// Two keys (or values) could not be ordered against each other.
    pub fn incomparable_key(kind: AggregateKind) -> Self {
        Self::new(
            ErrorClass::IncomparableKey,
            kind,
            "keys have no usable ordering and no comparer was supplied",
        )
    }

    /// The accumulated value does not fit the result type.
    pub fn overflow(kind: AggregateKind) -> Self {
        Self::new(ErrorClass::Overflow, kind, "arithmetic overflow")
    }

    pub(crate) fn limit_exceeded(attempted: u64, limit: u64) -> Self {
        Self::node(
            ErrorClass::LimitExceeded,
            format!("element limit exceeded: attempted={attempted}, limit={limit}"),
        )
    }

    pub(crate) fn interrupted() -> Self {
        Self::node(
            ErrorClass::Interrupted,
            "evaluation was interrupted before it completed",
        )
    }

    /// Tag this error with the request slot it came from.
    #[must_use]
    pub(crate) const fn at_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    #[must_use]
    pub const fn is_empty_sequence(&self) -> bool {
        matches!(self.class, ErrorClass::EmptySequence)
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidArgument)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        let kind = self
            .kind
            .map_or_else(|| "request".to_string(), |kind| kind.to_string());

        match self.slot {
            Some(slot) => format!("{kind}:{}@{slot}: {}", self.class, self.message),
            None => format!("{kind}:{}: {}", self.class, self.message),
        }
    }
}

///
/// ErrorClass
/// Error taxonomy for evaluation failures.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    EmptySequence,
    IncomparableKey,
    Interrupted,
    InvalidArgument,
    LimitExceeded,
    Overflow,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EmptySequence => "empty_sequence",
            Self::IncomparableKey => "incomparable_key",
            Self::Interrupted => "interrupted",
            Self::InvalidArgument => "invalid_argument",
            Self::LimitExceeded => "limit_exceeded",
            Self::Overflow => "overflow",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_failing_kind() {
        let err = AggregateError::empty_sequence(AggregateKind::Average);

        assert_eq!(err.to_string(), "average: sequence contains no elements");
        assert!(err.is_empty_sequence());
    }

    #[test]
    fn display_with_class_includes_slot_when_tagged() {
        let err = AggregateError::overflow(AggregateKind::Sum).at_slot(2);

        assert_eq!(
            err.display_with_class(),
            "sum:overflow@2: sum: arithmetic overflow"
        );
    }

    #[test]
    fn node_errors_have_no_kind() {
        let err = AggregateError::limit_exceeded(11, 10);

        assert_eq!(err.kind, None);
        assert_eq!(err.class, ErrorClass::LimitExceeded);
        assert!(err.display_with_class().starts_with("request:limit_exceeded"));
    }
}
