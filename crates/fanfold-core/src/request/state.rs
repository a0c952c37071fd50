use crate::error::AggregateError;
use std::fmt;

///
/// Phase
///
/// Evaluation lifecycle of a request node.
/// `Evaluating` is only observable after a pass was interrupted by a panic.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Unevaluated,
    Evaluating,
    Evaluated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unevaluated => "unevaluated",
            Self::Evaluating => "evaluating",
            Self::Evaluated => "evaluated",
        };
        write!(f, "{label}")
    }
}

///
/// NodeState
///
/// Memoized evaluation state shared by typed and dynamic request nodes.
/// The source and consumers live only in `Pending`; once a pass starts they
/// are moved out and never come back, so the source is enumerated at most
/// once per node.
///

pub(super) enum NodeState<S, C, O> {
    Pending { source: S, consumers: C },
    Evaluating,
    Evaluated(Result<O, AggregateError>),
}

impl<S, C, O> NodeState<S, C, O> {
    pub(super) const fn phase(&self) -> Phase {
        match self {
            Self::Pending { .. } => Phase::Unevaluated,
            Self::Evaluating => Phase::Evaluating,
            Self::Evaluated(_) => Phase::Evaluated,
        }
    }

    /// Consumers of a node that has not started its pass.
    pub(super) const fn consumers_mut(&mut self) -> Option<&mut C> {
        match self {
            Self::Pending { consumers, .. } => Some(consumers),
            Self::Evaluating | Self::Evaluated(_) => None,
        }
    }

    /// Borrow the cached outcome of a settled node.
    pub(super) fn outcome(&self) -> Result<&O, AggregateError> {
        match self {
            Self::Evaluated(Ok(output)) => Ok(output),
            Self::Evaluated(Err(err)) => Err(err.clone()),
            Self::Pending { .. } | Self::Evaluating => Err(AggregateError::interrupted()),
        }
    }

    /// Take the cached outcome of a settled node.
    pub(super) fn into_outcome(self) -> Result<O, AggregateError> {
        match self {
            Self::Evaluated(outcome) => outcome,
            Self::Pending { .. } | Self::Evaluating => Err(AggregateError::interrupted()),
        }
    }
}
