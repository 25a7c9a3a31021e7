use std::fmt;

/// Shared error type for every `hrc-*` component.
///
/// The core never panics on bad caller input — it returns `InvalidArgument`
/// or `NotFound`. `InvariantViolated` is different: it means an internal
/// consistency check failed, which should be unreachable in correct code and
/// is handled by aborting the process rather than being recovered from (see
/// `hrc_pipeline::fatal_invariant`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoutingError {
    NotFound { what: &'static str, id: String },
    InvalidArgument { what: &'static str, reason: String },
    InvariantViolated { what: &'static str },
}

impl RoutingError {
    pub fn not_found(what: &'static str, id: impl fmt::Display) -> Self {
        RoutingError::NotFound { what, id: id.to_string() }
    }

    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        RoutingError::InvalidArgument { what, reason: reason.into() }
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::NotFound { what, id } => write!(f, "{what} not found: {id}"),
            RoutingError::InvalidArgument { what, reason } => {
                write!(f, "invalid argument for {what}: {reason}")
            }
            RoutingError::InvariantViolated { what } => {
                write!(f, "invariant violated: {what}")
            }
        }
    }
}

impl std::error::Error for RoutingError {}
