use std::fmt;

use thiserror::Error;

use crate::api::{ApiError, FALLBACK_ERROR_MESSAGE};
use crate::session::StorageError;

/// Stage of the login handshake at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    RequestToken,
    ValidateCredentials,
    CreateSession,
}

impl LoginStep {
    fn rejection_message(self) -> &'static str {
        match self {
            LoginStep::ValidateCredentials => {
                "Invalid username and/or password"
            }
            _ => FALLBACK_ERROR_MESSAGE,
        }
    }
}

impl fmt::Display for LoginStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoginStep::RequestToken => "request token",
            LoginStep::ValidateCredentials => "validate credentials",
            LoginStep::CreateSession => "create session",
        })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please enter both username and password")]
    MissingCredentials,

    /// The API call for `step` failed; displays the upstream message.
    #[error("{source}")]
    Upstream {
        step: LoginStep,
        #[source]
        source: ApiError,
    },

    /// The API answered 2xx but reported `success: false`.
    #[error("{}", .step.rejection_message())]
    Rejected { step: LoginStep },

    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub(crate) fn upstream(step: LoginStep) -> impl FnOnce(ApiError) -> Self {
        move |source| AuthError::Upstream { step, source }
    }

    pub fn step(&self) -> Option<LoginStep> {
        match self {
            AuthError::Upstream { step, .. } | AuthError::Rejected { step } => {
                Some(*step)
            }
            _ => None,
        }
    }
}
