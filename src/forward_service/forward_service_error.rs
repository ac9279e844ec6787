use crate::forward_service::forward_service_response::ForwardServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardFailureKind {
    Timeout,
    /// The upstream could not be reached or the exchange broke off midway.
    Unreachable,
    Malformed,
}

/// Classifies a client library failure so it can become a [`ForwardServiceError`].
#[cfg_attr(test, mockall::automock)]
pub trait ForwardFailure {
    fn kind(&self) -> ForwardFailureKind;
    fn describe(&self) -> String;
}

impl<T: ForwardFailure> From<T> for ForwardServiceError {
    fn from(err: T) -> Self {
        match err.kind() {
            ForwardFailureKind::Timeout => ForwardServiceError::Timeout,
            ForwardFailureKind::Unreachable => ForwardServiceError::Network(err.describe()),
            ForwardFailureKind::Malformed => ForwardServiceError::InvalidRequest(err.describe()),
        }
    }
}
