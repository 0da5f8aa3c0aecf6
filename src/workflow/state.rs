use tracing::debug;

use crate::error::RequestError;

/// Outcome recorded when a submission is abandoned before it finished.
const INTERRUPTED: &str = "An error occurred";

/// Lifecycle of one workflow's submissions.
///
/// `Validating` and `Submitting` form a single admission slot: while either
/// is current, a second submit is refused and inputs are locked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(String),
}

impl RequestState {
    pub fn is_busy(&self) -> bool {
        matches!(self, RequestState::Validating | RequestState::Submitting)
    }

    /// Whether selections and range text may change right now
    pub fn accepts_input(&self) -> bool {
        !self.is_busy()
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, RequestState::Succeeded)
    }

    /// Message of the last failure, if the last attempt failed
    pub fn failure(&self) -> Option<&str> {
        match self {
            RequestState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Enter `Validating` and take the admission slot. Any earlier outcome
    /// is dropped.
    pub fn begin_submit(&mut self) -> Result<Submission<'_>, RequestError> {
        if self.is_busy() {
            return Err(RequestError::Busy);
        }
        self.transition(RequestState::Validating);
        Ok(Submission { state: self })
    }

    pub(crate) fn reject_input(&mut self, reason: String) {
        self.transition(RequestState::Failed(reason));
    }

    /// Clear success and error flags after the inputs changed
    pub(crate) fn reset(&mut self) {
        if *self != RequestState::Idle {
            self.transition(RequestState::Idle);
        }
    }

    fn transition(&mut self, next: RequestState) {
        debug!(from = ?self, to = ?next, "request state");
        *self = next;
    }
}

/// Holds the admission slot for one attempt.
///
/// If it is dropped while the state is still busy (the submit future was
/// cancelled), the attempt ends as `Failed` and the slot reopens.
#[derive(Debug)]
pub struct Submission<'a> {
    state: &'a mut RequestState,
}

impl Submission<'_> {
    pub(crate) fn start_request(&mut self) {
        debug_assert_eq!(*self.state, RequestState::Validating);
        self.state.transition(RequestState::Submitting);
    }

    pub(crate) fn succeed(self) {
        self.state.transition(RequestState::Succeeded);
    }

    /// Record `err` as the outcome and hand it back to the caller.
    pub(crate) fn fail(self, err: RequestError) -> RequestError {
        self.state.transition(RequestState::Failed(err.to_string()));
        err
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        if self.state.is_busy() {
            debug!(state = ?self.state, "submission abandoned");
            self.state
                .transition(RequestState::Failed(INTERRUPTED.to_string()));
        }
    }
}
