//! Latest-request-wins bookkeeping for a sequence of registry calls.
//!
//! Each call takes a [`RequestTicket`] before it suspends; on completion the
//! outcome is applied only if no newer ticket has been issued since. Stale
//! outcomes are dropped silently. Nothing is aborted: the superseded
//! request still runs to completion, its result is simply ignored.

use std::{
    fmt::Display,
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::debug;

/// What a consumer should currently display.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Idle | Self::Loading | Self::Error(_) => None,
        }
    }
}

/// Generation captured when a request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct RequestSession<T> {
    generation: u64,
    state: FetchState<T>,
}

impl<T> Default for RequestSession<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            state: FetchState::Idle,
        }
    }
}

impl<T> RequestSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Start a request, superseding any still in flight.
    pub fn begin(&mut self) -> RequestTicket {
        self.generation += 1;
        self.state = FetchState::Loading;
        RequestTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply `outcome` if `ticket` is still the latest. Returns whether it
    /// was applied.
    pub fn settle<E: Display>(&mut self, ticket: RequestTicket, outcome: Result<T, E>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded response"
            );
            return false;
        }
        self.state = match outcome {
            Ok(data) => FetchState::Success(data),
            Err(err) => FetchState::Error(err.to_string()),
        };
        true
    }

    /// Return to `Idle`; anything still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = FetchState::Idle;
    }
}

/// Run `request` against a shared session. The lock is never held while
/// the request is suspended.
pub async fn track<T, E, F>(session: &Mutex<RequestSession<T>>, request: F) -> bool
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    let ticket = lock(session).begin();
    let outcome = request.await;
    lock(session).settle(ticket, outcome)
}

fn lock<T>(session: &Mutex<RequestSession<T>>) -> MutexGuard<'_, RequestSession<T>> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;

    async fn delayed(value: &'static str, millis: u64) -> Result<&'static str, String> {
        sleep(Duration::from_millis(millis)).await;
        Ok(value)
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut session = RequestSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(session.settle(second, Ok::<_, String>("second")));
        assert!(!session.settle(first, Ok::<_, String>("first")));
        assert_eq!(session.state(), &FetchState::Success("second"));
    }

    #[test]
    fn errors_become_messages() {
        let mut session: RequestSession<u32> = RequestSession::new();
        let ticket = session.begin();
        assert!(session.state().is_loading());
        session.settle(ticket, Err("Search failed: 500 Internal Server Error"));
        assert_eq!(
            session.state(),
            &FetchState::Error("Search failed: 500 Internal Server Error".to_string())
        );
    }

    #[test]
    fn reset_invalidates_in_flight() {
        let mut session = RequestSession::new();
        let ticket = session.begin();
        session.reset();
        assert!(!session.settle(ticket, Ok::<_, String>(1)));
        assert_eq!(session.state(), &FetchState::Idle);
    }

    #[tokio::test]
    async fn slow_earlier_response_does_not_overwrite_newer() {
        let session = Mutex::new(RequestSession::new());
        let (first, second) = tokio::join!(
            track(&session, delayed("NCT00000001", 80)),
            track(&session, delayed("NCT00000002", 5)),
        );
        assert!(!first);
        assert!(second);
        assert_eq!(
            session.lock().unwrap().state(),
            &FetchState::Success("NCT00000002")
        );
    }
}
