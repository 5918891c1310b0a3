//! Loading state shared by every list and detail screen.
//!
//! ```text
//! Loading ──► Ready(data) ──refresh──► Refreshing(data) ──► Ready | Error
//!    │
//!    └──────► Error(message)       focus() always re-enters Loading
//! ```
//!
//! Every `focus()`/`refresh()` hands out a [`Ticket`] for the fetch it
//! starts. Only the newest ticket may resolve the screen; responses that
//! arrive for an older request are dropped.

use parking_lot::Mutex;
use std::future::Future;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Loading,
    Ready(T),
    Refreshing(T),
    Error(String),
}

impl<T> ScreenState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            ScreenState::Ready(data) | ScreenState::Refreshing(data) => Some(data),
            _ => None,
        }
    }

    fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            ScreenState::Ready(data) | ScreenState::Refreshing(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScreenState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self, ScreenState::Refreshing(_))
    }
}

/// Generation of the fetch a state transition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

struct Inner<T> {
    state: ScreenState<T>,
    generation: u64,
}

pub struct Screen<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> Screen<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: ScreenState::Loading,
                generation: 0,
            }),
        }
    }

    pub fn state(&self) -> ScreenState<T> {
        self.inner.lock().state.clone()
    }

    /// The screen gained focus: show the spinner and fetch again.
    pub fn focus(&self) -> Ticket {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.state = ScreenState::Loading;
        Ticket(inner.generation)
    }

    /// Pull-to-refresh. Keeps the current data on screen while fetching;
    /// without data it is the same as `focus`.
    pub fn refresh(&self) -> Ticket {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.state = match std::mem::replace(&mut inner.state, ScreenState::Loading) {
            ScreenState::Ready(data) | ScreenState::Refreshing(data) => ScreenState::Refreshing(data),
            _ => ScreenState::Loading,
        };
        Ticket(inner.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.inner.lock().generation == ticket.0
    }

    /// Applies the outcome of the fetch started with `ticket`. Returns
    /// `false` when a newer fetch has started since and the outcome was dropped.
    pub fn resolve(&self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        let mut inner = self.inner.lock();
        if inner.generation != ticket.0 {
            debug!(
                "Dropping stale response (generation {}, current {})",
                ticket.0, inner.generation
            );
            return false;
        }

        inner.state = match outcome {
            Ok(data) => ScreenState::Ready(data),
            Err(message) => ScreenState::Error(message),
        };
        true
    }

    /// Runs `fetch` and resolves the screen with its outcome.
    pub async fn load<F, E>(&self, ticket: Ticket, fetch: F, on_error: E) -> bool
    where
        F: Future<Output = Result<T, crate::error::ApiError>>,
        E: FnOnce(&crate::error::ApiError) -> String,
    {
        let outcome = fetch.await.map_err(|e| on_error(&e));
        self.resolve(ticket, outcome)
    }

    /// Edits the data currently on screen in place, e.g. after a delete.
    /// Does nothing while loading or in error.
    pub fn update<F: FnOnce(&mut T)>(&self, f: F) -> bool {
        let mut inner = self.inner.lock();
        match inner.state.data_mut() {
            Some(data) => {
                f(data);
                true
            }
            None => false,
        }
    }
}

impl<T: Clone> Default for Screen<T> {
    fn default() -> Self {
        Self::new()
    }
}
