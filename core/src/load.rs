//! Request tokens and the generic `idle → loading → loaded | failed` loader.
//!
//! A loader accepts only the response to the request it started last. Older
//! responses are reported as `Settled::Stale` and dropped, so a slow reply for
//! a previous selection can never overwrite the current one.

use tracing::debug;

use crate::error::ApiError;

/// Identifies one outgoing request or one opened panel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Hands out strictly increasing tokens.
#[derive(Debug, Default)]
pub struct TokenSource {
    last: u64,
}

impl TokenSource {
    pub fn next(&mut self) -> RequestToken {
        self.last += 1;
        RequestToken(self.last)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct Loader<T> {
    state: LoadState<T>,
    pending: Option<RequestToken>,
}

impl<T> Default for Loader<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            pending: None,
        }
    }
}

impl<T> Loader<T> {
    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, LoadState::Failed)
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Discards whatever was loaded and waits for `token`.
    pub fn begin(&mut self, token: RequestToken) {
        self.pending = Some(token);
        self.state = LoadState::Loading;
    }

    pub fn finish(&mut self, token: RequestToken, result: Result<T, ApiError>) -> Settled {
        if self.pending != Some(token) {
            debug!(?token, latest = ?self.pending, "dropping stale response");
            return Settled::Stale;
        }
        self.pending = None;
        self.state = match result {
            Ok(value) => LoadState::Loaded(value),
            Err(_) => LoadState::Failed,
        };
        Settled::Applied
    }

    /// Back to `Idle`. Any in-flight request becomes stale.
    pub fn clear(&mut self) {
        self.pending = None;
        self.state = LoadState::Idle;
    }
}
