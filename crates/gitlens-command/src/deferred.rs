//! Single-shot completion token handed to long-running commands.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::{Error, Result, TRACING_TARGET};

struct Inner<T> {
    resolver: Mutex<Option<oneshot::Sender<Result<T>>>>,
    receiver: Mutex<Option<oneshot::Receiver<Result<T>>>>,
    settled: AtomicBool,
}

/// A completion token bundling a promise with its one-shot resolver.
///
/// Clones share the same token. The first [`resolve`] or [`reject`] settles
/// it; every later call is a no-op that returns `false`.
///
/// [`resolve`]: Deferred::resolve
/// [`reject`]: Deferred::reject
pub struct Deferred<T = ()> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.is_settled())
            .finish_non_exhaustive()
    }
}

impl<T> Deferred<T> {
    /// Creates an unsettled token.
    pub fn new() -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            inner: Arc::new(Inner {
                resolver: Mutex::new(Some(sender)),
                receiver: Mutex::new(Some(receiver)),
                settled: AtomicBool::new(false),
            }),
        }
    }

    /// Fulfills the token with `value`.
    ///
    /// Returns `false` if the token was already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Fails the token with `error`.
    ///
    /// Returns `false` if the token was already settled.
    pub fn reject(&self, error: Error) -> bool {
        self.settle(Err(error))
    }

    /// Returns whether the token has been resolved or rejected.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.inner.settled.load(Ordering::Acquire)
    }

    /// Takes the awaitable half of the token.
    ///
    /// The promise can be taken once; later calls return an
    /// [`ErrorKind::InvalidState`](crate::ErrorKind::InvalidState) error.
    pub fn promise(&self) -> Result<Promise<T>> {
        let receiver = self
            .inner
            .receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| {
                Error::invalid_state().with_message("completion promise already taken")
            })?;

        Ok(Promise {
            receiver,
            _token: Arc::clone(&self.inner),
        })
    }

    fn settle(&self, outcome: Result<T>) -> bool {
        let resolver = self
            .inner
            .resolver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(resolver) = resolver else {
            tracing::debug!(target: TRACING_TARGET, "Ignoring settlement of a completed token");
            return false;
        };

        self.inner.settled.store(true, Ordering::Release);
        // The promise may already be dropped; the token still counts as settled.
        let _ = resolver.send(outcome);
        true
    }
}

/// Awaitable half of a [`Deferred`].
///
/// Resolves only once the token is settled. The promise keeps the token
/// alive, so a token that is never settled leaves it pending forever.
#[must_use = "promises do nothing unless awaited"]
pub struct Promise<T = ()> {
    receiver: oneshot::Receiver<Result<T>>,
    _token: Arc<Inner<T>>,
}

impl<T> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise").finish_non_exhaustive()
    }
}

impl<T> Future for Promise<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(
                Error::invalid_state().with_message("completion token dropped without settling")
            )),
            Poll::Pending => Poll::Pending,
        }
    }
}
