//! Mounted animator with its cancellation token and pending wake.

use super::{Animator, CancelToken, Wake};
use rand::RngCore;
use std::time::Duration;
use tracing::debug;

/// An animator mounted on the scheduler.
///
/// # Lifecycle
///
/// - [`Task::mount`] captures a fresh [`CancelToken`] and schedules an immediate
///   first resume.
/// - [`Task::poll`] checks the token *before* anything else. A cancelled task is
///   never resumed again and its pending wake collapses to [`Wake::Never`].
/// - [`Task::unmount`] flips the token. `Drop` does the same, so every mount is
///   paired with exactly one teardown.
#[derive(Debug)]
pub struct Task<A> {
    label: &'static str,
    animator: A,
    token: CancelToken,
    pending: Wake,
    resumes: u64,
}

impl<A: Animator> Task<A> {
    /// Mount `animator` at clock time `now`.
    pub fn mount(label: &'static str, animator: A, now: Duration) -> Self {
        debug!(task = label, at_ms = now.as_millis() as u64, "mounted");
        Self {
            label,
            animator,
            token: CancelToken::new(),
            pending: Wake::At(now),
            resumes: 0,
        }
    }

    /// Resume the animator if its pending wake is due.
    ///
    /// Returns `true` if the animator ran.
    pub fn poll(&mut self, now: Duration, frame: bool, rng: &mut dyn RngCore) -> bool {
        if self.token.is_cancelled() {
            self.pending = Wake::Never;
            return false;
        }
        if !self.pending.is_due(now, frame) {
            return false;
        }
        self.pending = self.animator.resume(now, rng);
        self.resumes += 1;
        true
    }
}

impl<A> Task<A> {
    /// Tear the task down. No further resumes happen after this returns.
    pub fn unmount(&mut self) {
        if !self.token.is_cancelled() {
            debug!(task = self.label, resumes = self.resumes, "unmounted");
        }
        self.token.cancel();
        self.pending = Wake::Never;
    }

    /// Whether the task has been torn down (by [`unmount`](Self::unmount) or its token).
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A handle on this task's cancellation flag.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// The wake the task is currently waiting for.
    pub fn pending(&self) -> Wake {
        if self.token.is_cancelled() {
            Wake::Never
        } else {
            self.pending
        }
    }

    /// Read access to the animator's state.
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Event-listener access to the animator; `None` once the task is torn down.
    pub fn listener(&mut self) -> Option<&mut A> {
        if self.token.is_cancelled() {
            None
        } else {
            Some(&mut self.animator)
        }
    }

    /// Number of times the animator has been resumed.
    pub fn resumes(&self) -> u64 {
        self.resumes
    }

    /// Diagnostic label given at mount.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<A> Drop for Task<A> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
