use std::{cell::Cell, future::Future, rc::Rc};

use leptos::{on_cleanup, Scope};
use web_sys::{AbortController, AbortSignal};

#[derive(Default)]
struct ScopeState {
    cancelled: Cell<bool>,
    controller: Option<AbortController>,
}

/// Lifetime of one mounted screen. Requests sent through an API bound to this scope are aborted
/// when the screen is disposed, and [run][ScreenScope::run] drops any result that arrives after
/// that point so no state update reaches a disposed view.
#[derive(Clone, Default)]
pub struct ScreenScope {
    inner: Rc<ScopeState>,
}

impl ScreenScope {
    /// Create a scope tied to the reactive scope `cx`. Cancelled when `cx` is cleaned up.
    pub fn new(cx: Scope) -> Self {
        let controller = match AbortController::new() {
            Ok(controller) => Some(controller),
            Err(error) => {
                log::warn!("Could not create an abort controller. {error:?}");
                None
            }
        };
        let scope = Self {
            inner: Rc::new(ScopeState {
                cancelled: Cell::new(false),
                controller,
            }),
        };
        let cleanup = scope.clone();
        on_cleanup(cx, move || cleanup.cancel());
        scope
    }

    /// Scope with no abort controller, cancelled only by an explicit [cancel][ScreenScope::cancel]
    #[cfg(test)]
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn abort_signal(&self) -> Option<AbortSignal> {
        self.inner.controller.as_ref().map(AbortController::signal)
    }

    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        if let Some(controller) = &self.inner.controller {
            controller.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Await `future` unless the scope is already cancelled. Returns [None] when the scope was
    /// cancelled before or while the future ran.
    pub async fn run<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return None;
        }
        let output = future.await;
        if self.is_cancelled() {
            log::debug!("Discarding result of a request whose screen was disposed");
            return None;
        }
        Some(output)
    }
}

#[cfg(test)]
mod test {
    use super::ScreenScope;

    #[tokio::test]
    async fn run_should_return_output_while_active() {
        let scope = ScreenScope::detached();

        let output = scope.run(async { 42 }).await;

        assert_eq!(output, Some(42));
    }

    #[tokio::test]
    async fn run_should_discard_output_after_cancel_during_request() {
        let scope = ScreenScope::detached();
        let teardown = scope.clone();

        let output = scope
            .run(async move {
                teardown.cancel();
                42
            })
            .await;

        assert_eq!(output, None);
        assert!(scope.is_cancelled());
    }

    #[tokio::test]
    async fn run_should_skip_future_when_already_cancelled() {
        let scope = ScreenScope::detached();
        scope.cancel();
        let mut polled = false;

        let output = scope
            .run(async {
                polled = true;
            })
            .await;

        assert_eq!(output, None);
        assert!(!polled, "future should not run on a cancelled scope");
    }

    #[test]
    fn detached_scope_should_have_no_abort_signal() {
        assert!(ScreenScope::detached().abort_signal().is_none());
    }
}
