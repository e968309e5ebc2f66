//! Two-phase content transition
//!
//! ```text
//! mark Out ─ fade_out ─▶ replace content, commit ─ mark In ─ fade_in ─▶ clear, notify
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::sleep;

use crate::timings::TransitionTimings;
use crate::view::{PageView, SharedView, TransitionPhase};

/// Notified after every completed swap so per-content modules can bind to
/// the new markup. The old markup, and anything bound to it, is gone.
pub trait SwapObserver: Send + Sync {
    fn content_swapped(&self, fragment: &str);
}

#[derive(Clone)]
pub struct TransitionController {
    view: SharedView,
    timings: TransitionTimings,
    observer: Option<Arc<dyn SwapObserver>>,
    /// Bumped by every `show_loader`; a hide only applies to the latest show
    loader_epoch: Arc<AtomicU64>,
}

impl TransitionController {
    pub fn new(view: SharedView, timings: TransitionTimings) -> Self {
        Self {
            view,
            timings,
            observer: None,
            loader_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SwapObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    pub fn timings(&self) -> TransitionTimings {
        self.timings
    }

    /// Replace the displayed fragment.
    ///
    /// `commit` runs under the same write lock that inserts the new content,
    /// so the renderer never sees new content with old navigation state.
    /// A swap is never interrupted once started.
    pub async fn swap<F>(&self, fragment: &str, commit: F)
    where
        F: FnOnce(&mut PageView) + Send,
    {
        self.view.write().begin_transition(TransitionPhase::Out);
        tracing::debug!(phase = TransitionPhase::Out.css_class(), "Content transition");
        sleep(self.timings.fade_out()).await;

        {
            let mut view = self.view.write();
            view.replace_content(fragment);
            commit(&mut view);
            view.close_menu();
            view.begin_transition(TransitionPhase::In);
        }
        tracing::debug!(phase = TransitionPhase::In.css_class(), "Content transition");
        sleep(self.timings.fade_in()).await;

        self.view.write().end_transition();

        if let Some(observer) = &self.observer {
            observer.content_swapped(fragment);
        }
    }

    /// Show the loading indicator. The returned epoch is handed back to
    /// [`hide_loader`](Self::hide_loader).
    pub fn show_loader(&self) -> u64 {
        let mut view = self.view.write();
        let epoch = self.loader_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        view.set_loading(true);
        epoch
    }

    /// Hide the loader after the configured delay, unless another
    /// `show_loader` happened in the meantime.
    pub async fn hide_loader(&self, epoch: u64) {
        sleep(self.timings.loader_hide()).await;

        let mut view = self.view.write();
        if self.loader_epoch.load(Ordering::SeqCst) == epoch {
            view.set_loading(false);
        } else {
            tracing::debug!(epoch, "Stale loader hide skipped");
        }
    }
}
