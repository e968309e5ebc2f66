//! RSVP Page View
//!
//! Rust owns the page shell state; the webview only mirrors it.
//! - [`BoundElements`]: the shell elements found once at startup
//! - [`PageView`]: content, transition marker, loader, nav, menu, badge
//! - [`TransitionController`]: two-phase fade around a content swap

mod elements;
mod timings;
mod transition;
mod view;

pub use elements::BoundElements;
pub use timings::TransitionTimings;
pub use transition::{SwapObserver, TransitionController};
pub use view::{NavItem, PageView, SharedView, TransitionPhase};
