//! RSVP Enhancers
//!
//! Per-content modules rebuilt from scratch every time the content region
//! is replaced. None of them keep state across swaps:
//! - form validation for name / email / phone
//! - guest table search with a stats badge and a no-results row
//! - `data-label` cells for the narrow table layout
//! - staggered card reveal and button hover lift
//! - Ctrl/Cmd+K to focus the search input

mod animation;
mod error;
mod form;
mod mobile;
mod shortcuts;
mod table;
mod validation;

pub use animation::{CardAnimation, CardReveal, HoverLift};
pub use error::ValidationError;
pub use form::{FieldStatus, FormEnhancer, FormValues, SubmitOutcome, FLOATING_PLACEHOLDER};
pub use mobile::{mobile_labels, CellLabel};
pub use shortcuts::{KeyChord, SEARCH_INPUT_ID};
pub use table::{FilterView, GuestRow, GuestTable, TableSearch};
pub use validation::{validate, validate_email, validate_name, validate_phone, Field};

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Everything bound to the currently displayed fragment.
#[derive(Debug, Default)]
pub struct Enhancements {
    pub form: Option<FormEnhancer>,
    pub search: Option<TableSearch>,
    pub mobile_labels: Vec<CellLabel>,
    pub cards: CardAnimation,
    pub hover: HoverLift,
}

impl Enhancements {
    pub fn from_fragment(fragment: &str) -> Self {
        let enhancements = Self {
            form: FormEnhancer::from_fragment(fragment),
            search: TableSearch::from_fragment(fragment),
            mobile_labels: mobile_labels(fragment),
            cards: CardAnimation::from_fragment(fragment),
            hover: HoverLift::from_fragment(fragment),
        };

        tracing::debug!(
            form = enhancements.form.is_some(),
            search = enhancements.search.is_some(),
            labels = enhancements.mobile_labels.len(),
            cards = enhancements.cards.reveals().len(),
            buttons = enhancements.hover.buttons(),
            "Enhancers bound to content"
        );

        enhancements
    }

    /// Id of the element to focus for `chord`, if it is a shortcut with a
    /// live target.
    pub fn shortcut_target(&self, chord: &KeyChord) -> Option<&'static str> {
        (chord.is_search_shortcut() && self.search.is_some()).then_some(SEARCH_INPUT_ID)
    }
}
