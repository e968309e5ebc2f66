//! Staggered card reveal on load

use scraper::{Html, Selector};
use serde::Serialize;

const CARD_SELECTOR: &str = ".win11-card";
const BUTTON_SELECTOR: &str = ".btn";
const STAGGER_MS: u64 = 100;
const TRANSITION_MS: u64 = 400;
const START_OFFSET_PX: u32 = 20;
const HOVER_LIFT_PX: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardReveal {
    pub index: usize,
    pub delay_ms: u64,
}

/// Cards start transparent and `START_OFFSET_PX` lower, then ease into
/// place one after another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardAnimation {
    reveals: Vec<CardReveal>,
}

impl CardAnimation {
    pub fn from_fragment(fragment: &str) -> Self {
        let Ok(sel) = Selector::parse(CARD_SELECTOR) else {
            return Self::default();
        };

        let doc = Html::parse_fragment(fragment);
        let count = doc.select(&sel).count();

        let reveals = (0..count)
            .map(|index| CardReveal {
                index,
                delay_ms: index as u64 * STAGGER_MS,
            })
            .collect();

        Self { reveals }
    }

    pub fn reveals(&self) -> &[CardReveal] {
        &self.reveals
    }

    pub fn transition_ms(&self) -> u64 {
        TRANSITION_MS
    }

    pub fn start_offset_px(&self) -> u32 {
        START_OFFSET_PX
    }
}

/// Buttons rise slightly while hovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HoverLift {
    buttons: usize,
}

impl HoverLift {
    pub fn from_fragment(fragment: &str) -> Self {
        let Ok(sel) = Selector::parse(BUTTON_SELECTOR) else {
            return Self::default();
        };

        let doc = Html::parse_fragment(fragment);
        Self {
            buttons: doc.select(&sel).count(),
        }
    }

    pub fn buttons(&self) -> usize {
        self.buttons
    }

    pub fn lift_px(&self) -> u32 {
        HOVER_LIFT_PX
    }

    /// Inline transform for a button in the given hover state.
    pub fn transform(&self, hovered: bool) -> String {
        if hovered {
            format!("translateY(-{HOVER_LIFT_PX}px)")
        } else {
            "translateY(0)".to_string()
        }
    }
}
