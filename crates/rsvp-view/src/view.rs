//! Page shell state mirrored by the renderer

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::elements::BoundElements;

pub type SharedView = Arc<RwLock<PageView>>;

/// Marker carried by the content container while a swap is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    /// Old content fading out
    Out,
    /// New content fading in
    In,
}

impl TransitionPhase {
    pub fn css_class(&self) -> &'static str {
        match self {
            TransitionPhase::Out => "view-transition-out",
            TransitionPhase::In => "view-transition-in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub route: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    #[serde(skip)]
    elements: BoundElements,
    content_html: String,
    transition: Option<TransitionPhase>,
    loading: bool,
    nav_items: Vec<NavItem>,
    menu_open: bool,
    guest_badge: Option<String>,
}

impl PageView {
    pub fn new(elements: BoundElements) -> Self {
        let nav_items = elements
            .nav_routes
            .iter()
            .map(|route| NavItem {
                route: route.clone(),
                active: false,
            })
            .collect();

        Self {
            elements,
            content_html: String::new(),
            transition: None,
            loading: false,
            nav_items,
            menu_open: false,
            guest_badge: None,
        }
    }

    pub fn shared(self) -> SharedView {
        Arc::new(RwLock::new(self))
    }

    pub fn elements(&self) -> &BoundElements {
        &self.elements
    }

    pub fn content_html(&self) -> &str {
        &self.content_html
    }

    pub fn replace_content(&mut self, html: &str) {
        self.content_html = html.to_string();
    }

    pub fn transition(&self) -> Option<TransitionPhase> {
        self.transition
    }

    pub fn begin_transition(&mut self, phase: TransitionPhase) {
        self.transition = Some(phase);
    }

    pub fn end_transition(&mut self) {
        self.transition = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.elements.loader {
            self.loading = loading;
        }
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav_items
    }

    pub fn active_route(&self) -> Option<&str> {
        self.nav_items
            .iter()
            .find(|item| item.active)
            .map(|item| item.route.as_str())
    }

    /// Mark every nav item pointing at `route` active and clear the rest.
    pub fn set_active_route(&mut self, route: &str) {
        for item in &mut self.nav_items {
            item.active = item.route == route;
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Sidebar, overlay and toggle flip together.
    pub fn toggle_menu(&mut self) {
        if self.elements.menu_toggle {
            self.menu_open = !self.menu_open;
        }
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Clicking the overlay closes the menu; there is nothing to click
    /// when the template has no overlay.
    pub fn overlay_clicked(&mut self) {
        if self.elements.overlay {
            self.close_menu();
        }
    }

    pub fn guest_badge(&self) -> Option<&str> {
        self.guest_badge.as_deref()
    }

    pub fn set_guest_badge(&mut self, text: String) {
        if self.elements.guest_badge {
            self.guest_badge = Some(text);
        }
    }
}
