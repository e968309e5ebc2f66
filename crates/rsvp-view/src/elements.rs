//! Page shell elements, resolved once from the initial document

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

const NAV_ITEM_SELECTOR: &str = ".sidebar-item";
const LOADER_SELECTOR: &str = "#pageLoader";
const MENU_TOGGLE_SELECTOR: &str = "#mobileMenuToggle";
const SIDEBAR_SELECTOR: &str = "#sidebar";
const OVERLAY_SELECTOR: &str = "#sidebarOverlay";
const GUEST_BADGE_SELECTOR: &str = "#sidebarGuestCount span";

/// Which parts of the page template exist, and the routes the sidebar
/// links to. Anything absent here turns the matching view update into a
/// no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundElements {
    pub nav_routes: Vec<String>,
    pub loader: bool,
    pub menu_toggle: bool,
    pub sidebar: bool,
    pub overlay: bool,
    pub guest_badge: bool,
}

impl BoundElements {
    pub fn resolve(document: &str) -> Self {
        let doc = Html::parse_document(document);

        let nav_routes = match Selector::parse(NAV_ITEM_SELECTOR) {
            Ok(sel) => doc
                .select(&sel)
                .filter_map(|item| {
                    let value = item.value();
                    value.attr("data-route").or_else(|| value.attr("href"))
                })
                .map(str::to_string)
                .collect(),
            Err(_) => Vec::new(),
        };

        let elements = Self {
            nav_routes,
            loader: has_match(&doc, LOADER_SELECTOR),
            menu_toggle: has_match(&doc, MENU_TOGGLE_SELECTOR),
            sidebar: has_match(&doc, SIDEBAR_SELECTOR),
            overlay: has_match(&doc, OVERLAY_SELECTOR),
            guest_badge: has_match(&doc, GUEST_BADGE_SELECTOR),
        };

        tracing::debug!(
            nav_items = elements.nav_routes.len(),
            loader = elements.loader,
            menu_toggle = elements.menu_toggle,
            guest_badge = elements.guest_badge,
            "Resolved page elements"
        );

        elements
    }
}

fn has_match(doc: &Html, css: &str) -> bool {
    match Selector::parse(css) {
        Ok(sel) => doc.select(&sel).next().is_some(),
        Err(_) => false,
    }
}
