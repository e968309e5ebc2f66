//! Fragment cache
//!
//! Route → content fragment, for the lifetime of a page session. Entries
//! are never evicted.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::route::Route;

#[derive(Default)]
pub struct NavigationCache {
    entries: Arc<RwLock<HashMap<Route, String>>>,
}

impl NavigationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, route: &Route) -> Option<String> {
        self.entries.read().get(route).cloned()
    }

    pub fn contains(&self, route: &Route) -> bool {
        self.entries.read().contains_key(route)
    }

    pub fn insert(&self, route: Route, fragment: String) {
        tracing::debug!(route = %route, bytes = fragment.len(), "Cached fragment");
        self.entries.write().insert(route, fragment);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.entries.read().keys().cloned().collect()
    }
}

impl Clone for NavigationCache {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache() {
        let cache = NavigationCache::new();
        let form = Route::parse("/form").unwrap();
        assert!(cache.is_empty());
        assert!(cache.get(&form).is_none());

        cache.insert(form.clone(), "<form></form>".to_string());
        assert!(cache.contains(&form));
        assert_eq!(cache.get(&form).as_deref(), Some("<form></form>"));

        // Clones share entries
        let shared = cache.clone();
        shared.insert(Route::parse("/list").unwrap(), "<table></table>".to_string());
        assert_eq!(cache.len(), 2);
    }
}
