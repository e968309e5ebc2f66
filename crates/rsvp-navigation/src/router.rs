//! Router
//!
//! Decides cache hit vs fetch, runs the content swap and keeps the current
//! route, session history and nav highlighting in step. A navigation either
//! completes fully or leaves all of them untouched.

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use rsvp_fetch::ContentFetcher;
use rsvp_view::TransitionController;

use crate::cache::NavigationCache;
use crate::error::NavigationError;
use crate::history::{Direction, SessionHistory};
use crate::route::Route;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// Target was already the current route
    Unchanged,
    /// Swapped in a cached fragment
    FromCache,
    /// Fetched, cached and swapped in
    Fetched,
}

#[derive(Debug, Default)]
struct NavigationState {
    current: Option<Route>,
    history: SessionHistory,
}

enum HistoryUpdate {
    Push,
    Step(Direction),
}

pub struct Router {
    fetcher: ContentFetcher,
    transitions: TransitionController,
    cache: NavigationCache,
    state: Arc<RwLock<NavigationState>>,
    in_flight: Arc<Mutex<Option<Route>>>,
}

impl Router {
    pub fn new(fetcher: ContentFetcher, transitions: TransitionController) -> Self {
        Self {
            fetcher,
            transitions,
            cache: NavigationCache::new(),
            state: Arc::new(RwLock::new(NavigationState::default())),
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Adopt the route the page was loaded at.
    ///
    /// The fragment already on screen, when known, seeds the cache so that
    /// returning to the landing page needs no request.
    pub fn start(&self, route: Route, fragment: Option<String>) {
        {
            let mut view = self.transitions.view().write();
            if let Some(fragment) = &fragment {
                view.replace_content(fragment);
            }
            view.set_active_route(route.as_str());
        }

        if let Some(fragment) = fragment {
            self.cache.insert(route.clone(), fragment);
        }

        let mut state = self.state.write();
        state.history.push(route.clone());
        state.current = Some(route.clone());

        tracing::info!(route = %route, "Router started");
    }

    pub fn current_route(&self) -> Option<Route> {
        self.state.read().current.clone()
    }

    pub fn history(&self) -> SessionHistory {
        self.state.read().history.clone()
    }

    pub fn cache(&self) -> &NavigationCache {
        &self.cache
    }

    pub fn fetcher(&self) -> &ContentFetcher {
        &self.fetcher
    }

    pub fn transitions(&self) -> &TransitionController {
        &self.transitions
    }

    pub fn is_navigating(&self) -> bool {
        self.in_flight.lock().is_some()
    }

    /// Navigate to `route`, pushing a history entry on success.
    pub async fn navigate(&self, route: Route) -> Result<NavigationOutcome> {
        if self.current_route().as_ref() == Some(&route) {
            return Ok(NavigationOutcome::Unchanged);
        }

        let flight = self.begin_flight(&route)?;
        let loader = self.transitions.show_loader();

        let (fragment, outcome) = match self.resolve(&route).await {
            Ok(resolved) => resolved,
            Err(e) => {
                drop(flight);
                tracing::warn!(route = %route, error = %e, "Navigation failed");
                self.transitions.hide_loader(loader).await;
                return Err(e);
            }
        };

        self.apply(&route, &fragment, HistoryUpdate::Push).await;
        // Committed; the next click may start while the loader fades
        drop(flight);
        self.transitions.hide_loader(loader).await;

        tracing::info!(route = %route, outcome = ?outcome, "Navigated");

        Ok(outcome)
    }

    /// Handle a back/forward history event.
    ///
    /// A target missing from the cache is fetched again; if that fails the
    /// history cursor stays where it was.
    pub async fn traverse(&self, direction: Direction) -> Result<NavigationOutcome> {
        let target = self
            .state
            .read()
            .history
            .peek(direction)
            .cloned()
            .ok_or(NavigationError::NotInHistory(direction.as_str()))?;

        let flight = self.begin_flight(&target)?;

        if self.current_route().as_ref() == Some(&target) {
            self.state.write().history.step(direction);
            return Ok(NavigationOutcome::Unchanged);
        }

        let loader = (!self.cache.contains(&target)).then(|| self.transitions.show_loader());

        let (fragment, outcome) = match self.resolve(&target).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(
                    route = %target,
                    direction = direction.as_str(),
                    error = %e,
                    "History traversal failed"
                );
                drop(flight);
                if let Some(loader) = loader {
                    self.transitions.hide_loader(loader).await;
                }
                return Err(e);
            }
        };

        self.apply(&target, &fragment, HistoryUpdate::Step(direction))
            .await;
        drop(flight);
        if let Some(loader) = loader {
            self.transitions.hide_loader(loader).await;
        }

        tracing::info!(
            route = %target,
            direction = direction.as_str(),
            outcome = ?outcome,
            "Traversed history"
        );

        Ok(outcome)
    }

    /// Cached fragment, or fetch and cache.
    async fn resolve(&self, route: &Route) -> Result<(String, NavigationOutcome)> {
        if let Some(fragment) = self.cache.get(route) {
            return Ok((fragment, NavigationOutcome::FromCache));
        }

        let fragment = self.fetcher.fetch_fragment(route.as_str()).await?;
        self.cache.insert(route.clone(), fragment.clone());

        Ok((fragment, NavigationOutcome::Fetched))
    }

    async fn apply(&self, route: &Route, fragment: &str, update: HistoryUpdate) {
        let state = &self.state;
        self.transitions
            .swap(fragment, move |view| {
                view.set_active_route(route.as_str());

                let mut state = state.write();
                match update {
                    HistoryUpdate::Push => state.history.push(route.clone()),
                    HistoryUpdate::Step(direction) => {
                        state.history.step(direction);
                    }
                }
                state.current = Some(route.clone());
            })
            .await;
    }

    fn begin_flight(&self, route: &Route) -> Result<FlightGuard> {
        let mut slot = self.in_flight.lock();
        if let Some(pending) = slot.as_ref() {
            tracing::debug!(pending = %pending, requested = %route, "Navigation rejected");
            return Err(NavigationError::InFlight {
                pending: pending.to_string(),
                requested: route.to_string(),
            });
        }

        *slot = Some(route.clone());
        Ok(FlightGuard {
            slot: Arc::clone(&self.in_flight),
        })
    }
}

impl Clone for Router {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            transitions: self.transitions.clone(),
            cache: self.cache.clone(),
            state: Arc::clone(&self.state),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

/// Clears the in-flight slot when the navigation ends, however it ends.
struct FlightGuard {
    slot: Arc<Mutex<Option<Route>>>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}
