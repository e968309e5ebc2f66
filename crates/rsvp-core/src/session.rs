//! Page session
//!
//! The context object for one page load. Everything that used to be page
//! globals (router, cache, bound elements, enhancers) hangs off it.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};

use rsvp_enhance::{Enhancements, Field, FilterView, FormValues, KeyChord, SubmitOutcome};
use rsvp_fetch::{
    extract_fragment, guest_badge_text, ContentFetcher, ContentSelector, DocumentSource,
    HttpSource,
};
use rsvp_navigation::{Direction, NavigationOutcome, Route, Router};
use rsvp_view::{BoundElements, PageView, SharedView, SwapObserver, TransitionController};

use crate::config::Config;
use crate::Result;

/// Rebuilds the enhancers whenever the content region is replaced; the old
/// bindings went away with the old markup.
struct Rebinder {
    enhancements: Arc<RwLock<Enhancements>>,
}

impl SwapObserver for Rebinder {
    fn content_swapped(&self, fragment: &str) {
        *self.enhancements.write() = Enhancements::from_fragment(fragment);
    }
}

pub struct PageSession {
    config: Config,
    router: Router,
    enhancements: Arc<RwLock<Enhancements>>,
}

impl PageSession {
    /// Start a session for a page already loaded at `route` with `document`.
    pub fn start(
        config: Config,
        source: Arc<dyn DocumentSource>,
        route: &str,
        document: &str,
    ) -> Result<Self> {
        config.validate()?;

        let route = Route::parse(route)?;
        let region = ContentSelector::parse(&config.content_selector)?;

        let view = PageView::new(BoundElements::resolve(document)).shared();
        let enhancements = Arc::new(RwLock::new(Enhancements::default()));
        let transitions = TransitionController::new(view, config.timings).with_observer(
            Arc::new(Rebinder {
                enhancements: Arc::clone(&enhancements),
            }),
        );

        let fragment = extract_fragment(document, &region);
        if fragment.is_none() {
            tracing::warn!(
                route = %route,
                selector = region.as_str(),
                "Initial document has no content region"
            );
        }

        let router = Router::new(ContentFetcher::new(source, region), transitions);
        *enhancements.write() = Enhancements::from_fragment(fragment.as_deref().unwrap_or(""));
        router.start(route, fragment);

        Ok(Self {
            config,
            router,
            enhancements,
        })
    }

    /// Load `route` from the configured server and start a session on it.
    pub async fn open(config: Config, route: &str) -> Result<Self> {
        config.validate()?;

        let source = Arc::new(HttpSource::with_timeout(
            &config.base_url,
            config.request_timeout(),
        )?);
        let document = source.fetch_document(route).await?;

        Self::start(config, source, route, &document)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn shared_view(&self) -> &SharedView {
        self.router.transitions().view()
    }

    /// Snapshot of the page state for the renderer.
    pub fn view(&self) -> PageView {
        self.shared_view().read().clone()
    }

    pub fn current_route(&self) -> Option<Route> {
        self.router.current_route()
    }

    pub fn with_enhancements<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Enhancements) -> T,
    {
        f(&mut self.enhancements.write())
    }

    // === Navigation ===

    pub async fn navigate(&self, route: &str) -> Result<NavigationOutcome> {
        let route = Route::parse(route)?;
        Ok(self.router.navigate(route).await?)
    }

    pub async fn back(&self) -> Result<NavigationOutcome> {
        Ok(self.router.traverse(Direction::Back).await?)
    }

    pub async fn forward(&self) -> Result<NavigationOutcome> {
        Ok(self.router.traverse(Direction::Forward).await?)
    }

    // === Shell ===

    pub fn toggle_menu(&self) {
        self.shared_view().write().toggle_menu();
    }

    pub fn overlay_clicked(&self) {
        self.shared_view().write().overlay_clicked();
    }

    /// Re-count guests from the listing page and update the sidebar badge.
    /// On failure the badge keeps its previous text.
    pub async fn refresh_guest_count(&self) -> Result<usize> {
        let listing = &self.config.listing_route;
        match self.router.fetcher().fetch_guest_count(listing).await {
            Ok(count) => {
                self.shared_view()
                    .write()
                    .set_guest_badge(guest_badge_text(count));
                tracing::debug!(count, "Guest count updated");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(route = %listing, error = %e, "Guest count update failed");
                Err(e.into())
            }
        }
    }

    /// Refresh the guest badge now and then every poll interval.
    pub fn spawn_guest_poller(&self) -> JoinHandle<()> {
        let session = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(session.config.guest_poll_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let _ = session.refresh_guest_count().await;
            }
        })
    }

    // === Enhancers ===

    /// Live table search. `None` when the content has no searchable table.
    pub fn search(&self, term: &str) -> Option<FilterView> {
        self.with_enhancements(|e| e.search.as_mut().map(|search| search.filter(term)))
    }

    pub fn field_blur(&self, field: Field, value: &str) -> bool {
        self.with_enhancements(|e| {
            e.form
                .as_mut()
                .map_or(true, |form| form.on_blur(field, value))
        })
    }

    pub fn field_input(&self, field: Field) {
        self.with_enhancements(|e| {
            if let Some(form) = e.form.as_mut() {
                form.on_input(field);
            }
        });
    }

    /// Validate and, when accepted, schedule a guest count refresh.
    /// `None` when the content has no RSVP form.
    pub fn submit_form(&self, values: &FormValues) -> Option<SubmitOutcome> {
        let outcome = self.with_enhancements(|e| e.form.as_mut().map(|form| form.submit(values)))?;

        if matches!(outcome, SubmitOutcome::Accepted { .. }) {
            let session = self.clone();
            tokio::spawn(async move {
                sleep(session.config.guest_refresh_delay()).await;
                let _ = session.refresh_guest_count().await;
            });
        }

        Some(outcome)
    }

    pub fn shortcut(&self, chord: &KeyChord) -> Option<&'static str> {
        self.enhancements.read().shortcut_target(chord)
    }
}

impl Clone for PageSession {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            router: self.router.clone(),
            enhancements: Arc::clone(&self.enhancements),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rsvp_fetch::FetchError;
    use rsvp_view::TransitionTimings;
    use std::collections::HashMap;
    use std::time::Duration;

    const SHELL_HEAD: &str = r#"<html><body>
        <button id="mobileMenuToggle"></button>
        <div id="sidebarOverlay"></div>
        <aside id="sidebar">
          <a class="sidebar-item" data-route="/">Home</a>
          <a class="sidebar-item" data-route="/form">RSVP</a>
          <a class="sidebar-item" data-route="/list">Guests</a>
          <div id="sidebarGuestCount"><span></span></div>
        </aside>
        <div id="pageLoader"></div>
        <main id="mainContent"><div class="content-wrapper">"#;
    const SHELL_TAIL: &str = "</div></main></body></html>";

    const FORM: &str = "<form method=\"POST\"><input name=\"name\"><input name=\"email\">\
                        <input name=\"phone\"><button type=\"submit\">Submit RSVP</button></form>";

    fn page(body: &str) -> String {
        format!("{SHELL_HEAD}{body}{SHELL_TAIL}")
    }

    fn listing(guests: &[&str]) -> String {
        let rows: String = if guests.is_empty() {
            "<tr><td colspan=\"3\">No RSVPs yet</td></tr>".to_string()
        } else {
            guests
                .iter()
                .map(|g| format!("<tr><td>{g}</td><td>x@y.z</td><td>1234567890</td></tr>"))
                .collect()
        };
        page(&format!(
            "<table class=\"table\"><thead><tr><th>Name</th><th>Email</th><th>Phone</th></tr></thead>\
             <tbody>{rows}</tbody></table>"
        ))
    }

    #[derive(Default)]
    struct FakeSource {
        pages: Mutex<HashMap<String, String>>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn site() -> Arc<Self> {
            let source = Self::default();
            source.set("/", page("<h1>Welcome</h1>"));
            source.set("/form", page(FORM));
            source.set("/list", listing(&["Alice Smith", "Bob Jones"]));
            Arc::new(source)
        }

        fn set(&self, route: &str, document: String) {
            self.pages.lock().insert(route.to_string(), document);
        }

        fn remove(&self, route: &str) {
            self.pages.lock().remove(route);
        }

        fn requests_for(&self, route: &str) -> usize {
            self.requests.lock().iter().filter(|r| *r == route).count()
        }
    }

    #[async_trait]
    impl DocumentSource for FakeSource {
        async fn fetch_document(&self, route: &str) -> rsvp_fetch::Result<String> {
            self.requests.lock().push(route.to_string());
            self.pages
                .lock()
                .get(route)
                .cloned()
                .ok_or_else(|| FetchError::Network(format!("{route} unreachable")))
        }
    }

    fn config() -> Config {
        Config {
            timings: TransitionTimings::instant(),
            ..Config::default()
        }
    }

    fn session(source: &Arc<FakeSource>, route: &str) -> PageSession {
        let document = source.pages.lock()[route].clone();
        PageSession::start(config(), source.clone(), route, &document).unwrap()
    }

    #[tokio::test]
    async fn test_start_binds_initial_page() {
        let source = FakeSource::site();
        let session = session(&source, "/form");

        let view = session.view();
        assert_eq!(view.content_html(), FORM);
        assert_eq!(view.active_route(), Some("/form"));
        assert_eq!(session.router().cache().len(), 1);
        assert!(session.field_blur(Field::Name, "Al"));
        assert!(!session.field_blur(Field::Email, "a@b"));
        assert!(session.search("x").is_none());
    }

    #[tokio::test]
    async fn test_navigation_rebinds_enhancers() {
        let source = FakeSource::site();
        let session = session(&source, "/");

        let outcome = session.navigate("/list").await.unwrap();
        assert_eq!(outcome, NavigationOutcome::Fetched);

        let view = session.search("smith").unwrap();
        assert_eq!(view.visible_rows, vec![0]);
        assert_eq!(view.stats, "Showing 1 of 2 Guests");
        assert_eq!(
            session.with_enhancements(|e| e.mobile_labels.len()),
            6
        );

        let chord = KeyChord {
            key: "k".to_string(),
            ctrl: true,
            meta: false,
        };
        assert_eq!(session.shortcut(&chord), Some("guestSearch"));

        session.back().await.unwrap();
        assert!(session.search("smith").is_none());
        assert_eq!(session.shortcut(&chord), None);
        assert_eq!(source.requests_for("/"), 0);
    }

    #[tokio::test]
    async fn test_failed_navigation_keeps_page() {
        let source = FakeSource::site();
        let session = session(&source, "/list");
        source.remove("/form");

        assert!(session.navigate("/form").await.is_err());
        assert_eq!(session.current_route(), Some(Route::parse("/list").unwrap()));
        assert_eq!(session.router().history().len(), 1);
        assert!(session.search("bob").is_some());
        assert!(!session.view().is_loading());
    }

    #[tokio::test]
    async fn test_navigation_closes_menu() {
        let source = FakeSource::site();
        let session = session(&source, "/");

        session.toggle_menu();
        assert!(session.view().is_menu_open());
        session.navigate("/form").await.unwrap();
        assert!(!session.view().is_menu_open());
    }

    #[tokio::test]
    async fn test_guest_badge() {
        let source = FakeSource::site();
        let session = session(&source, "/");

        assert_eq!(session.refresh_guest_count().await.unwrap(), 2);
        assert_eq!(session.view().guest_badge(), Some("2 Guests"));

        source.set("/list", listing(&["Alice Smith"]));
        session.refresh_guest_count().await.unwrap();
        assert_eq!(session.view().guest_badge(), Some("1 Guest"));

        source.set("/list", listing(&[]));
        session.refresh_guest_count().await.unwrap();
        assert_eq!(session.view().guest_badge(), Some("0 Guests"));

        source.remove("/list");
        assert!(session.refresh_guest_count().await.is_err());
        assert_eq!(session.view().guest_badge(), Some("0 Guests"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_guest_poller() {
        let source = FakeSource::site();
        let session = session(&source, "/");

        let poller = session.spawn_guest_poller();
        sleep(Duration::from_millis(10)).await;
        assert_eq!(session.view().guest_badge(), Some("2 Guests"));

        source.set("/list", listing(&["Alice Smith", "Bob Jones", "Carol"]));
        sleep(Duration::from_secs(30)).await;
        assert_eq!(session.view().guest_badge(), Some("3 Guests"));
        assert_eq!(source.requests_for("/list"), 2);

        poller.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_submit_refreshes_badge() {
        let source = FakeSource::site();
        let session = session(&source, "/form");

        let blocked = session
            .submit_form(&FormValues {
                name: "A".to_string(),
                email: "a@b.c".to_string(),
                phone: "(123) 456-7890".to_string(),
            })
            .unwrap();
        assert!(matches!(blocked, SubmitOutcome::Blocked { focus: Field::Name, .. }));

        let accepted = session
            .submit_form(&FormValues {
                name: "Al".to_string(),
                email: "a@b.c".to_string(),
                phone: "(123) 456-7890".to_string(),
            })
            .unwrap();
        assert!(matches!(accepted, SubmitOutcome::Accepted { .. }));

        sleep(Duration::from_millis(500)).await;
        assert_eq!(session.view().guest_badge(), None);

        sleep(Duration::from_millis(600)).await;
        assert_eq!(session.view().guest_badge(), Some("2 Guests"));
        assert_eq!(source.requests_for("/list"), 1);
    }

    #[test]
    fn test_start_rejects_bad_config() {
        let source = FakeSource::site();
        let document = page("<h1>Welcome</h1>");
        let config = Config {
            listing_route: "list".to_string(),
            ..config()
        };
        assert!(PageSession::start(config, source, "/", &document).is_err());
    }
}
