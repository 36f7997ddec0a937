//! Dashboard controller
//!
//! Owns the fetch cycle: skeletons, fetch with retry, then exactly one of
//! rows, an error row, or a session-expired redirect. Cycles are numbered and
//! only the latest one may touch the page once its response arrives.

use super::error::DashboardError;
use super::fetcher::{ApiResponse, RequestOptions, RetryPolicy, Transport, fetch_with_retry};
use super::filter::{Debouncer, apply_filter};
use super::render::{Rendered, TableRenderer};
use super::scheduler::Scheduler;
use super::surface::UiSurface;
use super::toast::{Notifier, Toast, ToastKind};
use crate::consts::dashboard_consts::{fetching, session, timing, toast};
use crate::logging::LogLevel;
use crate::model::VmRecord;
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Where the dashboard is in its current fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Success { count: usize },
    Error { message: String },
    AuthExpired { redirect: String },
}

/// What a call to [`Dashboard::refresh`] did to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The cycle was the latest when its response arrived.
    Applied(Phase),
    /// A newer cycle started meanwhile; the response was dropped.
    Stale { generation: u64 },
}

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub endpoint: String,
    pub retry: RetryPolicy,
    pub initial_delay: Duration,
    pub redirect_delay: Duration,
    pub button_reset_delay: Duration,
    pub search_debounce: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            endpoint: fetching::VMS_ENDPOINT.to_string(),
            retry: RetryPolicy::default(),
            initial_delay: timing::initial_load_delay(),
            redirect_delay: timing::auth_redirect_delay(),
            button_reset_delay: timing::refresh_button_reset(),
            search_debounce: timing::search_debounce(),
        }
    }
}

/// A key press as delivered by the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    /// The Cmd key on macOS.
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Shortcut {
    Refresh,
    FocusSearch,
}

fn shortcut_for(press: &KeyPress) -> Option<Shortcut> {
    if !(press.ctrl || press.meta) {
        return None;
    }
    match press.key.as_str() {
        "r" => Some(Shortcut::Refresh),
        "f" => Some(Shortcut::FocusSearch),
        _ => None,
    }
}

/// Body of a 401 from the VM endpoint.
#[derive(Debug, Deserialize)]
struct AuthBody {
    #[serde(default)]
    redirect: Option<String>,
}

/// The dashboard page. Clones share the same state.
#[derive(Clone)]
pub struct Dashboard {
    inner: Rc<DashboardInner>,
}

struct DashboardInner {
    surface: UiSurface,
    renderer: TableRenderer,
    notifier: Notifier,
    transport: Rc<dyn Transport>,
    scheduler: Rc<dyn Scheduler>,
    settings: DashboardSettings,
    generation: Cell<u64>,
    phase: RefCell<Phase>,
    search: Debouncer,
}

impl Dashboard {
    pub fn new(
        surface: UiSurface,
        transport: Rc<dyn Transport>,
        scheduler: Rc<dyn Scheduler>,
        settings: DashboardSettings,
    ) -> Self {
        let notifier = Notifier::new(
            Rc::clone(&surface.toasts),
            Rc::clone(&surface.page),
            Rc::clone(&scheduler),
        );
        let search = Debouncer::new(Rc::clone(&scheduler), settings.search_debounce);
        Self {
            inner: Rc::new(DashboardInner {
                renderer: TableRenderer::new(Rc::clone(&surface.table)),
                surface,
                notifier,
                transport,
                scheduler,
                settings,
                generation: Cell::new(0),
                phase: RefCell::new(Phase::Idle),
                search,
            }),
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    pub fn phase(&self) -> Phase {
        self.inner.phase.borrow().clone()
    }

    /// Number of the most recently started fetch cycle.
    pub fn generation(&self) -> u64 {
        self.inner.generation.get()
    }

    /// Schedules the first load after the entrance delay.
    pub fn start(&self) {
        let dashboard = self.clone();
        let wait = self.inner.scheduler.sleep(self.inner.settings.initial_delay);
        self.inner.scheduler.spawn(Box::pin(async move {
            wait.await;
            dashboard.refresh().await;
        }));
    }

    /// Runs one fetch cycle.
    pub async fn refresh(&self) -> RefreshOutcome {
        let inner = &self.inner;
        let generation = inner.generation.get() + 1;
        inner.generation.set(generation);

        // Superseded by the re-filter that follows rendering.
        inner.search.cancel();
        inner.surface.page.hide_error_banner();
        inner.renderer.show_loading();
        *inner.phase.borrow_mut() = Phase::Loading;

        let options = RequestOptions::default().header("Accept", "application/json");
        let result = fetch_with_retry(
            inner.transport.as_ref(),
            inner.scheduler.as_ref(),
            &inner.settings.endpoint,
            &options,
            inner.settings.retry,
        )
        .await;

        let latest = inner.generation.get();
        if generation != latest {
            log::debug!(
                "Dropping response of fetch cycle {} (latest is {})",
                generation,
                latest
            );
            return RefreshOutcome::Stale { generation };
        }

        let phase = match result {
            Ok(response) if response.is_unauthorized() => self.session_expired(&response),
            Ok(response) => match response.json::<Vec<VmRecord>>() {
                Ok(vms) => self.loaded(&vms),
                Err(e) => self.failed(DashboardError::from(e)),
            },
            Err(e) => self.failed(DashboardError::from(e)),
        };

        *inner.phase.borrow_mut() = phase.clone();
        RefreshOutcome::Applied(phase)
    }

    /// Refresh button: clears the search, shows the button as busy for the
    /// cycle plus a short grace period.
    pub async fn click_refresh(&self) -> RefreshOutcome {
        let page = Rc::clone(&self.inner.surface.page);
        page.clear_search();
        page.set_refresh_loading(true);

        let outcome = self.refresh().await;
        let generation = match outcome {
            RefreshOutcome::Stale { generation } => generation,
            RefreshOutcome::Applied(_) => self.generation(),
        };

        let dashboard = self.clone();
        let wait = self
            .inner
            .scheduler
            .sleep(self.inner.settings.button_reset_delay);
        self.inner.scheduler.spawn(Box::pin(async move {
            wait.await;
            // A newer cycle still in flight owns the button.
            if dashboard.generation() != generation && dashboard.phase() == Phase::Loading {
                log::debug!("Keeping refresh button busy for a newer fetch cycle");
                return;
            }
            page.set_refresh_loading(false);
        }));
        outcome
    }

    /// Search field input: filters once typing pauses.
    pub fn on_search_input(&self) {
        let table = Rc::clone(&self.inner.surface.table);
        let page = Rc::clone(&self.inner.surface.page);
        self.inner.search.call(move || {
            let term = page.search_term();
            let outcome = apply_filter(table.as_ref(), &term);
            log::debug!(
                "Filter {:?}: {} shown, {} hidden",
                term,
                outcome.visible,
                outcome.hidden
            );
        });
    }

    /// Handles a global key press. Returns `true` when it was a dashboard
    /// shortcut and the browser default must be suppressed.
    pub fn handle_key(&self, press: &KeyPress) -> bool {
        match shortcut_for(press) {
            Some(Shortcut::Refresh) => {
                let dashboard = self.clone();
                self.inner.scheduler.spawn(Box::pin(async move {
                    dashboard.click_refresh().await;
                }));
                true
            }
            Some(Shortcut::FocusSearch) => {
                self.inner.surface.page.focus_search();
                true
            }
            None => false,
        }
    }

    fn loaded(&self, vms: &[VmRecord]) -> Phase {
        let inner = &self.inner;
        if inner.renderer.show_vms(vms) == Rendered::Empty {
            inner
                .notifier
                .show_message("No powered on VMs found.", ToastKind::Warning);
        }

        let stamp = chrono::Local::now().format("%I:%M:%S %p").to_string();
        inner.surface.page.set_last_updated(&stamp);

        let term = inner.surface.page.search_term();
        if !term.is_empty() {
            apply_filter(inner.surface.table.as_ref(), &term);
        }

        log::info!("Loaded {} powered-on VMs", vms.len());
        inner.notifier.show(
            Toast::new(
                "Data Refreshed",
                format!("Successfully loaded {} virtual machines.", vms.len()),
            )
            .with_kind(ToastKind::Success)
            .with_duration(Duration::from_millis(toast::REFRESHED_DURATION_MS)),
        );

        Phase::Success { count: vms.len() }
    }

    fn session_expired(&self, response: &ApiResponse) -> Phase {
        let inner = &self.inner;
        let redirect = response
            .json::<AuthBody>()
            .ok()
            .and_then(|body| body.redirect)
            .filter(|target| !target.is_empty())
            .unwrap_or_else(|| session::DEFAULT_LOGIN_PATH.to_string());
        log::warn!("Session expired, redirecting to {}", redirect);

        inner.notifier.show(
            Toast::new(
                "Session Expired",
                "Your session has expired. Redirecting to login...",
            )
            .with_kind(ToastKind::Warning)
            .with_duration(Duration::from_millis(toast::SESSION_EXPIRED_DURATION_MS)),
        );

        let page = Rc::clone(&inner.surface.page);
        let target = redirect.clone();
        let wait = inner.scheduler.sleep(inner.settings.redirect_delay);
        inner.scheduler.spawn(Box::pin(async move {
            wait.await;
            page.navigate(&target);
        }));

        Phase::AuthExpired { redirect }
    }

    fn failed(&self, error: DashboardError) -> Phase {
        let inner = &self.inner;
        let level = match &error {
            DashboardError::Transport(e) => e.log_level(),
            _ => LogLevel::Error,
        };
        log::log!(log::Level::from(level), "Error fetching VM data: {}", error);

        let message = error.to_string();
        inner.notifier.show_message(
            &format!("Error loading VM data: {message}. Please try again later."),
            ToastKind::Error,
        );
        inner.renderer.show_error(&message);

        let diagnostics = inner.surface.page.diagnostics();
        match diagnostics.online {
            Some(online) => log::info!("Navigator online status: {}", online),
            None => log::info!("Navigator online status: unknown"),
        }
        log::info!("Document readyState: {}", diagnostics.ready_state);

        Phase::Error { message }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::client::error::FetchError;
    use crate::client::fetcher::MockTransport;
    use crate::client::memory::MemoryDocument;
    use crate::client::scheduler::TokioScheduler;
    use crate::client::surface::Page;
    use crate::consts::dashboard_consts::table::NO_RESULTS_ROW_ID;
    use std::collections::VecDeque;
    use tokio::task::LocalSet;
    use tokio::time::sleep;

    const TWO_VMS: &str = r#"[
        {"id":"1","name":"web-01","cluster_name":"PHX","vcpus":2,"memory_gb":4,"ip_addresses":["10.0.0.1"],"console_url":"https://c/1"},
        {"id":"2","name":"<script>alert(1)</script>","cluster_name":"PHX","vcpus":4,"memory_gb":8.5,"console_url":"https://c/2"}
    ]"#;

    fn dashboard(doc: &Rc<MemoryDocument>, transport: impl Transport + 'static) -> Dashboard {
        Dashboard::new(
            doc.surface(),
            Rc::new(transport),
            Rc::new(TokioScheduler),
            DashboardSettings::default(),
        )
    }

    fn always(status: u16, body: &'static str) -> MockTransport {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(move |_, _| Ok(ApiResponse::new(status, body)));
        transport
    }

    /// Answers each request with the next scripted response after its delay.
    struct ScriptedTransport {
        script: RefCell<VecDeque<(Duration, ApiResponse)>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<(u64, &str)>) -> Self {
            Self {
                script: RefCell::new(
                    script
                        .into_iter()
                        .map(|(ms, body)| (Duration::from_millis(ms), ApiResponse::new(200, body)))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for ScriptedTransport {
        async fn get(
            &self,
            _url: &str,
            _options: &RequestOptions,
        ) -> Result<ApiResponse, FetchError> {
            let (delay, response) = self
                .script
                .borrow_mut()
                .pop_front()
                .expect("unscripted request");
            sleep(delay).await;
            Ok(response)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_renders_rows_and_toast() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let dashboard = dashboard(&doc, always(200, TWO_VMS));

                let outcome = dashboard.refresh().await;
                assert_eq!(outcome, RefreshOutcome::Applied(Phase::Success { count: 2 }));
                assert_eq!(dashboard.phase(), Phase::Success { count: 2 });

                let rows = doc.table_rows();
                assert_eq!(rows.len(), 2);
                assert!(rows[1].row.html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
                assert!(rows[1].row.html.contains("No IP"));

                let toasts = doc.toasts();
                assert_eq!(toasts.len(), 1);
                assert_eq!(toasts[0].kind, ToastKind::Success);
                assert!(toasts[0].html.contains("Successfully loaded 2 virtual machines."));

                let stamp = doc.last_updated().expect("timestamp written");
                assert_eq!(stamp.len(), 11);
                assert!(stamp.ends_with("AM") || stamp.ends_with("PM"));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_list_warns_once() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let dashboard = dashboard(&doc, always(200, "[]"));

                dashboard.refresh().await;
                let rows = doc.table_rows();
                assert_eq!(rows.len(), 1);
                assert!(rows[0].row.html.contains("currently powered on"));

                let warnings: Vec<_> = doc
                    .toasts()
                    .into_iter()
                    .filter(|t| t.kind == ToastKind::Warning)
                    .collect();
                assert_eq!(warnings.len(), 1);
                assert!(warnings[0].html.contains("No powered on VMs found."));
                assert_eq!(doc.error_banner(), None);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    /// Three failing attempts end in the error row, banner and toast.
    async fn test_exhausted_retries_show_error() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let mut transport = MockTransport::new();
                transport
                    .expect_get()
                    .times(3)
                    .returning(|_, _| Ok(ApiResponse::new(500, "boom")));
                let dashboard = dashboard(&doc, transport);

                let outcome = dashboard.refresh().await;
                assert_eq!(
                    outcome,
                    RefreshOutcome::Applied(Phase::Error {
                        message: "HTTP error! Status: 500".into()
                    })
                );

                let rows = doc.table_rows();
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].row.name, "Unable to load VM data: HTTP error! Status: 500");
                assert_eq!(
                    doc.error_banner().as_deref(),
                    Some("Error loading VM data: HTTP error! Status: 500. Please try again later.")
                );
                assert_eq!(doc.toasts()[0].kind, ToastKind::Error);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failure_shows_error_row() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                doc.set_online(false);
                let mut transport = MockTransport::new();
                transport
                    .expect_get()
                    .times(3)
                    .returning(|_, _| Err(FetchError::Network("Failed to fetch".into())));
                let dashboard = dashboard(&doc, transport);

                dashboard.refresh().await;
                assert_eq!(
                    doc.table_rows()[0].row.name,
                    "Unable to load VM data: Network error: Failed to fetch"
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_body_reports_invalid_response() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let mut transport = MockTransport::new();
                transport
                    .expect_get()
                    .times(1)
                    .returning(|_, _| Ok(ApiResponse::new(200, "<html>oops</html>")));
                let dashboard = dashboard(&doc, transport);

                let outcome = dashboard.refresh().await;
                assert_eq!(
                    outcome,
                    RefreshOutcome::Applied(Phase::Error {
                        message: "Invalid response from server. Please refresh the page and try again."
                            .into()
                    })
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    /// A 401 warns, then navigates to the server-provided target after 2s.
    async fn test_unauthorized_redirects_after_delay() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let mut transport = MockTransport::new();
                transport.expect_get().times(1).returning(|_, _| {
                    Ok(ApiResponse::new(
                        401,
                        r#"{"error":"Authentication required","redirect":"/login?next=%2F"}"#,
                    ))
                });
                let dashboard = dashboard(&doc, transport);

                let outcome = dashboard.refresh().await;
                assert_eq!(
                    outcome,
                    RefreshOutcome::Applied(Phase::AuthExpired {
                        redirect: "/login?next=%2F".into()
                    })
                );
                let toasts = doc.toasts();
                assert_eq!(toasts[0].kind, ToastKind::Warning);
                assert!(toasts[0].html.contains("Session Expired"));

                sleep(Duration::from_millis(1900)).await;
                assert!(doc.navigations().is_empty());
                sleep(Duration::from_millis(200)).await;
                assert_eq!(doc.navigations(), ["/login?next=%2F"]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_unauthorized_falls_back_to_login() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let dashboard = dashboard(&doc, always(401, "Unauthorized"));

                dashboard.refresh().await;
                sleep(Duration::from_millis(2100)).await;
                assert_eq!(doc.navigations(), [session::DEFAULT_LOGIN_PATH]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    /// A slow earlier cycle finishing last must not overwrite the newer rows.
    async fn test_stale_cycle_is_dropped() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let transport = ScriptedTransport::new(vec![
                    (500, r#"[{"id":"old","name":"old-vm"}]"#),
                    (10, r#"[{"id":"new","name":"new-vm"}]"#),
                ]);
                let dashboard = dashboard(&doc, transport);

                let (first, second) = futures::join!(dashboard.refresh(), dashboard.refresh());
                assert_eq!(first, RefreshOutcome::Stale { generation: 1 });
                assert_eq!(second, RefreshOutcome::Applied(Phase::Success { count: 1 }));
                assert_eq!(dashboard.generation(), 2);
                assert_eq!(doc.visible_names(), ["new-vm"]);
                assert_eq!(doc.toasts().len(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_input_is_debounced() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let dashboard = dashboard(
                    &doc,
                    always(200, r#"[{"name":"web-01"},{"name":"db-02"},{"name":"web-03"}]"#),
                );
                dashboard.refresh().await;

                doc.set_search("w");
                dashboard.on_search_input();
                sleep(Duration::from_millis(100)).await;
                doc.set_search("web");
                dashboard.on_search_input();
                sleep(Duration::from_millis(200)).await;
                assert_eq!(doc.visible_names().len(), 3);

                sleep(Duration::from_millis(150)).await;
                assert_eq!(doc.visible_names(), ["web-01", "web-03"]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    /// New rows are filtered with the term already in the field.
    async fn test_refresh_reapplies_current_term() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let dashboard = dashboard(
                    &doc,
                    always(200, r#"[{"name":"web-01"},{"name":"db-02"}]"#),
                );

                doc.set_search("db");
                dashboard.on_search_input();
                dashboard.refresh().await;
                assert_eq!(doc.visible_names(), ["db-02"]);

                doc.set_search("zzz");
                dashboard.refresh().await;
                let visible = doc.visible_rows();
                assert_eq!(visible.len(), 1);
                assert_eq!(visible[0].id.as_deref(), Some(NO_RESULTS_ROW_ID));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_button_clears_search_and_resets() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let dashboard = dashboard(&doc, always(200, "[]"));
                doc.set_search("web");

                dashboard.click_refresh().await;
                assert_eq!(doc.search_term(), "");
                assert!(doc.is_refresh_loading());

                sleep(Duration::from_millis(350)).await;
                assert!(!doc.is_refresh_loading());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    /// An older click finishing first leaves the button busy for the newer one.
    async fn test_overlapping_clicks_keep_button_busy() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let transport = ScriptedTransport::new(vec![(100, "[]"), (500, "[]")]);
                let dashboard = dashboard(&doc, transport);

                let first = dashboard.clone();
                tokio::task::spawn_local(async move {
                    first.click_refresh().await;
                });
                sleep(Duration::from_millis(50)).await;
                let second = dashboard.clone();
                tokio::task::spawn_local(async move {
                    second.click_refresh().await;
                });

                // The first cycle's reset is due here; the second is in flight.
                sleep(Duration::from_millis(400)).await;
                assert_eq!(dashboard.phase(), Phase::Loading);
                assert!(doc.is_refresh_loading());

                sleep(Duration::from_millis(500)).await;
                assert_eq!(dashboard.phase(), Phase::Success { count: 0 });
                assert!(!doc.is_refresh_loading());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyboard_shortcuts() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let dashboard = dashboard(&doc, always(200, "[]"));

                assert!(!dashboard.handle_key(&KeyPress::new("r")));
                assert!(!dashboard.handle_key(&KeyPress::new("x").with_ctrl()));

                assert!(dashboard.handle_key(&KeyPress::new("f").with_meta()));
                assert!(doc.is_search_focused());

                assert!(dashboard.handle_key(&KeyPress::new("r").with_ctrl()));
                sleep(Duration::from_millis(10)).await;
                assert_eq!(dashboard.phase(), Phase::Success { count: 0 });
                assert_eq!(dashboard.generation(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_waits_for_entrance_delay() {
        LocalSet::new()
            .run_until(async {
                let doc = Rc::new(MemoryDocument::new());
                let dashboard = dashboard(&doc, always(200, "[]"));

                dashboard.start();
                sleep(Duration::from_millis(700)).await;
                assert_eq!(dashboard.phase(), Phase::Idle);
                assert!(doc.table_rows().is_empty());

                sleep(Duration::from_millis(200)).await;
                assert_eq!(dashboard.phase(), Phase::Success { count: 0 });
            })
            .await;
    }
}
