//! Browser entry point
//!
//! Binds the dashboard to the live DOM. Each surface trait is implemented
//! over the elements of the page template rendered by the server.

use crate::client::controller::{Dashboard, DashboardSettings, KeyPress};
use crate::client::error::DashboardError;
use crate::client::scheduler::Scheduler;
use crate::client::surface::{
    Diagnostics, Page, RowView, TableBody, TableRow, ThemeSurface, ToastSurface, UiSurface,
};
use crate::client::theme::{PreferenceStore, Theme, ThemeManager};
use crate::client::toast::{ToastId, ToastKind};
use crate::client::transport::ReqwestTransport;
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent, Window};

/// Runs tasks on the browser microtask queue and sleeps with `setTimeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        Box::pin(TimeoutFuture::new(millis))
    }
}

/// `window.localStorage`, read and written as raw strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalPreferences;

impl PreferenceStore for LocalPreferences {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DashboardError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| DashboardError::Storage(format!("{e:?}")))
    }
}

fn missing(what: &str) -> JsValue {
    JsValue::from_str(&format!("dashboard template is missing {what}"))
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| missing(&format!("#{id}")))
}

/// The dashboard page as found in the document.
pub struct DomSurface {
    window: Window,
    document: Document,
    tbody: Element,
    toasts: Element,
    search: HtmlInputElement,
    refresh_button: Element,
    refresh_label: RefCell<Option<String>>,
    error_banner: HtmlElement,
    last_updated: Element,
    theme_toggle: Element,
}

impl DomSurface {
    pub fn mount(window: &Window, document: &Document) -> Result<Self, JsValue> {
        let tbody = document
            .query_selector("#vm-table tbody")?
            .ok_or_else(|| missing("#vm-table tbody"))?;

        Ok(Self {
            window: window.clone(),
            document: document.clone(),
            tbody,
            toasts: by_id(document, "toast-container")?,
            search: by_id(document, "vm-search")?,
            refresh_button: by_id(document, "refresh-button")?,
            refresh_label: RefCell::new(None),
            error_banner: by_id(document, "error-message")?,
            last_updated: by_id(document, "last-updated-time")?,
            theme_toggle: by_id(document, "theme-toggle")?,
        })
    }

    fn row(&self, index: usize) -> Option<HtmlElement> {
        let index = u32::try_from(index).ok()?;
        self.tbody.children().item(index)?.dyn_into().ok()
    }

    fn toast(&self, id: ToastId) -> Option<Element> {
        self.toasts
            .query_selector(&format!(r#"[data-toast-id="{id}"]"#))
            .ok()
            .flatten()
    }
}

impl TableBody for DomSurface {
    fn clear(&self) {
        self.tbody.set_inner_html("");
    }

    fn append(&self, row: TableRow) {
        let Ok(tr) = self.document.create_element("tr") else {
            log::error!("Could not create table row");
            return;
        };
        if let Some(id) = &row.id {
            tr.set_id(id);
        }
        if let Some(class) = row.class {
            tr.set_class_name(class);
        }
        if let Some(vm_id) = &row.vm_id {
            let _ = tr.set_attribute("data-vm-id", vm_id);
        }
        tr.set_inner_html(&row.html);
        let _ = self.tbody.append_child(&tr);
    }

    fn rows(&self) -> Vec<RowView> {
        let children = self.tbody.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .enumerate()
            .map(|(index, el)| {
                let id = Some(el.id()).filter(|id| !id.is_empty());
                let name = el
                    .query_selector("td:first-child")
                    .ok()
                    .flatten()
                    .and_then(|td| td.text_content())
                    .map(|text| text.trim().to_string())
                    .unwrap_or_default();
                let visible = el
                    .dyn_ref::<HtmlElement>()
                    .and_then(|el| el.style().get_property_value("display").ok())
                    .is_none_or(|display| display != "none");
                RowView {
                    index,
                    id,
                    name,
                    visible,
                }
            })
            .collect()
    }

    fn set_visible(&self, index: usize, visible: bool) {
        if let Some(row) = self.row(index) {
            let style = row.style();
            let _ = if visible {
                style.remove_property("display").map(|_| ())
            } else {
                style.set_property("display", "none")
            };
        }
    }

    fn remove(&self, id: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(el) => {
                el.remove();
                true
            }
            None => false,
        }
    }
}

impl ToastSurface for DomSurface {
    fn append(&self, id: ToastId, kind: ToastKind, html: &str) {
        let Ok(toast) = self.document.create_element("div") else {
            log::error!("Could not create toast element");
            return;
        };
        toast.set_class_name(&format!("toast toast-{kind}"));
        let _ = toast.set_attribute("role", "alert");
        let _ = toast.set_attribute("data-toast-id", &id.to_string());
        toast.set_inner_html(html);
        let _ = self.toasts.append_child(&toast);
    }

    fn start_exit(&self, id: ToastId) {
        if let Some(toast) = self.toast(id) {
            let _ = toast.class_list().add_1("hiding");
        }
    }

    fn exit_finished(&self, id: ToastId) -> LocalBoxFuture<'static, ()> {
        let Some(toast) = self.toast(id) else {
            return Box::pin(future::ready(()));
        };
        let (tx, rx) = oneshot::channel();
        let listener = EventListener::once(&toast, "animationend", move |_| {
            let _ = tx.send(());
        });
        Box::pin(async move {
            let _ = rx.await;
            drop(listener);
        })
    }

    fn detach(&self, id: ToastId) {
        if let Some(toast) = self.toast(id) {
            toast.remove();
        }
    }
}

impl Page for DomSurface {
    fn search_term(&self) -> String {
        self.search.value()
    }

    fn clear_search(&self) {
        self.search.set_value("");
    }

    fn focus_search(&self) {
        let _ = self.search.focus();
    }

    fn set_refresh_loading(&self, loading: bool) {
        let button = &self.refresh_button;
        let mut label = self.refresh_label.borrow_mut();
        if loading {
            if label.is_none() {
                let original = button.inner_html();
                button.set_inner_html(&format!(r#"<span class="btn-text">{original}</span>"#));
                *label = Some(original);
            }
            let _ = button.class_list().add_1("loading");
        } else {
            if let Some(original) = label.take() {
                button.set_inner_html(&original);
            }
            let _ = button.class_list().remove_1("loading");
        }
    }

    fn show_error_banner(&self, message: &str) {
        let _ = self.error_banner.style().set_property("display", "flex");
        if let Ok(Some(text)) = self.error_banner.query_selector(".alert-text") {
            text.set_text_content(Some(message));
        }
    }

    fn hide_error_banner(&self) {
        let _ = self.error_banner.style().set_property("display", "none");
    }

    fn set_last_updated(&self, text: &str) {
        self.last_updated.set_text_content(Some(text));
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            log::error!("Navigation to {} failed: {:?}", url, e);
        }
    }

    fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            online: Some(self.window.navigator().on_line()),
            ready_state: self.document.ready_state(),
        }
    }
}

impl ThemeSurface for DomSurface {
    fn prefers_dark(&self) -> bool {
        self.window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn apply_theme(&self, theme: Theme) {
        if let Some(body) = self.document.body() {
            let _ = body
                .class_list()
                .toggle_with_force("dark-theme", theme.is_dark());
        }
        self.theme_toggle.set_inner_html(theme.toggle_icon());
    }
}

/// Module entry point, run once the bundle is loaded.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or_else(|| missing("a window"))?;
    let document = window.document().ok_or_else(|| missing("a document"))?;
    let dom = Rc::new(DomSurface::mount(&window, &document)?);

    let theme = Rc::new(ThemeManager::init(Rc::new(LocalPreferences), dom.clone()));
    let transport = ReqwestTransport::default().with_base_url(window.location().origin()?);
    let dashboard = Dashboard::new(
        UiSurface::new(dom.clone(), dom.clone(), dom.clone()),
        Rc::new(transport),
        Rc::new(BrowserScheduler),
        DashboardSettings::default(),
    );

    // Listeners live as long as the page.
    EventListener::new(&dom.theme_toggle, "click", move |_| {
        if let Err(e) = theme.toggle() {
            log::warn!("Theme preference not saved: {}", e);
        }
    })
    .forget();

    let d = dashboard.clone();
    EventListener::new(&dom.search, "input", move |_| d.on_search_input()).forget();

    let d = dashboard.clone();
    EventListener::new(&dom.refresh_button, "click", move |_| {
        let d = d.clone();
        wasm_bindgen_futures::spawn_local(async move {
            d.click_refresh().await;
        });
    })
    .forget();

    let d = dashboard.clone();
    EventListener::new_with_options(
        &document,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let press = KeyPress {
                key: key.key(),
                ctrl: key.ctrl_key(),
                meta: key.meta_key(),
            };
            if d.handle_key(&press) {
                event.prevent_default();
            }
        },
    )
    .forget();

    let notifier = dashboard.notifier().clone();
    EventListener::new(&dom.toasts, "click", move |event| {
        let id = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(".toast-close").ok().flatten())
            .and_then(|button| button.closest(".toast").ok().flatten())
            .and_then(|toast| toast.get_attribute("data-toast-id"))
            .and_then(|id| id.parse().ok());
        if let Some(id) = id {
            notifier.dismiss(ToastId(id));
        }
    })
    .forget();

    dashboard.start();
    Ok(())
}
