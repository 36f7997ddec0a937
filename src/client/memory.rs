//! In-memory page
//!
//! Implements every surface trait over plain data so the dashboard can run
//! headless; each write is observable through the inspection methods.

use super::surface::{
    Diagnostics, Page, RowView, TableBody, TableRow, ThemeSurface, ToastSurface, UiSurface,
};
use super::theme::Theme;
use super::toast::{ToastId, ToastKind};
use futures::future::{self, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRow {
    pub row: TableRow,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryToast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub html: String,
    pub hiding: bool,
}

#[derive(Debug)]
pub struct MemoryDocument {
    rows: RefCell<Vec<MemoryRow>>,
    toasts: RefCell<Vec<MemoryToast>>,
    detached: RefCell<Vec<ToastId>>,
    search: RefCell<String>,
    search_focused: Cell<bool>,
    refresh_loading: Cell<bool>,
    error_banner: RefCell<Option<String>>,
    last_updated: RefCell<Option<String>>,
    navigations: RefCell<Vec<String>>,
    theme: Cell<Option<Theme>>,
    prefers_dark: Cell<bool>,
    online: Cell<bool>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self {
            rows: RefCell::default(),
            toasts: RefCell::default(),
            detached: RefCell::default(),
            search: RefCell::default(),
            search_focused: Cell::new(false),
            refresh_loading: Cell::new(false),
            error_banner: RefCell::default(),
            last_updated: RefCell::default(),
            navigations: RefCell::default(),
            theme: Cell::new(None),
            prefers_dark: Cell::new(false),
            online: Cell::new(true),
        }
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose every part is this document.
    pub fn surface(self: &Rc<Self>) -> UiSurface {
        UiSurface::new(self.clone(), self.clone(), self.clone())
    }

    /// Types `term` into the search field.
    pub fn set_search(&self, term: &str) {
        *self.search.borrow_mut() = term.to_string();
    }

    pub fn set_prefers_dark(&self, dark: bool) {
        self.prefers_dark.set(dark);
    }

    pub fn set_online(&self, online: bool) {
        self.online.set(online);
    }

    pub fn table_rows(&self) -> Vec<MemoryRow> {
        self.rows.borrow().clone()
    }

    pub fn visible_rows(&self) -> Vec<TableRow> {
        self.rows
            .borrow()
            .iter()
            .filter(|r| r.visible)
            .map(|r| r.row.clone())
            .collect()
    }

    /// Names (first-cell text) of the visible rows.
    pub fn visible_names(&self) -> Vec<String> {
        self.visible_rows().into_iter().map(|r| r.name).collect()
    }

    pub fn toasts(&self) -> Vec<MemoryToast> {
        self.toasts.borrow().clone()
    }

    /// Toasts detached so far, in detach order.
    pub fn detached(&self) -> Vec<ToastId> {
        self.detached.borrow().clone()
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused.get()
    }

    pub fn is_refresh_loading(&self) -> bool {
        self.refresh_loading.get()
    }

    pub fn error_banner(&self) -> Option<String> {
        self.error_banner.borrow().clone()
    }

    pub fn last_updated(&self) -> Option<String> {
        self.last_updated.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme.get()
    }
}

impl TableBody for MemoryDocument {
    fn clear(&self) {
        self.rows.borrow_mut().clear();
    }

    fn append(&self, row: TableRow) {
        self.rows.borrow_mut().push(MemoryRow { row, visible: true });
    }

    fn rows(&self) -> Vec<RowView> {
        self.rows
            .borrow()
            .iter()
            .enumerate()
            .map(|(index, r)| RowView {
                index,
                id: r.row.id.clone(),
                name: r.row.name.clone(),
                visible: r.visible,
            })
            .collect()
    }

    fn set_visible(&self, index: usize, visible: bool) {
        if let Some(row) = self.rows.borrow_mut().get_mut(index) {
            row.visible = visible;
        }
    }

    fn remove(&self, id: &str) -> bool {
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|r| r.row.id.as_deref() != Some(id));
        rows.len() != before
    }
}

impl ToastSurface for MemoryDocument {
    fn append(&self, id: ToastId, kind: ToastKind, html: &str) {
        self.toasts.borrow_mut().push(MemoryToast {
            id,
            kind,
            html: html.to_string(),
            hiding: false,
        });
    }

    fn start_exit(&self, id: ToastId) {
        if let Some(toast) = self.toasts.borrow_mut().iter_mut().find(|t| t.id == id) {
            toast.hiding = true;
        }
    }

    fn exit_finished(&self, _id: ToastId) -> LocalBoxFuture<'static, ()> {
        // No animations here: the exit completes immediately.
        Box::pin(future::ready(()))
    }

    fn detach(&self, id: ToastId) {
        self.toasts.borrow_mut().retain(|t| t.id != id);
        self.detached.borrow_mut().push(id);
    }
}

impl Page for MemoryDocument {
    fn search_term(&self) -> String {
        self.search.borrow().clone()
    }

    fn clear_search(&self) {
        self.search.borrow_mut().clear();
    }

    fn focus_search(&self) {
        self.search_focused.set(true);
    }

    fn set_refresh_loading(&self, loading: bool) {
        self.refresh_loading.set(loading);
    }

    fn show_error_banner(&self, message: &str) {
        *self.error_banner.borrow_mut() = Some(message.to_string());
    }

    fn hide_error_banner(&self) {
        *self.error_banner.borrow_mut() = None;
    }

    fn set_last_updated(&self, text: &str) {
        *self.last_updated.borrow_mut() = Some(text.to_string());
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_string());
    }

    fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            online: Some(self.online.get()),
            ready_state: "complete".to_string(),
        }
    }
}

impl ThemeSurface for MemoryDocument {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.get()
    }

    fn apply_theme(&self, theme: Theme) {
        self.theme.set(Some(theme));
    }
}
