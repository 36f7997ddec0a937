//! The page surface the dashboard renders into.
//!
//! Renderers and the notifier receive these handles explicitly instead of
//! reaching for document globals.

use super::theme::Theme;
use super::toast::{ToastId, ToastKind};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// A row to append to the VM table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Element id, for singleton rows that must be found again.
    pub id: Option<String>,
    /// CSS class of the `<tr>`.
    pub class: Option<&'static str>,
    /// Value of the `data-vm-id` attribute.
    pub vm_id: Option<String>,
    /// Plain text of the first cell, which is what the search matches against.
    pub name: String,
    /// The row's cells, already escaped.
    pub html: String,
}

/// A row as currently present in the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub id: Option<String>,
    pub name: String,
    pub visible: bool,
}

/// The `<tbody>` of `#vm-table`.
pub trait TableBody {
    /// Removes every row.
    fn clear(&self);

    fn append(&self, row: TableRow);

    /// Snapshot of the rows in document order.
    fn rows(&self) -> Vec<RowView>;

    fn set_visible(&self, index: usize, visible: bool);

    /// Removes the row with element id `id`. Returns whether one was found.
    fn remove(&self, id: &str) -> bool;
}

/// `#toast-container`.
pub trait ToastSurface {
    fn append(&self, id: ToastId, kind: ToastKind, html: &str);

    /// Starts the exit animation.
    fn start_exit(&self, id: ToastId);

    /// Resolves when the exit animation of `id` has completed.
    fn exit_finished(&self, id: ToastId) -> LocalBoxFuture<'static, ()>;

    /// Detaches the toast from the document.
    fn detach(&self, id: ToastId);
}

/// Environment facts logged when a fetch fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    /// `navigator.onLine`, when the platform reports it.
    pub online: Option<bool>,
    /// `document.readyState`.
    pub ready_state: String,
}

/// Page chrome around the table: search field, refresh button, banners.
pub trait Page {
    fn search_term(&self) -> String;

    fn clear_search(&self);

    fn focus_search(&self);

    fn set_refresh_loading(&self, loading: bool);

    /// Shows `#error-message` with `message` in its `.alert-text`.
    fn show_error_banner(&self, message: &str);

    fn hide_error_banner(&self);

    /// Writes `#last-updated-time`.
    fn set_last_updated(&self, text: &str);

    /// Leaves the dashboard for `url`.
    fn navigate(&self, url: &str);

    fn diagnostics(&self) -> Diagnostics;
}

/// Visual side of the theme toggle.
pub trait ThemeSurface {
    /// The OS-level `prefers-color-scheme: dark` preference.
    fn prefers_dark(&self) -> bool;

    fn apply_theme(&self, theme: Theme);
}

/// Handle bundling the parts of the page the dashboard writes to.
#[derive(Clone)]
pub struct UiSurface {
    pub table: Rc<dyn TableBody>,
    pub toasts: Rc<dyn ToastSurface>,
    pub page: Rc<dyn Page>,
}

impl UiSurface {
    pub fn new(
        table: Rc<dyn TableBody>,
        toasts: Rc<dyn ToastSurface>,
        page: Rc<dyn Page>,
    ) -> Self {
        Self {
            table,
            toasts,
            page,
        }
    }
}
