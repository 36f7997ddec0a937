//! Toast notifications
//!
//! Fire-and-forget messages: each toast owns its own expiry timer and can be
//! dismissed manually; whichever comes first removes it, exactly once.

use super::escape::escape_html;
use super::scheduler::Scheduler;
use super::surface::{Page, ToastSurface};
use crate::consts::dashboard_consts::{timing, toast};
use crate::logging::LogLevel;
use futures::future::{self, Either};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    /// Font Awesome icon name.
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Info => "info-circle",
            ToastKind::Success => "check-circle",
            ToastKind::Warning => "exclamation-triangle",
            ToastKind::Error => "exclamation-circle",
        }
    }

    /// Title used by [`Notifier::show_message`].
    pub fn title(&self) -> &'static str {
        match self {
            ToastKind::Info => "Information",
            ToastKind::Success => "Success",
            ToastKind::Warning => "Warning",
            ToastKind::Error => "Error",
        }
    }
}

impl From<ToastKind> for LogLevel {
    fn from(kind: ToastKind) -> Self {
        match kind {
            ToastKind::Info | ToastKind::Success => LogLevel::Info,
            ToastKind::Warning => LogLevel::Warn,
            ToastKind::Error => LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

impl Toast {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: ToastKind::default(),
            duration: toast::default_duration(),
        }
    }

    pub fn with_kind(mut self, kind: ToastKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Inner markup of the toast element.
    pub fn to_html(&self) -> String {
        format!(
            r#"<i class="fas fa-{icon} toast-icon" aria-hidden="true"></i>
<div class="toast-content">
    <div class="toast-title">{title}</div>
    <div class="toast-message">{message}</div>
</div>
<button class="toast-close" aria-label="Close notification">
    <i class="fas fa-times" aria-hidden="true"></i>
</button>"#,
            icon = self.kind.icon(),
            title = escape_html(&self.title),
            message = escape_html(&self.message),
        )
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

impl Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ToastState {
    Shown,
    Hiding,
}

/// Shows and removes toasts on a [`ToastSurface`].
///
/// Cloning yields another handle to the same set of live toasts.
#[derive(Clone)]
pub struct Notifier {
    inner: Rc<NotifierInner>,
}

struct NotifierInner {
    surface: Rc<dyn ToastSurface>,
    page: Rc<dyn Page>,
    scheduler: Rc<dyn Scheduler>,
    exit_fallback: Duration,
    next_id: Cell<u64>,
    live: RefCell<HashMap<ToastId, ToastState>>,
}

impl Notifier {
    pub fn new(
        surface: Rc<dyn ToastSurface>,
        page: Rc<dyn Page>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                surface,
                page,
                scheduler,
                exit_fallback: timing::toast_exit_fallback(),
                next_id: Cell::new(0),
                live: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Appends `toast` and arms its expiry timer.
    pub fn show(&self, toast: Toast) -> ToastId {
        let inner = &self.inner;
        let id = ToastId(inner.next_id.get() + 1);
        inner.next_id.set(id.0);

        inner.surface.append(id, toast.kind, &toast.to_html());
        inner.live.borrow_mut().insert(id, ToastState::Shown);
        log::log!(
            log::Level::from(LogLevel::from(toast.kind)),
            "[toast {}] {}: {}",
            id,
            toast.title,
            toast.message
        );

        let notifier = self.clone();
        let expiry = inner.scheduler.sleep(toast.duration);
        inner.scheduler.spawn(Box::pin(async move {
            expiry.await;
            notifier.dismiss(id);
        }));

        id
    }

    /// Shows `message` under the title for `kind`; errors also fill the
    /// inline error banner.
    pub fn show_message(&self, message: &str, kind: ToastKind) -> ToastId {
        if kind == ToastKind::Error {
            self.inner.page.show_error_banner(message);
        }
        self.show(Toast::new(kind.title(), message).with_kind(kind))
    }

    /// Starts removing toast `id`.
    ///
    /// Returns `false` when the toast is already hiding or gone, so the expiry
    /// timer and the close button can both call this safely.
    pub fn dismiss(&self, id: ToastId) -> bool {
        {
            let mut live = self.inner.live.borrow_mut();
            match live.get_mut(&id) {
                Some(state) if *state == ToastState::Shown => *state = ToastState::Hiding,
                _ => return false,
            }
        }

        let inner = &self.inner;
        inner.surface.start_exit(id);
        let finished = inner.surface.exit_finished(id);
        let fallback = inner.scheduler.sleep(inner.exit_fallback);
        let notifier = self.clone();
        inner.scheduler.spawn(Box::pin(async move {
            if let Either::Right(_) = future::select(finished, fallback).await {
                log::debug!("[toast {}] no animationend, detaching after fallback", id);
            }
            notifier.detach(id);
        }));
        true
    }

    /// Number of toasts attached to the document, hiding ones included.
    pub fn live_count(&self) -> usize {
        self.inner.live.borrow().len()
    }

    fn detach(&self, id: ToastId) {
        let removed = self.inner.live.borrow_mut().remove(&id).is_some();
        if removed {
            self.inner.surface.detach(id);
        }
    }
}
