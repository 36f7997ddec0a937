//! Browser-side dashboard
//!
//! Everything here runs on a single cooperative thread and touches the page
//! only through the [`surface`] traits, so the same code drives the live DOM
//! (see the `web` module on `wasm32`) and the in-memory document the tests use.

pub mod controller;
pub mod error;
pub mod escape;
pub mod fetcher;
pub mod filter;
#[cfg(test)]
pub(crate) mod memory;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod theme;
pub mod toast;
pub mod transport;

pub use controller::{Dashboard, DashboardSettings, KeyPress, Phase, RefreshOutcome};
pub use error::{DashboardError, FetchError};
pub use fetcher::{ApiResponse, RequestOptions, RetryPolicy, Transport, fetch_with_retry};
pub use scheduler::Scheduler;
pub use surface::UiSurface;
pub use theme::{Theme, ThemeManager};
pub use toast::{Notifier, Toast, ToastId, ToastKind};
