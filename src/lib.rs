//! VM dashboard
//!
//! A single-page view of the powered-on virtual machines of a Nutanix Prism
//! Central deployment. The [`client`] module is the page logic, compiled to
//! wasm for the browser; the native build adds the backend that serves the
//! page and proxies Prism Central.

pub mod client;
pub mod consts;
pub mod logging;
pub mod model;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod environment;
#[cfg(not(target_arch = "wasm32"))]
pub mod monitor;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

#[cfg(target_arch = "wasm32")]
pub mod web;
