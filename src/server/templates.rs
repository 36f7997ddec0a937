//! Server-rendered pages.
//!
//! The dashboard page carries the element ids the wasm bundle binds to.

use crate::client::escape::escape_html;
use crate::consts::dashboard_consts::table::COLUMNS;

const BUNDLE: &str = "/static/pkg/vm_dashboard.js";

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/css/styles.css">
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
    )
}

pub fn index_page(username: &str) -> String {
    let headers: String = COLUMNS
        .iter()
        .map(|label| format!("<th scope=\"col\">{label}</th>"))
        .collect();

    let body = format!(
        r#"<header class="header">
    <h1><i class="fas fa-server" aria-hidden="true"></i> Powered-On Virtual Machines</h1>
    <div class="header-actions">
        <span class="user">Signed in as <strong>{user}</strong></span>
        <button id="theme-toggle" class="btn btn-icon" aria-label="Toggle dark mode">
            <i class="fas fa-moon" aria-hidden="true"></i>
        </button>
        <a href="/logout" class="btn btn-secondary">Logout</a>
    </div>
</header>
<main class="container">
    <div id="error-message" class="alert alert-danger" role="alert" style="display: none;">
        <i class="fas fa-exclamation-circle" aria-hidden="true"></i>
        <span class="alert-text"></span>
    </div>
    <div class="toolbar">
        <input id="vm-search" type="search" class="search-input" placeholder="Search VMs by name..." aria-label="Search VMs by name">
        <button id="refresh-button" class="btn btn-primary">
            <i class="fas fa-sync-alt" aria-hidden="true"></i> Refresh
        </button>
    </div>
    <p class="last-updated">Last updated: <span id="last-updated-time">never</span></p>
    <table id="vm-table" class="vm-table">
        <thead><tr>{headers}</tr></thead>
        <tbody></tbody>
    </table>
</main>
<div id="toast-container" class="toast-container" aria-live="polite"></div>
<script type="module">
    import init from "{BUNDLE}";
    init();
</script>"#,
        user = escape_html(username),
    );
    layout("VM Dashboard", &body)
}

pub fn login_page(error: Option<&str>) -> String {
    let alert = error
        .map(|message| {
            format!(
                r#"<div class="alert alert-danger" role="alert">{}</div>"#,
                escape_html(message)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<main class="login-container">
    <h1>VM Dashboard</h1>
    {alert}
    <form method="post" action="/login" class="login-form">
        <label for="username">Username</label>
        <input id="username" name="username" type="text" autocomplete="username" required autofocus>
        <label for="password">Password</label>
        <input id="password" name="password" type="password" autocomplete="current-password" required>
        <button type="submit" class="btn btn-primary">Sign in</button>
    </form>
</main>"#
    );
    layout("Login - VM Dashboard", &body)
}
