//! Health check of a running dashboard
//!
//! Probes `/health`, logs in, then reads `/api/vms` with the session, and
//! reports status and latency of each step.

use crate::client::fetcher::{RequestOptions, RetryPolicy, fetch_with_retry};
use crate::client::scheduler::TokioScheduler;
use crate::client::transport::ReqwestTransport;
use crate::consts::dashboard_consts::fetching::VMS_ENDPOINT;
use serde::Serialize;
use std::fmt::Write;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub retry: RetryPolicy,
}

impl MonitorOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: None,
            password: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }
}

/// Outcome of one probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Probe {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub success: bool,
}

impl Probe {
    fn failed(name: &'static str, error: impl ToString) -> Self {
        Self {
            name,
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    fn answered(name: &'static str, status: u16, started: Instant) -> Self {
        Self {
            name,
            status_code: Some(status),
            response_time_ms: Some(elapsed_ms(started)),
            success: status == 200,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub timestamp: String,
    pub tests: Vec<Probe>,
}

impl HealthReport {
    pub fn all_passed(&self) -> bool {
        self.tests.iter().all(|probe| probe.success)
    }

    /// Human-readable report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "VM Dashboard - Health Check");
        let _ = writeln!(out, "{}", "=".repeat(40));
        let _ = writeln!(out, "Timestamp: {}", self.timestamp);
        let _ = writeln!(out);

        for probe in &self.tests {
            let status = if probe.success { "✅ PASS" } else { "❌ FAIL" };
            let _ = writeln!(out, "{}: {}", probe.name.to_uppercase(), status);
            if let Some(ms) = probe.response_time_ms {
                let _ = writeln!(out, "  Response Time: {ms}ms");
            }
            if let Some(count) = probe.vm_count {
                let _ = writeln!(out, "  VMs Found: {count}");
            }
            if let Some(error) = &probe.error {
                let _ = writeln!(out, "  Error: {error}");
            }
            let _ = writeln!(out);
        }

        let overall = if self.all_passed() {
            "✅ ALL SYSTEMS OPERATIONAL"
        } else {
            "❌ ISSUES DETECTED"
        };
        let _ = writeln!(out, "Overall Status: {overall}");
        out
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    (started.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}

/// Runs every probe against `options.base_url`.
///
/// The VM listing is only probed after a successful login.
pub async fn run_checks(options: &MonitorOptions) -> Result<HealthReport, reqwest::Error> {
    let client = reqwest::Client::builder().cookie_store(true).build()?;
    let base = &options.base_url;
    let mut tests = Vec::new();

    let started = Instant::now();
    tests.push(match client.get(format!("{base}/health")).send().await {
        Ok(response) => Probe::answered("health", response.status().as_u16(), started),
        Err(e) => Probe::failed("health", e),
    });

    let login = match (&options.username, &options.password) {
        (Some(username), Some(password)) => {
            let started = Instant::now();
            let form = [("username", username.as_str()), ("password", password.as_str())];
            match client.post(format!("{base}/login")).form(&form).send().await {
                Ok(response) => Probe::answered("login", response.status().as_u16(), started),
                Err(e) => Probe::failed("login", e),
            }
        }
        _ => Probe::failed("login", "no dashboard credentials supplied"),
    };
    let logged_in = login.success;
    tests.push(login);

    if logged_in {
        let transport = ReqwestTransport::new(client.clone()).with_base_url(base.as_str());
        let request = RequestOptions::default().header("Accept", "application/json");
        let started = Instant::now();
        let probe = match fetch_with_retry(
            &transport,
            &TokioScheduler,
            VMS_ENDPOINT,
            &request,
            options.retry,
        )
        .await
        {
            Ok(response) => {
                let mut probe = Probe::answered("api_vms", response.status, started);
                probe.vm_count = Some(
                    response
                        .json::<Vec<serde_json::Value>>()
                        .map(|vms| vms.len())
                        .unwrap_or(0),
                );
                probe
            }
            Err(e) => {
                let mut probe = Probe::failed("api_vms", &e);
                probe.response_time_ms = Some(elapsed_ms(started));
                probe
            }
        };
        tests.push(probe);
    }

    for probe in &tests {
        log::debug!("{} probe: {:?}", probe.name, probe);
    }
    Ok(HealthReport {
        timestamp: chrono::Local::now().to_rfc3339(),
        tests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn no_wait() -> RetryPolicy {
        RetryPolicy {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_all_probes_pass() {
        let mut server = mockito::Server::new_async().await;
        let _health = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(r#"{"status":"healthy"}"#)
            .create_async()
            .await;
        let _login = server
            .mock("POST", "/login")
            .match_body("username=nutanix&password=hunter2")
            .with_status(200)
            .with_header("set-cookie", "vm_dashboard_session=abc; Path=/")
            .create_async()
            .await;
        let vms = server
            .mock("GET", "/api/vms")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(r#"[{"name":"web-01"},{"name":"db-02"}]"#)
            .create_async()
            .await;

        let mut options = MonitorOptions::new(server.url())
            .with_credentials("nutanix".into(), "hunter2".into());
        options.retry = no_wait();
        let report = run_checks(&options).await.unwrap();

        assert!(report.all_passed());
        let names: Vec<_> = report.tests.iter().map(|p| p.name).collect();
        assert_eq!(names, ["health", "login", "api_vms"]);
        assert_eq!(report.tests[2].vm_count, Some(2));
        assert!(report.render().contains("ALL SYSTEMS OPERATIONAL"));
        vms.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_login_skips_vm_probe() {
        let mut server = mockito::Server::new_async().await;
        let _health = server
            .mock("GET", "/health")
            .with_status(200)
            .create_async()
            .await;
        let _login = server
            .mock("POST", "/login")
            .with_status(401)
            .create_async()
            .await;

        let options =
            MonitorOptions::new(server.url()).with_credentials("nutanix".into(), "nope".into());
        let report = run_checks(&options).await.unwrap();

        assert!(!report.all_passed());
        assert_eq!(report.tests.len(), 2);
        assert_eq!(report.tests[1].status_code, Some(401));
        let text = report.render();
        assert!(text.contains("LOGIN: ❌ FAIL"));
        assert!(text.contains("ISSUES DETECTED"));
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_errors() {
        let report = run_checks(&MonitorOptions::new("http://127.0.0.1:1"))
            .await
            .unwrap();
        assert!(!report.all_passed());
        assert!(report.tests[0].error.is_some());
        assert_eq!(
            report.tests[1].error.as_deref(),
            Some("no dashboard credentials supplied")
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tests"][0]["success"], false);
        assert!(json["tests"][0].get("status_code").is_none());
    }
}
