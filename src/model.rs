//! Wire types shared by the backend and the dashboard.

use serde::{Deserialize, Serialize};

/// A powered-on virtual machine as listed by `GET /api/vms`.
///
/// Display data only: the dashboard never mutates a record and drops the
/// whole list on the next refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VmRecord {
    #[serde(default, alias = "uuid")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub vcpus: u32,
    #[serde(default)]
    pub memory_gb: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_addresses: Option<Vec<String>>,
    #[serde(default)]
    pub console_url: String,
}

impl VmRecord {
    /// Comma-joined addresses, or `None` when the VM reports no address.
    pub fn joined_ips(&self) -> Option<String> {
        self.ip_addresses
            .as_ref()
            .filter(|ips| !ips.is_empty())
            .map(|ips| ips.join(", "))
    }
}
