//! Prism Central v3 client
//!
//! Lists VMs (and, when needed, clusters) and maps them to the records the
//! dashboard displays.

use super::cluster_cache::ClusterCache;
use super::error::ServerError;
use crate::config::ServerConfig;
use crate::consts::dashboard_consts::server::{PRISM_PAGE_LENGTH, PRISM_PORT};
use crate::model::VmRecord;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

/// Where the backend gets its VM list from.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VmSource: Send + Sync {
    /// Powered-on VMs, sorted by name.
    async fn powered_on_vms(&self) -> Result<Vec<VmRecord>, ServerError>;
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    entities: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Metadata {
    uuid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Reference {
    uuid: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IpEndpoint {
    ip: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Nic {
    ip_endpoint_list: Vec<IpEndpoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VmFeatures {
    num_vcpus: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VmResources {
    power_state: Option<String>,
    num_sockets: Option<u32>,
    num_cores_per_socket: Option<u32>,
    num_vcpus: Option<u32>,
    memory_size_mib: Option<u64>,
    vm_features: VmFeatures,
    nic_list: Vec<Nic>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VmStatus {
    name: Option<String>,
    cluster_reference: Option<Reference>,
    resources: VmResources,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VmEntity {
    metadata: Metadata,
    status: VmStatus,
}

impl VmEntity {
    fn is_on(&self) -> bool {
        self.status.resources.power_state.as_deref() == Some("ON")
    }

    fn cluster_uuid(&self) -> Option<&str> {
        self.status.cluster_reference.as_ref()?.uuid.as_deref()
    }

    fn cluster_name(&self) -> Option<&str> {
        self.status
            .cluster_reference
            .as_ref()?
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
    }

    /// Sockets × cores, else the flat vCPU count, else the feature flag count.
    fn vcpus(&self) -> u32 {
        let resources = &self.status.resources;
        let topology = resources
            .num_sockets
            .unwrap_or(0)
            .checked_mul(resources.num_cores_per_socket.unwrap_or(1));
        [
            topology,
            resources.num_vcpus,
            resources.vm_features.num_vcpus,
        ]
        .into_iter()
        .flatten()
        .find(|&n| n > 0)
        .unwrap_or(0)
    }

    fn memory_gb(&self) -> f64 {
        let mib = self.status.resources.memory_size_mib.unwrap_or(0) as f64;
        (mib / 1024.0 * 100.0).round() / 100.0
    }

    fn ip_addresses(&self) -> Option<Vec<String>> {
        let ips: Vec<String> = self
            .status
            .resources
            .nic_list
            .iter()
            .flat_map(|nic| &nic.ip_endpoint_list)
            .filter_map(|endpoint| endpoint.ip.clone())
            .collect();
        Some(ips).filter(|ips| !ips.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClusterSpec {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClusterEntity {
    metadata: Metadata,
    status: ClusterSpec,
    spec: ClusterSpec,
}

/// Maps Prism VM entities to dashboard records: powered-on only, sorted by
/// name ignoring case.
pub fn to_records(
    entities: &[VmEntity],
    cluster_names: &HashMap<String, String>,
    console_base_url: &str,
) -> Vec<VmRecord> {
    let mut records: Vec<VmRecord> = entities
        .iter()
        .filter(|vm| vm.is_on())
        .map(|vm| {
            let uuid = vm.metadata.uuid.clone().unwrap_or_default();
            let cluster_name = vm
                .cluster_name()
                .or_else(|| vm.cluster_uuid().and_then(|id| cluster_names.get(id)).map(String::as_str))
                .unwrap_or("Unknown")
                .to_string();
            VmRecord {
                console_url: format!("{console_base_url}/console/vnc_auto.html?path=proxy/{uuid}"),
                id: uuid,
                name: vm.status.name.clone().unwrap_or_default(),
                cluster_name,
                vcpus: vm.vcpus(),
                memory_gb: vm.memory_gb(),
                ip_addresses: vm.ip_addresses(),
            }
        })
        .collect();
    records.sort_by_cached_key(|vm| vm.name.to_lowercase());
    records
}

pub struct PrismClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    console_base_url: String,
    clusters: ClusterCache,
}

impl PrismClient {
    pub fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        let prism = &config.prism;
        let client = reqwest::Client::builder()
            .timeout(prism.timeout)
            .danger_accept_invalid_certs(!prism.verify_tls)
            .user_agent(format!(
                "vm-dashboard/{} (build {})",
                env!("CARGO_PKG_VERSION"),
                env!("BUILD_TIMESTAMP")
            ))
            .build()?;

        if !prism.verify_tls {
            log::warn!("TLS verification towards Prism Central is disabled");
        }

        Ok(Self {
            client,
            base_url: base_url(&prism.host),
            username: prism.username.clone(),
            password: prism.password.clone(),
            console_base_url: config.console_base_url.clone(),
            clusters: ClusterCache::new(config.cluster_cache_ttl),
        })
    }

    async fn list<T: DeserializeOwned>(&self, kind: &str) -> Result<Vec<T>, ServerError> {
        let url = format!("{}/api/nutanix/v3/{kind}s/list", self.base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&json!({ "kind": kind, "length": PRISM_PAGE_LENGTH }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServerError::from_response(response).await);
        }
        let list: ListResponse<T> = response.json().await?;
        Ok(list.entities)
    }

    /// Cluster names by uuid. A failed lookup degrades to an empty map.
    async fn cluster_names(&self) -> HashMap<String, String> {
        if let Some(names) = self.clusters.get() {
            return names;
        }
        match self.list::<ClusterEntity>("cluster").await {
            Ok(clusters) => {
                let names: HashMap<String, String> = clusters
                    .into_iter()
                    .filter_map(|cluster| {
                        let name = cluster.status.name.or(cluster.spec.name)?;
                        Some((cluster.metadata.uuid?, name))
                    })
                    .collect();
                self.clusters.store(names.clone());
                names
            }
            Err(e) => {
                log::warn!("Cluster lookup failed, names will show as Unknown: {}", e);
                HashMap::new()
            }
        }
    }
}

/// `https://{host}:9440` unless `host` already names a scheme.
fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}:{PRISM_PORT}")
    }
}

#[async_trait::async_trait]
impl VmSource for PrismClient {
    async fn powered_on_vms(&self) -> Result<Vec<VmRecord>, ServerError> {
        let entities = self.list::<VmEntity>("vm").await?;
        let needs_lookup = entities
            .iter()
            .any(|vm| vm.is_on() && vm.cluster_name().is_none() && vm.cluster_uuid().is_some());
        let names = if needs_lookup {
            self.cluster_names().await
        } else {
            HashMap::new()
        };

        let records = to_records(&entities, &names, &self.console_base_url);
        log::debug!(
            "Prism Central listed {} VMs, {} powered on",
            entities.len(),
            records.len()
        );
        Ok(records)
    }
}
