//! VM table rendering
//!
//! Every state replaces the whole table body: skeletons while loading, one
//! row per VM, or a single explanatory row.

use super::escape::escape_html;
use super::surface::{TableBody, TableRow};
use crate::consts::dashboard_consts::table::{
    COLUMN_COUNT, COLUMNS, NO_RESULTS_ROW_ID, SKELETON_ROWS,
};
use crate::model::VmRecord;
use std::fmt::Write;
use std::rc::Rc;

/// Skeleton placeholder class per column, matching the final cell widths.
const SKELETON_CELLS: [&str; COLUMN_COUNT] = [
    "skeleton skeleton-text medium",
    "skeleton skeleton-text short",
    "skeleton skeleton-text short",
    "skeleton skeleton-text short",
    "skeleton skeleton-text short",
    "skeleton skeleton-text",
    "skeleton skeleton-button",
];

/// What ended up in the table after a successful fetch.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Rendered {
    Rows(usize),
    Empty,
}

pub struct TableRenderer {
    table: Rc<dyn TableBody>,
}

impl TableRenderer {
    pub fn new(table: Rc<dyn TableBody>) -> Self {
        Self { table }
    }

    pub fn show_loading(&self) {
        self.table.clear();
        for _ in 0..SKELETON_ROWS {
            self.table.append(skeleton_row());
        }
    }

    /// Replaces the table with `vms`, in the order received.
    pub fn show_vms(&self, vms: &[VmRecord]) -> Rendered {
        self.table.clear();
        if vms.is_empty() {
            self.table.append(empty_row());
            return Rendered::Empty;
        }
        for vm in vms {
            self.table.append(vm_row(vm));
        }
        Rendered::Rows(vms.len())
    }

    pub fn show_error(&self, message: &str) {
        self.table.clear();
        self.table.append(error_row(message));
    }
}

pub fn skeleton_row() -> TableRow {
    let mut html = String::new();
    for (label, class) in COLUMNS.iter().zip(SKELETON_CELLS) {
        let _ = write!(
            html,
            r#"<td data-label="{label}"><div class="{class}"></div></td>"#
        );
    }
    TableRow {
        id: None,
        class: Some("skeleton-row"),
        vm_id: None,
        name: String::new(),
        html,
    }
}

pub fn vm_row(vm: &VmRecord) -> TableRow {
    let name = escape_html(&vm.name);
    let console_url = escape_html(&vm.console_url);
    let ips = vm
        .joined_ips()
        .map(|ips| escape_html(&ips))
        .unwrap_or_else(|| "No IP".to_string());

    let html = format!(
        r#"<td data-label="Name"><strong>{name}</strong></td>
<td data-label="Cluster">{cluster}</td>
<td data-label="Status">
    <span class="status status-active">
        <i class="fas fa-circle" aria-hidden="true"></i>
        <span>&nbsp;Running</span>
    </span>
</td>
<td data-label="vCPUs">{vcpus}</td>
<td data-label="Memory">{memory} GB</td>
<td data-label="IP Addresses">{ips}</td>
<td data-label="Actions">
    <a href="{console_url}"
       class="btn btn-primary console-btn"
       target="_blank"
       rel="noopener"
       aria-label="Open console for {name}"
       title="Open console in new tab: {console_url}">
        <i class="fas fa-terminal btn-icon" aria-hidden="true"></i> Console
    </a>
</td>"#,
        cluster = escape_html(&vm.cluster_name),
        vcpus = vm.vcpus,
        memory = vm.memory_gb,
    );

    TableRow {
        id: None,
        class: None,
        vm_id: Some(vm.id.clone()),
        name: vm.name.clone(),
        html,
    }
}

pub fn empty_row() -> TableRow {
    centered_row(
        None,
        "No virtual machines are currently powered on.",
        format!(
            r#"<td colspan="{COLUMN_COUNT}" style="text-align: center;">No virtual machines are currently powered on.</td>"#
        ),
    )
}

pub fn error_row(message: &str) -> TableRow {
    let text = format!("Unable to load VM data: {message}");
    let html = format!(
        r#"<td colspan="{COLUMN_COUNT}" style="text-align: center; color: var(--nutanix-danger);"><i class="fas fa-exclamation-triangle" aria-hidden="true"></i> {}</td>"#,
        escape_html(&text)
    );
    centered_row(None, &text, html)
}

/// Synthetic row shown when a search term matches nothing.
pub fn no_results_row(term: &str) -> TableRow {
    let text = format!("No VMs found matching \"{term}\"");
    let html = format!(
        r#"<td colspan="{COLUMN_COUNT}" style="text-align: center; color: var(--text-muted);"><i class="fas fa-search" aria-hidden="true"></i> {}</td>"#,
        escape_html(&text)
    );
    centered_row(Some(NO_RESULTS_ROW_ID.to_string()), &text, html)
}

fn centered_row(id: Option<String>, text: &str, html: String) -> TableRow {
    TableRow {
        id,
        class: None,
        vm_id: None,
        name: text.to_string(),
        html,
    }
}
