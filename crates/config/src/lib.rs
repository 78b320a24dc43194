// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Default size of a register region when the module does not declare one.
pub const DEFAULT_REGION_SIZE: u64 = 0x1000;

fn default_true() -> bool {
    true
}

fn default_width() -> u32 {
    1
}

fn default_region_size() -> u64 {
    DEFAULT_REGION_SIZE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntrType {
    #[serde(alias = "Status", alias = "STATUS")]
    Status,
    #[default]
    #[serde(alias = "Event", alias = "EVENT")]
    Event,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModuleInstance {
    pub name: String,
    pub r#type: String, // "uart", "aes", "rv_plic", ...
    /// Bus interface name to base address. A `~` key is the unnamed interface.
    #[serde(default)]
    pub base_addrs: BTreeMap<Option<String>, u64>,
    #[serde(default = "default_region_size")]
    pub size: u64,
    #[serde(default = "default_true")]
    pub generate_dif: bool,
    /// Set when the module routes its alerts to an external top-level port.
    #[serde(default)]
    pub outgoing_alert: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InterruptEntry {
    pub name: String,
    pub module_name: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default)]
    pub intr_type: IntrType,
    #[serde(default)]
    pub default_val: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlertEntry {
    pub name: String,
    pub module_name: String,
    #[serde(default = "default_width")]
    pub width: u32,
}

/// A parsed top-level chip configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TopConfig {
    pub name: String,
    pub module: Vec<ModuleInstance>,
    #[serde(default)]
    pub interrupt: Vec<InterruptEntry>,
    #[serde(default)]
    pub alert: Vec<AlertEntry>,
    #[serde(default)]
    pub interrupt_module: Vec<String>,
    #[serde(default)]
    pub alert_module: Vec<String>,
}

impl TopConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read top configuration at {:?}", path))?;
        let top = Self::from_yaml(&content)?;
        tracing::debug!(
            "Loaded top '{}' from {:?}: {} modules, {} interrupts, {} alerts",
            top.name,
            path,
            top.module.len(),
            top.interrupt.len(),
            top.alert.len()
        );
        Ok(top)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let top: Self =
            serde_yaml::from_str(yaml).context("Failed to parse Top Configuration YAML")?;
        top.validate()?;
        Ok(top)
    }

    /// Structural checks that the descriptor builders rely on.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Top 'name' cannot be empty");
        }

        let mut seen = HashSet::new();
        for m in &self.module {
            if m.name.trim().is_empty() {
                anyhow::bail!("Module of type '{}' has an empty name", m.r#type);
            }
            if !seen.insert(m.name.as_str()) {
                anyhow::bail!("Duplicate module name '{}'", m.name);
            }
        }

        for intr in &self.interrupt {
            if !seen.contains(intr.module_name.as_str()) {
                anyhow::bail!(
                    "Interrupt '{}' references unknown module '{}'",
                    intr.name,
                    intr.module_name
                );
            }
            if intr.width == 0 {
                anyhow::bail!("Interrupt '{}' must be at least one bit wide", intr.name);
            }
        }

        for alert in &self.alert {
            if !seen.contains(alert.module_name.as_str()) {
                anyhow::bail!(
                    "Alert '{}' references unknown module '{}'",
                    alert.name,
                    alert.module_name
                );
            }
            if alert.width == 0 {
                anyhow::bail!("Alert '{}' must be at least one bit wide", alert.name);
            }
        }

        for (list, names) in [
            ("interrupt_module", &self.interrupt_module),
            ("alert_module", &self.alert_module),
        ] {
            if let Some(unknown) = names.iter().find(|n| !seen.contains(n.as_str())) {
                anyhow::bail!("'{}' lists unknown module '{}'", list, unknown);
            }
        }

        Ok(())
    }

    pub fn find_module(&self, name: &str) -> Option<&ModuleInstance> {
        self.module.iter().find(|m| m.name == name)
    }

    pub fn find_module_by_type(&self, r#type: &str) -> Option<&ModuleInstance> {
        self.module.iter().find(|m| m.r#type == r#type)
    }

    /// Interrupt entries owned by `module_name`, in declaration order.
    pub fn interrupts_of<'a>(
        &'a self,
        module_name: &'a str,
    ) -> impl Iterator<Item = &'a InterruptEntry> + Clone + 'a {
        self.interrupt
            .iter()
            .filter(move |i| i.module_name == module_name)
    }
}
