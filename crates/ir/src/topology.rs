//! Per-instance view of a top configuration.
//!
//! Flattens the module list and the top-level interrupt and alert tables into
//! lookups keyed by instance name: register regions, ordered IRQ ids and
//! ordered alert ids.

use crate::naming::Name;
use crate::region::{MemoryRegion, RegionMap};
use crate::{IrError, Result};
use labwired_topgen_config::{InterruptEntry, ModuleInstance, TopConfig};
use std::collections::{BTreeMap, BTreeSet};

/// Instance-keyed view of a [`TopConfig`].
#[derive(Debug, Clone)]
pub struct Topology {
    top: TopConfig,
    top_name: Name,
    device_regions: BTreeMap<String, RegionMap>,
    device_irqs: BTreeMap<String, Vec<String>>,
    device_alerts: BTreeMap<String, Vec<String>>,
    interrupt_modules: BTreeSet<String>,
    alert_modules: BTreeSet<String>,
}

impl Topology {
    /// Derives regions, IRQ ids and alert ids for every module of `top`.
    pub fn new(top: TopConfig) -> Result<Self> {
        let top_name = Name::new(["top"]) + Name::from_snake_case(&top.name);

        let mut device_regions = BTreeMap::new();
        for module in &top.module {
            let mut regions = RegionMap::new();
            for (if_name, base) in &module.base_addrs {
                let mut name = top_name.clone() + Name::from_snake_case(&module.name);
                if let Some(if_name) = if_name {
                    name = name + Name::from_snake_case(if_name);
                }
                regions.insert(
                    if_name.clone(),
                    MemoryRegion::new(name, *base, module.size),
                );
            }
            device_regions.insert(module.name.clone(), regions);
        }

        let known = |module_name: &str, signal: &str| {
            if device_regions.contains_key(module_name) {
                Ok(())
            } else {
                Err(IrError::UnknownModule {
                    signal: signal.to_string(),
                    module: module_name.to_string(),
                })
            }
        };

        let mut device_irqs: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for intr in &top.interrupt {
            known(&intr.module_name, &intr.name)?;
            device_irqs
                .entry(intr.module_name.clone())
                .or_default()
                .extend(expand_signal(&intr.name, intr.width));
        }

        let mut device_alerts: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for alert in &top.alert {
            known(&alert.module_name, &alert.name)?;
            device_alerts
                .entry(alert.module_name.clone())
                .or_default()
                .extend(expand_signal(&alert.name, alert.width));
        }

        let interrupt_modules = top.interrupt_module.iter().cloned().collect();
        let alert_modules = top.alert_module.iter().cloned().collect();

        tracing::debug!(
            "Topology '{}': {} instances, {} with interrupts, {} with alerts",
            top.name,
            device_regions.len(),
            device_irqs.len(),
            device_alerts.len()
        );

        Ok(Self {
            top,
            top_name,
            device_regions,
            device_irqs,
            device_alerts,
            interrupt_modules,
            alert_modules,
        })
    }

    /// The project-wide prefix, `top_<name>`.
    pub fn top_name(&self) -> &Name {
        &self.top_name
    }

    /// Module instances in declaration order.
    pub fn modules(&self) -> &[ModuleInstance] {
        &self.top.module
    }

    /// First module of the given type, if any.
    pub fn find_module_by_type(&self, r#type: &str) -> Option<&ModuleInstance> {
        self.top.find_module_by_type(r#type)
    }

    /// Whether `inst_name` belongs to the interrupt-bearing set.
    pub fn is_interrupt_module(&self, inst_name: &str) -> bool {
        self.interrupt_modules.contains(inst_name)
    }

    /// Whether `inst_name` belongs to the alert-bearing set.
    pub fn is_alert_module(&self, inst_name: &str) -> bool {
        self.alert_modules.contains(inst_name)
    }

    /// Register regions of an instance, keyed by interface name.
    pub fn regions(&self, inst_name: &str) -> Option<&RegionMap> {
        self.device_regions.get(inst_name)
    }

    /// IRQ ids of an instance in PLIC order. Multi-bit interrupts appear once per bit.
    pub fn irqs(&self, inst_name: &str) -> &[String] {
        self.device_irqs
            .get(inst_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Alert ids of an instance in alert-handler order.
    pub fn alerts(&self, inst_name: &str) -> &[String] {
        self.device_alerts
            .get(inst_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Interrupt table entries of an instance, in declaration order.
    pub fn interrupts_of<'a>(
        &'a self,
        inst_name: &'a str,
    ) -> impl Iterator<Item = &'a InterruptEntry> + Clone + 'a {
        self.top.interrupts_of(inst_name)
    }
}

/// `name` for a single-bit signal, `name0 .. name{width-1}` otherwise.
fn expand_signal(name: &str, width: u32) -> Vec<String> {
    if width == 1 {
        vec![name.to_string()]
    } else {
        (0..width).map(|i| format!("{}{}", name, i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top() -> TopConfig {
        TopConfig::from_yaml(
            r#"
name: "earlgrey"
module:
  - name: "uart0"
    type: "uart"
    base_addrs: { ~: 0x40000000 }
    size: 0x40
  - name: "gpio"
    type: "gpio"
    base_addrs: { ~: 0x40040000 }
  - name: "rv_core_ibex"
    type: "rv_core_ibex"
    base_addrs: { cfg: 0x411F0000 }
  - name: "flash_ctrl"
    type: "flash_ctrl"
    base_addrs: { core: 0x41000000, prim: 0x41008000, mem: 0x20000000 }
interrupt:
  - { name: "uart0_tx_watermark", module_name: "uart0", intr_type: "status" }
  - { name: "gpio_gpio", module_name: "gpio", width: 3, intr_type: "status" }
  - { name: "uart0_tx_done", module_name: "uart0" }
alert:
  - { name: "rv_core_ibex_fatal_sw_err", module_name: "rv_core_ibex" }
  - { name: "rv_core_ibex_recov_sw_err", module_name: "rv_core_ibex" }
interrupt_module: ["uart0", "gpio"]
alert_module: ["rv_core_ibex"]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_top_name() {
        let topo = Topology::new(top()).unwrap();
        assert_eq!(topo.top_name().as_c_enum(), "kTopEarlgrey");
    }

    #[test]
    fn test_unnamed_region() {
        let topo = Topology::new(top()).unwrap();
        let regions = topo.regions("uart0").unwrap();
        assert_eq!(regions.len(), 1);
        let region = &regions[&None::<String>];
        assert_eq!(region.base_addr, 0x4000_0000);
        assert_eq!(region.size_bytes, 0x40);
        assert_eq!(
            region.base_addr_name().as_c_define(),
            "TOP_EARLGREY_UART0_BASE_ADDR"
        );
    }

    #[test]
    fn test_named_regions() {
        let topo = Topology::new(top()).unwrap();
        let regions = topo.regions("flash_ctrl").unwrap();
        assert_eq!(regions.len(), 3);
        assert_eq!(
            regions[&Some("core".to_string())]
                .base_addr_name()
                .as_c_define(),
            "TOP_EARLGREY_FLASH_CTRL_CORE_BASE_ADDR"
        );
    }

    #[test]
    fn test_irq_ids_keep_declaration_order() {
        let topo = Topology::new(top()).unwrap();
        assert_eq!(topo.irqs("uart0"), ["uart0_tx_watermark", "uart0_tx_done"]);
    }

    #[test]
    fn test_multibit_irq_expansion() {
        let topo = Topology::new(top()).unwrap();
        assert_eq!(topo.irqs("gpio"), ["gpio_gpio0", "gpio_gpio1", "gpio_gpio2"]);
    }

    #[test]
    fn test_alert_ids() {
        let topo = Topology::new(top()).unwrap();
        assert_eq!(topo.alerts("rv_core_ibex").len(), 2);
        assert!(topo.alerts("uart0").is_empty());
        assert!(topo.irqs("rv_core_ibex").is_empty());
    }

    #[test]
    fn test_membership() {
        let topo = Topology::new(top()).unwrap();
        assert!(topo.is_interrupt_module("gpio"));
        assert!(!topo.is_interrupt_module("flash_ctrl"));
        assert!(topo.is_alert_module("rv_core_ibex"));
        assert!(!topo.is_alert_module("uart0"));
    }

    #[test]
    fn test_unknown_module_rejected() {
        let mut cfg = top();
        cfg.alert.push(labwired_topgen_config::AlertEntry {
            name: "otbn_fatal".to_string(),
            module_name: "otbn".to_string(),
            width: 1,
        });
        let err = Topology::new(cfg).unwrap_err();
        assert!(matches!(err, IrError::UnknownModule { ref module, .. } if module == "otbn"));
    }
}
