//! Descriptors for the alert handler test.

use crate::{dif_name, CTestError, Result};
use labwired_topgen_config::ModuleInstance;
use labwired_topgen_ir::{AlertTestPeripheral, MemoryRegion, Name, TestPeripheral, Topology};

/// Interfaces tried, in order, for an alert-bearing instance's registers.
/// The unnamed interface is the last resort.
const ALERT_REGION_PRIORITY: [&str; 3] = ["core", "regs", "cfg"];

fn alert_region<'a>(topology: &'a Topology, module: &ModuleInstance) -> Result<&'a MemoryRegion> {
    topology
        .regions(&module.name)
        .and_then(|regions| {
            ALERT_REGION_PRIORITY
                .iter()
                .find_map(|if_name| regions.get(&Some(if_name.to_string())))
                .or_else(|| regions.get(&None::<String>))
        })
        .ok_or_else(|| {
            tracing::error!(
                "The 'base_addrs' dict for {} needs an entry keyed with 'core', 'regs', 'cfg' or 'None'.",
                module.r#type
            );
            CTestError::MissingAlertRegion {
                peripheral: module.r#type.clone(),
                instance: module.name.clone(),
            }
        })
}

/// Builds one descriptor per alert-bearing instance with DIFs, sorted by instance name.
///
/// Instances whose alerts leave the top through an external port get no descriptor.
pub fn alert_peripherals(topology: &Topology) -> Result<Vec<AlertTestPeripheral>> {
    let top_name = topology.top_name();
    let mut alert_peripherals = Vec::new();

    for entry in topology.modules() {
        let inst_name = &entry.name;
        if !topology.is_alert_module(inst_name) {
            continue;
        }
        if !entry.generate_dif {
            tracing::debug!("Skipping alerts of {}: DIF generation disabled", inst_name);
            continue;
        }
        let name = &entry.r#type;

        let region = alert_region(topology, entry)?;
        let base_addr_name = region.base_addr_name().as_c_define();

        if let Some(port) = &entry.outgoing_alert {
            tracing::debug!(
                "Skipping alerts of {}: routed to external port '{}'",
                inst_name,
                port
            );
            continue;
        }

        let alerts = topology.alerts(inst_name);
        let Some(first_alert) = alerts.first() else {
            tracing::error!("Instance '{}' has no alerts", inst_name);
            return Err(CTestError::NoAlerts {
                instance: inst_name.clone(),
            });
        };
        let num_alerts = alerts.len();

        // Global alert handler index, not the instance-local one.
        let top_alert_name =
            (top_name + &Name::new(["Alert", "Id"]) + &Name::from_snake_case(first_alert))
                .as_c_enum();

        let dif_alert_name = dif_name(first_alert, inst_name, &format!("dif_{}_alert", name));

        tracing::debug!(
            "Alert test peripheral {}: {} ({} alerts)",
            inst_name,
            top_alert_name,
            num_alerts
        );

        alert_peripherals.push(AlertTestPeripheral {
            base: TestPeripheral {
                name: name.clone(),
                inst_name: inst_name.clone(),
                base_addr_name,
            },
            top_alert_name,
            dif_alert_name,
            num_alerts,
        });
    }

    alert_peripherals.sort_by(|a, b| a.base.inst_name.cmp(&b.base.inst_name));
    Ok(alert_peripherals)
}
