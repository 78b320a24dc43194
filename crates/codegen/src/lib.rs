#![deny(missing_docs)]

//! # Top-level SW test generation
//!
//! Derives the descriptors the C test templates need to exercise every
//! peripheral's interrupt and alert wiring: base-address defines, PLIC
//! mappings, DIF enum names and interrupt classification masks.
//!
//! All identifiers are rendered through [`labwired_topgen_ir::Name`] so they
//! match the generated top-level and DIF headers.

use labwired_topgen_ir::{Name, TestPeripherals, Topology};
use thiserror::Error;

pub mod alert;
pub mod irq;

pub use alert::alert_peripherals;
pub use irq::{irq_peripherals, status_masks, StatusMasks, MAX_IRQ_MASK_BITS};

/// Configuration problems that abort a generation run.
///
/// Each variant names the offending peripheral so the fix is obvious from the
/// diagnostic alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CTestError {
    /// An interrupt-bearing instance has no region to take a base address from.
    #[error(
        "The 'base_addrs' dict for {peripheral} needs to have one entry keyed with 'None' or 'core' (instance '{instance}')"
    )]
    MissingBaseAddrRegion {
        /// Peripheral type.
        peripheral: String,
        /// Instance name.
        instance: String,
    },
    /// An alert-bearing instance has none of the candidate register regions.
    #[error(
        "The 'base_addrs' dict for {peripheral} needs an entry keyed with 'core', 'regs', 'cfg' or 'None' (instance '{instance}')"
    )]
    MissingAlertRegion {
        /// Peripheral type.
        peripheral: String,
        /// Instance name.
        instance: String,
    },
    /// Listed as interrupt-bearing but the interrupt table has nothing for it.
    #[error("Instance '{instance}' is listed in 'interrupt_module' but has no interrupts")]
    NoInterrupts {
        /// Instance name.
        instance: String,
    },
    /// Listed as alert-bearing but the alert table has nothing for it.
    #[error("Instance '{instance}' is listed in 'alert_module' but has no alerts")]
    NoAlerts {
        /// Instance name.
        instance: String,
    },
    /// The interrupts of one instance do not fit the status masks.
    #[error(
        "Interrupts of '{instance}' span {width} bits, status masks hold at most {}",
        MAX_IRQ_MASK_BITS
    )]
    InterruptWidthOverflow {
        /// Instance name.
        instance: String,
        /// Total interrupt width of the instance.
        width: u64,
    },
}

/// Result type for test descriptor generation.
pub type Result<T> = std::result::Result<T, CTestError>;

/// Builds every descriptor list for a top.
pub struct CTestGenerator;

impl CTestGenerator {
    /// Runs the IRQ builder, then the alert builder when the top has an alert handler.
    pub fn generate(topology: &Topology) -> Result<TestPeripherals> {
        let irq_peripherals = irq_peripherals(topology)?;

        let alert_peripherals = if topology.find_module_by_type("alert_handler").is_some() {
            Some(alert_peripherals(topology)?)
        } else {
            tracing::info!("No alert_handler in top, skipping alert test peripherals");
            None
        };

        tracing::info!(
            "Generated {} IRQ and {} alert test peripherals",
            irq_peripherals.len(),
            alert_peripherals.as_ref().map_or(0, Vec::len)
        );

        Ok(TestPeripherals {
            irq_peripherals,
            alert_peripherals,
        })
    }
}

/// Rewrites an instance-qualified signal (`uart0_tx_watermark`) into its
/// instance-agnostic DIF enum (`kDifUartIrqTxWatermark` for prefix `dif_uart_irq`).
///
/// Only the first occurrence of the instance name is replaced.
pub(crate) fn dif_name(signal: &str, inst_name: &str, dif_prefix: &str) -> String {
    Name::from_snake_case(&signal.replacen(inst_name, dif_prefix, 1)).as_c_enum()
}
