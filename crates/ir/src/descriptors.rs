//! Test peripheral descriptors handed to the C test templates.
//!
//! Every string field holds an identifier already defined by the generated
//! top-level header or a DIF header, never a raw constant, so the tests
//! reference a single source of truth.

use serde::{Deserialize, Serialize};

/// Fields shared by every test peripheral kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPeripheral {
    /// Peripheral type, e.g. `uart`.
    pub name: String,

    /// Instance name, e.g. `uart0`. Unique within a descriptor list.
    pub inst_name: String,

    /// Base address define, e.g. `TOP_EARLGREY_UART0_BASE_ADDR`.
    pub base_addr_name: String,
}

/// An instance exercised by the PLIC interrupt test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrqTestPeripheral {
    /// Shared fields, flattened on output.
    #[serde(flatten)]
    pub base: TestPeripheral,

    /// PLIC peripheral id, e.g. `kTopEarlgreyPlicPeripheralUart0`.
    pub plic_name: String,

    /// First DIF IRQ of the instance, e.g. `kDifUartIrqTxWatermark`.
    pub start_irq: String,

    /// Last DIF IRQ of the instance.
    pub end_irq: String,

    /// PLIC id of the first IRQ, e.g. `kTopEarlgreyPlicIrqIdUart0TxWatermark`.
    pub plic_start_irq: String,

    /// Bit `i` set when interrupt bit `i` of the instance is status type.
    pub status_type_mask: u64,

    /// Bit `i` set when interrupt bit `i` is status type and asserted out of reset.
    pub status_default_mask: u64,
}

/// An instance exercised by the alert handler test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertTestPeripheral {
    /// Shared fields, flattened on output.
    #[serde(flatten)]
    pub base: TestPeripheral,

    /// Top-level alert id of the first alert, e.g. `kTopEarlgreyAlertIdAesFatalFault`.
    pub top_alert_name: String,

    /// Instance-agnostic DIF alert of the first alert, e.g. `kDifAesAlertFatalFault`.
    pub dif_alert_name: String,

    /// Number of alerts owned by the instance.
    pub num_alerts: usize,
}

/// Everything the C test templates need for one top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPeripherals {
    /// Interrupt-bearing instances, sorted by instance name.
    pub irq_peripherals: Vec<IrqTestPeripheral>,

    /// Alert-bearing instances, sorted by instance name. `None` when the top
    /// has no alert handler.
    pub alert_peripherals: Option<Vec<AlertTestPeripheral>>,
}
