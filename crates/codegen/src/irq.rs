//! Descriptors for the PLIC interrupt test.

use crate::{dif_name, CTestError, Result};
use labwired_topgen_config::{InterruptEntry, IntrType, ModuleInstance};
use labwired_topgen_ir::{IrqTestPeripheral, MemoryRegion, Name, TestPeripheral, Topology};

/// Widest per-instance interrupt vector the status masks can describe.
pub const MAX_IRQ_MASK_BITS: u32 = u64::BITS;

/// Classification of an instance's interrupt bits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusMasks {
    /// Bit `i` set when interrupt bit `i` is status type.
    pub status_type_mask: u64,
    /// Bit `i` set when interrupt bit `i` is status type and defaults to asserted.
    pub status_default_mask: u64,
    /// Total interrupt width of the instance.
    pub width: u32,
}

/// Computes the status masks of one instance from its interrupt entries.
///
/// Bit offsets accumulate over the entries in order, so event interrupts
/// still occupy their bits.
pub fn status_masks<'a, I>(inst_name: &str, interrupts: I) -> Result<StatusMasks>
where
    I: IntoIterator<Item = &'a InterruptEntry>,
    I::IntoIter: Clone,
{
    let interrupts = interrupts.into_iter();

    let width: u64 = interrupts.clone().map(|irq| u64::from(irq.width)).sum();
    if width > u64::from(MAX_IRQ_MASK_BITS) {
        return Err(CTestError::InterruptWidthOverflow {
            instance: inst_name.to_string(),
            width,
        });
    }

    let mut masks = StatusMasks::default();
    let mut n = 0;
    for irq in interrupts {
        if irq.intr_type == IntrType::Status {
            let bits = bit_range(n, irq.width);
            masks.status_type_mask |= bits;
            if irq.default_val {
                masks.status_default_mask |= bits;
            }
        }
        n += irq.width;
    }
    masks.width = n;

    Ok(masks)
}

/// Bits `[offset, offset + width)`. Callers keep the range within 64 bits.
fn bit_range(offset: u32, width: u32) -> u64 {
    if width == 0 {
        0
    } else {
        (u64::MAX >> (u64::BITS - width)) << offset
    }
}

/// The region whose base address the IRQ test pokes.
///
/// A single region is used whatever its interface; otherwise the `core`
/// interface is required.
fn irq_region<'a>(topology: &'a Topology, module: &ModuleInstance) -> Result<&'a MemoryRegion> {
    topology
        .regions(&module.name)
        .and_then(|regions| {
            if regions.len() == 1 {
                regions.values().next()
            } else {
                regions.get(&Some("core".to_string()))
            }
        })
        .ok_or_else(|| {
            tracing::error!(
                "The 'base_addrs' dict for {} needs to have one entry keyed with 'None' or 'core'.",
                module.r#type
            );
            CTestError::MissingBaseAddrRegion {
                peripheral: module.r#type.clone(),
                instance: module.name.clone(),
            }
        })
}

/// Builds one descriptor per interrupt-bearing instance, sorted by instance name.
pub fn irq_peripherals(topology: &Topology) -> Result<Vec<IrqTestPeripheral>> {
    let top_name = topology.top_name();
    let mut irq_peripherals = Vec::new();

    for entry in topology.modules() {
        let inst_name = &entry.name;
        if !topology.is_interrupt_module(inst_name) {
            continue;
        }
        let name = &entry.r#type;

        let region = irq_region(topology, entry)?;
        let base_addr_name = region.base_addr_name().as_c_define();

        let plic_name =
            (top_name + &Name::new(["plic", "peripheral"]) + &Name::from_snake_case(inst_name))
                .as_c_enum();

        // IRQ ids are contiguous and in PLIC order.
        let irqs = topology.irqs(inst_name);
        let (Some(first_irq), Some(last_irq)) = (irqs.first(), irqs.last()) else {
            tracing::error!("Instance '{}' has no interrupts", inst_name);
            return Err(CTestError::NoInterrupts {
                instance: inst_name.clone(),
            });
        };

        let plic_start_irq =
            (top_name + &Name::new(["plic", "irq", "id"]) + &Name::from_snake_case(first_irq))
                .as_c_enum();

        let dif_prefix = format!("dif_{}_irq", name);
        let start_irq = dif_name(first_irq, inst_name, &dif_prefix);
        let end_irq = dif_name(last_irq, inst_name, &dif_prefix);

        let masks = status_masks(inst_name, topology.interrupts_of(inst_name))?;

        tracing::debug!(
            "IRQ test peripheral {}: {}..{} type_mask={:#x} default_mask={:#x}",
            inst_name,
            start_irq,
            end_irq,
            masks.status_type_mask,
            masks.status_default_mask
        );

        irq_peripherals.push(IrqTestPeripheral {
            base: TestPeripheral {
                name: name.clone(),
                inst_name: inst_name.clone(),
                base_addr_name,
            },
            plic_name,
            start_irq,
            end_irq,
            plic_start_irq,
            status_type_mask: masks.status_type_mask,
            status_default_mask: masks.status_default_mask,
        });
    }

    irq_peripherals.sort_by(|a, b| a.base.inst_name.cmp(&b.base.inst_name));
    Ok(irq_peripherals)
}
