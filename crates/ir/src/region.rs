//! Register windows of module instances.

use crate::naming::Name;
use std::collections::BTreeMap;

/// Register regions of one instance, keyed by bus interface name.
///
/// `None` is the unnamed interface of a single-interface block.
pub type RegionMap = BTreeMap<Option<String>, MemoryRegion>;

/// A register window of a module instance in the top-level memory map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    /// Fully qualified name, e.g. `top_earlgrey_rv_core_ibex_cfg`.
    pub name: Name,

    /// Absolute base address.
    pub base_addr: u64,

    /// Size of the window in bytes.
    pub size_bytes: u64,
}

impl MemoryRegion {
    /// Creates a region.
    pub fn new(name: Name, base_addr: u64, size_bytes: u64) -> Self {
        Self {
            name,
            base_addr,
            size_bytes,
        }
    }

    /// Name of the generated base-address constant, e.g. `TOP_EARLGREY_UART0_BASE_ADDR`
    /// once rendered as a C define.
    pub fn base_addr_name(&self) -> Name {
        self.name.clone() + Name::new(["base", "addr"])
    }
}
