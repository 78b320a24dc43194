//! LabWired top-level generation IR
//!
//! This crate defines the data structures shared by the top-level software
//! test generators:
//!
//! 1. **Naming**: the [`Name`] type that renders identifiers exactly as the
//!    generated headers spell them.
//! 2. **Topology**: an instance-keyed view of a top configuration (register
//!    regions, IRQ ids, alert ids). Requires the `config-interop` feature.
//! 3. **Descriptors**: the serializable records consumed by the C test
//!    templates.

#![warn(missing_docs)]

use thiserror::Error;

pub mod descriptors;
pub mod naming;
pub mod region;
#[cfg(feature = "config-interop")]
pub mod topology;

pub use descriptors::{AlertTestPeripheral, IrqTestPeripheral, TestPeripheral, TestPeripherals};
pub use naming::Name;
pub use region::{MemoryRegion, RegionMap};
#[cfg(feature = "config-interop")]
pub use topology::Topology;

/// Errors raised while deriving the topology view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IrError {
    /// An interrupt or alert names a module that is not instantiated.
    #[error("Signal '{signal}' references unknown module '{module}'")]
    UnknownModule {
        /// The interrupt or alert name.
        signal: String,
        /// The missing module instance.
        module: String,
    },
}

/// Result type for IR operations.
pub type Result<T> = std::result::Result<T, IrError>;
