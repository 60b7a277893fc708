pub mod address;
pub mod alloc;
pub mod constants;
pub mod memory;
pub mod process;
pub mod report;
pub mod translation;

// Re-export commonly used items for convenience
pub use address::{PageNumber, PhysicalAddress, VirtualAddress};
pub use constants::*;
pub use memory::PhysicalMemory;
pub use process::VmError;
