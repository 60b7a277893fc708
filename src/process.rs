//! Process lifecycle: building and tearing down per-process page tables.

use std::fmt;

use log::debug;
use thiserror::Error;

use crate::alloc::{alloc_page, free_page};
use crate::constants::*;
use crate::memory::PhysicalMemory;

/// What an allocation was for, named in OOM reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocPurpose {
    PageTable,
    DataPage,
}

impl fmt::Display for AllocPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocPurpose::PageTable => f.write_str("page table"),
            AllocPurpose::DataPage => f.write_str("data page"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("OOM: proc {proc}: {purpose}")]
    OutOfMemory { proc: u8, purpose: AllocPurpose },
}

/// Create a process: one page-table page plus `page_count` data pages.
///
/// Virtual pages are assigned in order 0, 1, 2, ... Each maps to whatever the
/// allocator returns. If the table page cannot be allocated, creation aborts
/// before touching any data pages. If a data-page allocation fails partway,
/// the pages handed out so far stay allocated and mapped; there is no
/// rollback, so a partially built process is left behind.
pub fn create_process(
    mem: &mut PhysicalMemory,
    proc: u8,
    page_count: usize,
) -> Result<(), VmError> {
    let table = alloc_page(mem).map_err(|_| VmError::OutOfMemory {
        proc,
        purpose: AllocPurpose::PageTable,
    })?;
    mem.set_page_table_of(proc, table);
    debug!("proc {proc}: page table in page {table}");

    for slot in 0..page_count {
        let page = alloc_page(mem).map_err(|_| VmError::OutOfMemory {
            proc,
            purpose: AllocPurpose::DataPage,
        })?;
        mem.set_table_entry(table, slot as u8, page);
        debug!("proc {proc}: virtual page {slot} in page {page}");
    }

    Ok(())
}

/// Destroy a process, returning its data pages and page-table page.
///
/// Frees the page number stored in each table entry, then the table page
/// itself. The PTP entry is left stale. Destroying a process that was never
/// created walks page 0 as if it were a page table and frees whatever values
/// it finds there; page 0 itself is never released because the allocator
/// refuses to free it.
pub fn destroy_process(mem: &mut PhysicalMemory, proc: u8) {
    let table = mem.page_table_of(proc);
    for slot in 0..PAGE_COUNT as u8 {
        let page = mem.table_entry(table, slot);
        if !page.is_zero() {
            free_page(mem, page);
        }
    }
    free_page(mem, table);
    debug!("proc {proc}: destroyed, table was page {table}");
}
