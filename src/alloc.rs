//! Free-page allocation over the byte-per-page map embedded in page 0.

use log::trace;
use thiserror::Error;

use crate::address::PageNumber;
use crate::constants::*;
use crate::memory::PhysicalMemory;

/// Every entry of the free-page map is nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free physical pages")]
pub struct NoFreePages;

/// Allocate the lowest-numbered free page (first fit).
///
/// The scan order is observable: on an otherwise empty store, successive
/// calls return strictly ascending page numbers. A failed call leaves the
/// free map untouched.
pub fn alloc_page(mem: &mut PhysicalMemory) -> Result<PageNumber, NoFreePages> {
    for n in 0..PAGE_COUNT as u8 {
        let flag = PageNumber::ZERO.address(n);
        if mem.read(flag) == 0 {
            mem.write(flag, 1);
            trace!("allocated page {n}");
            return Ok(PageNumber::new(n));
        }
    }
    Err(NoFreePages)
}

/// Return `page` to the free pool.
///
/// Idempotent: freeing an already-free page changes nothing. Page 0 carries
/// the free map itself and is never released, whatever the caller passes.
pub fn free_page(mem: &mut PhysicalMemory, page: PageNumber) {
    if page.is_zero() {
        return;
    }
    mem.write(PageNumber::ZERO.address(page.get()), 0);
    trace!("freed page {page}");
}

/// Whether `page` is currently marked allocated in the free map.
#[inline]
pub fn is_allocated(mem: &PhysicalMemory, page: PageNumber) -> bool {
    mem.read(PageNumber::ZERO.address(page.get())) != 0
}
