use crate::address::{PageNumber, PhysicalAddress};
use crate::constants::*;

/// The simulated physical RAM.
///
/// Page 0 is system metadata: bytes 0..PAGE_COUNT are the free-page map
/// (byte-per-page, 0 = free), and bytes PTP_OFFSET.. are the page-table-
/// pointer table indexed by process ID.
pub struct PhysicalMemory {
    data: Box<[u8; MEM_SIZE]>,
}

impl PhysicalMemory {
    /// Create a zeroed store with page 0 marked allocated in the free map.
    pub fn new() -> Self {
        // Allocate on the heap via vec!, then convert to a boxed array
        let data = vec![0u8; MEM_SIZE].into_boxed_slice();
        let data: Box<[u8; MEM_SIZE]> = data.try_into().unwrap();
        let mut mem = PhysicalMemory { data };
        mem.write(PageNumber::ZERO.address(0), 1);
        mem
    }

    /// Read a byte from physical memory
    #[inline]
    pub fn read(&self, addr: PhysicalAddress) -> u8 {
        self.data[addr.index()]
    }

    /// Write a byte to physical memory
    #[inline]
    pub fn write(&mut self, addr: PhysicalAddress, value: u8) {
        self.data[addr.index()] = value;
    }

    /// Look up the page holding `proc`'s page table from the PTP table.
    ///
    /// Returns page 0 if the process was never assigned one; page 0 is never
    /// allocatable, so the two cases cannot collide. Callers keep `proc`
    /// below MAX_PROCS; the CLI boundary enforces this.
    #[inline]
    pub fn page_table_of(&self, proc: u8) -> PageNumber {
        let entry = PageNumber::ZERO.address(PTP_OFFSET as u8 + proc);
        PageNumber::new(self.read(entry))
    }

    /// Record `table` as the page holding `proc`'s page table.
    pub fn set_page_table_of(&mut self, proc: u8, table: PageNumber) {
        let entry = PageNumber::ZERO.address(PTP_OFFSET as u8 + proc);
        self.write(entry, table.get());
    }

    /// Read page-table entry `slot` of the table stored in page `table`.
    #[inline]
    pub fn table_entry(&self, table: PageNumber, slot: u8) -> PageNumber {
        PageNumber::new(self.read(table.address(slot)))
    }

    /// Map virtual page `slot` to `page` in the table stored in page `table`.
    pub fn set_table_entry(&mut self, table: PageNumber, slot: u8, page: PageNumber) {
        self.write(table.address(slot), page.get());
    }
}

impl Default for PhysicalMemory {
    fn default() -> Self {
        Self::new()
    }
}
