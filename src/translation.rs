//! Virtual-to-physical address translation.

use crate::address::{PhysicalAddress, VirtualAddress};
use crate::memory::PhysicalMemory;

/// Translate a virtual address by walking `proc`'s one-level page table.
///
/// No mapping validation is performed: an unmapped virtual page (table entry
/// 0) translates into page 0, and a process that was never created is walked
/// through page 0 as its table. Checking the mapping first is the caller's
/// responsibility.
pub fn translate(mem: &PhysicalMemory, proc: u8, vaddr: VirtualAddress) -> PhysicalAddress {
    let table = mem.page_table_of(proc);
    let page = mem.table_entry(table, vaddr.page);
    page.address(vaddr.offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::create_process;

    #[test]
    fn test_translate_scenario() {
        let mut mem = PhysicalMemory::new();
        // Table in page 1; virtual pages 0, 1 in physical pages 2, 3
        create_process(&mut mem, 1, 2).unwrap();

        let pa = translate(&mem, 1, VirtualAddress::from_raw(0x000));
        assert_eq!(pa.index(), 0x0200);

        let pa = translate(&mem, 1, VirtualAddress::from_raw(0x105));
        assert_eq!(pa.index(), 0x0305);
    }

    #[test]
    fn test_translate_round_trip() {
        let mut mem = PhysicalMemory::new();
        create_process(&mut mem, 3, 5).unwrap();
        let table = mem.page_table_of(3);

        for vpage in 0..5u8 {
            for &offset in &[0u8, 1, 77, 255] {
                let raw = ((vpage as u16) << 8) | offset as u16;
                let pa = translate(&mem, 3, VirtualAddress::from_raw(raw));
                let backing = mem.table_entry(table, vpage);
                assert_eq!(pa, backing.address(offset));
            }
        }
    }

    #[test]
    fn test_translate_unmapped_page_lands_in_page_zero() {
        let mut mem = PhysicalMemory::new();
        create_process(&mut mem, 1, 1).unwrap();

        // Virtual page 9 was never mapped; entry 0 sends it into page 0
        let pa = translate(&mem, 1, VirtualAddress::from_raw(0x907));
        assert_eq!(pa.index(), 0x007);
    }

    #[test]
    fn test_store_through_unmapped_page_keeps_later_translations_in_bounds() {
        use crate::constants::MEM_SIZE;

        let mut mem = PhysicalMemory::new();
        create_process(&mut mem, 1, 0).unwrap();

        // Virtual page 0 is unmapped, so this store lands in page 0 at
        // offset 100, which is the PTP entry for process 36
        let addr = translate(&mem, 1, VirtualAddress::from_raw(100));
        mem.write(addr, 200);

        // Process 36 now claims a page table in "page 200"; translating for
        // it must wrap into the store, not index past it
        let addr = translate(&mem, 36, VirtualAddress::from_raw(0));
        assert!(addr.index() < MEM_SIZE);
        let _ = mem.read(addr);
    }

    #[test]
    fn test_store_then_load_through_translation() {
        let mut mem = PhysicalMemory::new();
        create_process(&mut mem, 2, 2).unwrap();

        let addr = translate(&mem, 2, VirtualAddress::from_raw(0x12A));
        mem.write(addr, 99);
        assert_eq!(mem.read(translate(&mem, 2, VirtualAddress::from_raw(0x12A))), 99);

        // Physically: virtual page 1 of proc 2 is page 3
        use crate::address::PageNumber;
        assert_eq!(mem.read(PageNumber::new(3).address(0x2A)), 99);
    }
}
