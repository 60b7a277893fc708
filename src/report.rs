//! Read-only diagnostics over the simulated RAM.
//!
//! Both reports are rendered to a `String` so tests can assert on them
//! byte-for-byte; the binary prints them as-is.

use crate::address::{PageNumber, PhysicalAddress};
use crate::alloc::is_allocated;
use crate::constants::*;
use crate::memory::PhysicalMemory;

const MAP_ROW_WIDTH: usize = 16;

/// Render the free-page map, one `.`/`#` per page, 16 per row.
pub fn page_free_map(mem: &PhysicalMemory) -> String {
    let mut out = String::from("--- PAGE FREE MAP ---\n");
    for n in 0..PAGE_COUNT {
        out.push(if is_allocated(mem, PageNumber::new(n as u8)) {
            '#'
        } else {
            '.'
        });
        if (n + 1) % MAP_ROW_WIDTH == 0 {
            out.push('\n');
        }
    }
    out
}

/// Render `proc`'s page table as `virtual -> physical` pairs, nonzero
/// entries only, in increasing virtual-page order.
pub fn page_table(mem: &PhysicalMemory, proc: u8) -> String {
    let mut out = format!("--- PROCESS {proc} PAGE TABLE ---\n");
    let table = mem.page_table_of(proc);
    for slot in 0..PAGE_COUNT as u8 {
        let page = mem.table_entry(table, slot);
        if !page.is_zero() {
            out.push_str(&format!("{:02x} -> {:02x}\n", slot, page.get()));
        }
    }
    out
}

/// Line printed after a store through the translator.
pub fn store_line(proc: u8, vaddr: u16, addr: PhysicalAddress, value: u8) -> String {
    format!("Stored proc {proc}: {vaddr}=> {addr}, value={value}")
}

/// Line printed after a load through the translator.
pub fn load_line(proc: u8, vaddr: u16, addr: PhysicalAddress, value: u8) -> String {
    format!("Load proc {proc}: {vaddr}=> {addr}, value={value}")
}
