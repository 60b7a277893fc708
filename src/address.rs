use std::fmt;

use crate::constants::*;

/// A physical page number.
///
/// Page numbers, offsets, and stored bytes all travel through memory as the
/// same 8-bit representation; this newtype keeps them apart everywhere except
/// the encode/decode boundary below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageNumber(u8);

impl PageNumber {
    /// Page 0 holds the free map and the PTP table.
    pub const ZERO: Self = PageNumber(0);

    #[inline]
    pub fn new(n: u8) -> Self {
        PageNumber(n)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Encode this page number and a byte offset into a physical address.
    ///
    /// `(page << PAGE_SHIFT) | offset`, wrapped into the store. A page
    /// number at or past PAGE_COUNT can reach this point (stores through an
    /// unmapped virtual page land in page 0 and can scribble on the PTP
    /// table), so the result is masked to MEM_SIZE rather than bounds-checked.
    #[inline]
    pub fn address(self, offset: u8) -> PhysicalAddress {
        PhysicalAddress((((self.0 as usize) << PAGE_SHIFT) | offset as usize) & (MEM_SIZE - 1))
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An index into the simulated physical RAM, always < MEM_SIZE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalAddress(usize);

impl PhysicalAddress {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The decomposed components of a virtual address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub raw: u16,
    pub page: u8,
    pub offset: u8,
}

impl VirtualAddress {
    /// Decompose a raw virtual address into virtual page and offset.
    pub fn from_raw(raw: u16) -> Self {
        VirtualAddress {
            raw,
            page: (raw >> PAGE_SHIFT) as u8,
            offset: (raw & OFFSET_MASK) as u8,
        }
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VA({}) = (page={}, offset={})",
            self.raw, self.page, self.offset
        )
    }
}
