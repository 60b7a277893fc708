pub const PAGE_SHIFT: u32 = 8;
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;
pub const PAGE_COUNT: usize = 64;
pub const MEM_SIZE: usize = PAGE_SIZE * PAGE_COUNT;

pub const OFFSET_MASK: u16 = (PAGE_SIZE - 1) as u16;

/// Offset within page 0 where the page-table-pointer table begins.
pub const PTP_OFFSET: usize = 64;

/// Process IDs index page 0 starting at PTP_OFFSET, so only this many fit.
pub const MAX_PROCS: usize = PAGE_SIZE - PTP_OFFSET;
