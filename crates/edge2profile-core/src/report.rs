use static_assertions::const_assert;
use std::mem;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, little_endian};

/// Every dumped feature report starts with the report id and a part byte.
pub const HEADER_SIZE: usize = 2;

/// And ends with a little-endian CRC-32 over everything before it.
pub const TRAILER_SIZE: usize = 4;

/// Smallest fragment that still has a header and a trailer to strip.
pub const MIN_FRAGMENT_SIZE: usize = HEADER_SIZE + TRAILER_SIZE;

/// The profile name sits at a fixed offset in the assembled blob:
/// 40 UTF-16LE code units, NUL padded.
pub const NAME_OFFSET: usize = 4;
pub const NAME_SIZE: usize = 80;

#[repr(C, packed)]
#[derive(IntoBytes, FromBytes, Immutable, KnownLayout, Clone, Copy, Debug)]
pub struct ReportHeader {
    pub report_id: u8,
    pub part: u8,
}

#[repr(C, packed)]
#[derive(IntoBytes, FromBytes, Immutable, KnownLayout, Clone, Copy, Debug)]
pub struct ReportTrailer {
    pub checksum: little_endian::U32,
}

const_assert!(mem::size_of::<ReportHeader>() == HEADER_SIZE);
const_assert!(mem::size_of::<ReportTrailer>() == TRAILER_SIZE);
