use crate::report::{
    MIN_FRAGMENT_SIZE, NAME_OFFSET, NAME_SIZE, ReportHeader, ReportTrailer, TRAILER_SIZE,
};
use log::debug;
use std::io::{Read, Write};
use thiserror::Error;
use zerocopy::FromBytes;

pub mod profiles;
pub mod report;

pub use profiles::ProfileSlot;

/// Each profile spans this many consecutive feature reports.
pub const FRAGMENTS_PER_PROFILE: usize = 3;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Failed to read report fragment")]
    FailedToRead(std::io::Error),
    #[error("Report fragment is {0} bytes, too short for a header and checksum trailer")]
    FragmentTooShort(usize),
    #[error("Assembled profile is {0} bytes, too short to carry a name")]
    ProfileTooShort(usize),
    #[error("Profile name is not valid UTF-16")]
    InvalidName,
    #[error("Failed to write merged profile")]
    FailedToWrite(std::io::Error),
}

/// One dumped feature report with the header and checksum trailer split off.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub header: ReportHeader,
    pub payload: Vec<u8>,
    pub checksum: u32,
}

/// Reads a whole report fragment and strips the two byte header and the
/// four byte checksum trailer.
pub fn read_fragment(mut input: impl Read) -> Result<Fragment, MergeError> {
    let mut raw = Vec::new();
    input
        .read_to_end(&mut raw)
        .map_err(MergeError::FailedToRead)?;

    if raw.len() < MIN_FRAGMENT_SIZE {
        return Err(MergeError::FragmentTooShort(raw.len()));
    }

    let (header, rest) =
        ReportHeader::read_from_prefix(&raw).map_err(|_| MergeError::FragmentTooShort(raw.len()))?;
    let (payload, trailer) = rest.split_at(rest.len() - TRAILER_SIZE);
    let trailer =
        ReportTrailer::read_from_bytes(trailer).map_err(|_| MergeError::FragmentTooShort(raw.len()))?;
    let checksum = trailer.checksum.get();

    debug!(
        "Fragment {:#04x} part {}: {} payload bytes, checksum {:#010x}",
        header.report_id,
        header.part,
        payload.len(),
        checksum
    );

    Ok(Fragment {
        header,
        payload: payload.to_vec(),
        checksum,
    })
}

/// Reassembles a profile blob by concatenating the stripped payloads of the
/// given fragment streams, in input order.
pub fn assemble_profile<R: Read>(
    fragments: impl IntoIterator<Item = R>,
) -> Result<Vec<u8>, MergeError> {
    let mut blob = Vec::new();

    for input in fragments {
        let fragment = read_fragment(input)?;
        blob.extend_from_slice(&fragment.payload);
    }

    Ok(blob)
}

/// Decodes the profile name embedded in an assembled blob: 40 UTF-16LE code
/// units at a fixed offset, truncated at the first NUL unit. Without a NUL
/// the whole field is the name.
///
/// The field is always little endian on the wire, so no BOM handling takes
/// place; a blob that does start the field with U+FEFF keeps it in the name.
pub fn profile_name(blob: &[u8]) -> Result<String, MergeError> {
    if blob.len() < NAME_OFFSET + NAME_SIZE {
        return Err(MergeError::ProfileTooShort(blob.len()));
    }

    let units = blob[NAME_OFFSET..NAME_OFFSET + NAME_SIZE]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

    let mut name = char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| MergeError::InvalidName)?;

    if let Some(end) = name.find('\0') {
        name.truncate(end);
    }

    Ok(name)
}

/// Replaces path separators and redirection characters so the name is safe
/// to use as a file name.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '<' | '>' | '\\' => '-',
            c => c,
        })
        .collect()
}

/// Merges three report fragment streams into one profile blob on the output
/// writer. Returns the profile name embedded in the blob, unsanitized.
pub fn merge_profile<R: Read>(
    fragments: impl IntoIterator<Item = R>,
    mut output: impl Write,
) -> Result<String, MergeError> {
    let blob = assemble_profile(fragments)?;
    let name = profile_name(&blob)?;

    output.write_all(&blob).map_err(MergeError::FailedToWrite)?;

    Ok(name)
}
