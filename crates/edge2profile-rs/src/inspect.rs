use std::path::Path;

use edge2profile_core::{ProfileSlot, assemble_profile, profile_name};
use log::info;

use crate::merge::open_fragments;

/// Prints the profile name embedded in a slot's fragments without writing
/// anything to disk.
pub fn inspect(path: &Path, hid: &str, slot: ProfileSlot) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = open_fragments(path, hid, slot)?;

    let blob = assemble_profile(inputs)?;
    let name = profile_name(&blob)?;

    info!("{slot}: {name}");

    Ok(())
}
