use std::{
    fs::{self, File},
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use edge2profile_core::{ProfileSlot, assemble_profile, profile_name, sanitize_name};
use log::{LevelFilter, info};

use crate::reporter::ProgressWriter;

/// Fragment files are named with the report id in decimal.
pub fn fragment_path(path: &Path, hid: &str, report_id: u8) -> PathBuf {
    path.join(format!("report_{hid}_{report_id}.bin"))
}

pub fn open_fragments(
    path: &Path,
    hid: &str,
    slot: ProfileSlot,
) -> Result<Vec<BufReader<File>>, std::io::Error> {
    let mut inputs = Vec::with_capacity(slot.report_ids().len());

    for report_id in slot.report_ids() {
        inputs.push(BufReader::new(File::open(fragment_path(
            path, hid, report_id,
        ))?));
    }

    Ok(inputs)
}

pub fn merge(
    path: &Path,
    hid: &str,
    slot: ProfileSlot,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = open_fragments(path, hid, slot)?;

    let blob = assemble_profile(inputs)?;
    let name = profile_name(&blob)?;
    info!("{name}");

    let output_path = output_dir.join(format!("{}.bin", sanitize_name(&name)));
    let output = File::create(&output_path)?;

    let result = if log::max_level() >= LevelFilter::Info {
        let mut writer = ProgressWriter::new(blob.len() as u64, output);
        let result = writer.write_all(&blob);
        writer.finish();
        println!();
        result
    } else {
        let mut output = output;
        output.write_all(&blob)
    };

    if let Err(err) = result {
        fs::remove_file(&output_path)?;
        return Err(Box::new(err));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge2profile_core::report::{NAME_OFFSET, NAME_SIZE};

    #[test]
    fn fragment_paths_use_decimal_report_ids() {
        let path = fragment_path(Path::new("dumps"), "dev0", 0x73);
        assert_eq!(path, Path::new("dumps").join("report_dev0_115.bin"));
    }

    fn fragment_bytes(report_id: u8, part: u8, payload: &[u8]) -> Vec<u8> {
        let mut raw = vec![report_id, part];
        raw.extend_from_slice(payload);
        raw.extend_from_slice(&[0; 4]);
        raw
    }

    /// Payload large enough to carry the whole name field, with `name`
    /// embedded as UTF-16LE.
    fn named_payload(name: &str) -> Vec<u8> {
        let mut payload = vec![0u8; NAME_OFFSET + NAME_SIZE];
        for (i, unit) in name.encode_utf16().enumerate() {
            let offset = NAME_OFFSET + i * 2;
            payload[offset..offset + 2].copy_from_slice(&unit.to_le_bytes());
        }
        payload
    }

    #[test]
    fn merge_stops_at_the_first_missing_slot() {
        let dir = std::env::temp_dir().join(format!("edge2profile-merge-{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).unwrap();

        // fragments for the square slot only
        let name_payload = named_payload("Square");
        for (part, report_id) in ProfileSlot::Square.report_ids().into_iter().enumerate() {
            let payload = if part == 0 { &name_payload[..] } else { b"tail" };
            fs::write(
                fragment_path(&dir, "dev0", report_id),
                fragment_bytes(report_id, part as u8, payload),
            )
            .unwrap();
        }

        merge(&dir, "dev0", ProfileSlot::Square, &dir).unwrap();
        assert!(dir.join("Square.bin").is_file());

        assert!(merge(&dir, "dev0", ProfileSlot::Cross, &dir).is_err());

        // the three fragments plus the square output, nothing for the
        // cross or circle slots
        let entries = fs::read_dir(&dir).unwrap().count();
        assert_eq!(entries, 4);

        fs::remove_dir_all(&dir).ok();
    }
}
