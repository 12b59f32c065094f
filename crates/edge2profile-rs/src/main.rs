use clap::{Parser, ValueEnum};
use edge2profile_core::ProfileSlot;
use env_logger::Env;
use log::*;

use std::io::Write;
use std::path::PathBuf;

use crate::{inspect::inspect, merge::merge};

mod inspect;
mod merge;
mod reporter;

#[derive(Parser, Debug)]
enum Command {
    /// Merge dumped report fragments into profile blobs on disk
    #[command(arg_required_else_help = true)]
    Merge {
        /// Directory containing the dumped report fragments
        path: PathBuf,

        /// Host identifier used in the fragment file names
        hid: String,

        /// Merge a single profile slot instead of all three
        #[clap(short, long, value_enum)]
        profile: Option<ProfileSlot>,

        /// Directory to write the merged profiles to
        #[clap(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Print the profile names embedded in dumped report fragments
    #[command(arg_required_else_help = true)]
    Inspect {
        /// Directory containing the dumped report fragments
        path: PathBuf,

        /// Host identifier used in the fragment file names
        hid: String,

        /// Inspect a single profile slot instead of all three
        #[clap(short, long, value_enum)]
        profile: Option<ProfileSlot>,
    },
}

#[derive(Parser, Debug, Default)]
#[clap(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Set the logging verbosity
    #[clap(short, long, value_enum, global = true, default_value_t = LogLevel::Info)]
    verbose: LogLevel,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}

fn selected_slots(profile: Option<ProfileSlot>) -> Vec<ProfileSlot> {
    match profile {
        Some(slot) => vec![slot],
        None => ProfileSlot::ALL.to_vec(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default())
        .filter_level(cli.verbose.into())
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let level = record.level();
            if level == Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
        })
        .init();

    let command = match cli.command {
        Some(command) => command,
        None => return Ok(()),
    };

    match command {
        Command::Merge {
            path,
            hid,
            profile,
            output,
        } => {
            for slot in selected_slots(profile) {
                merge(&path, &hid, slot, &output)?;
            }
            Ok(())
        }
        Command::Inspect { path, hid, profile } => {
            for slot in selected_slots(profile) {
                inspect(&path, &hid, slot)?;
            }
            Ok(())
        }
    }
}
