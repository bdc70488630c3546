use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

/// Name the binary reports in help and version output.
pub const PROGRAM_NAME: &str = "longpath-check";

pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .about("Checks that filesystem operations behave the same on short and long paths.")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("temp-dir")
                .long("temp-dir")
                .value_name("DIR")
                .help("Base directory for the short and long trees (default: system temp dir).")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("case")
                .long("case")
                .value_name("NAME")
                .help("Run only the named case; may be repeated.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("Print the case names and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-tree")
                .long("keep-tree")
                .help("Leave the short and long trees on disk after the run.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip-preflight")
                .long("skip-preflight")
                .help("Skip the OS version and LongPathsEnabled checks.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .value_name("N")
                .help("Length the long root must exceed (default: 260).")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity; repeat for trace output.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log warnings and errors.")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
}
