use crate::report::ReportFormat;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dwfbind")]
#[command(
    about = "Header-driven bindings for the Digilent WaveForms dwf library",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a dwf.h header and emit the function signature artifact
    Generate {
        /// Header file to parse
        header: PathBuf,

        /// Library version the header ships with, e.g. 3.14.3
        #[arg(long = "version")]
        library_version: Option<String>,

        /// Where to write the artifact
        #[arg(short, long, default_value = "dwf_function_signatures.toml")]
        output: PathBuf,
    },

    /// Rank the type descriptors used in function signatures
    Census {
        /// Signature artifact (defaults to the embedded one)
        #[arg(long)]
        artifact: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Count active and obsolete functions per API category
    Summary {
        /// Signature artifact (defaults to the embedded one)
        #[arg(long)]
        artifact: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Cross-check header functions against a reference manual function list
    CheckDocs {
        /// Function list extracted from the reference manual
        list: PathBuf,

        /// Signature artifact (defaults to the embedded one)
        #[arg(long)]
        artifact: Option<PathBuf>,
    },

    /// Load the native library and print its version
    Version {
        /// Path of the native library
        #[arg(long, env = "DWF_LIBRARY_PATH")]
        library: Option<PathBuf>,
    },

    /// Initialize a .dwfbind.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_generate_command() {
        let cli = Cli::parse_from([
            "dwfbind",
            "generate",
            "include/dwf.h",
            "--version",
            "3.14.3",
            "-o",
            "out.toml",
        ]);

        match cli.command {
            Commands::Generate {
                header,
                library_version,
                output,
            } => {
                assert_eq!(header, PathBuf::from("include/dwf.h"));
                assert_eq!(library_version.as_deref(), Some("3.14.3"));
                assert_eq!(output, PathBuf::from("out.toml"));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["dwfbind", "generate", "dwf.h"]);
        match cli.command {
            Commands::Generate {
                library_version,
                output,
                ..
            } => {
                assert_eq!(library_version, None);
                assert_eq!(output, PathBuf::from("dwf_function_signatures.toml"));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_verbose_is_global_and_counted() {
        let cli = Cli::parse_from(["dwfbind", "summary", "-vv", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Summary { artifact, format } => {
                assert_eq!(artifact, None);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("Expected Summary command"),
        }
    }

    #[test]
    fn test_cli_parsing_check_docs_command() {
        let cli = Cli::parse_from([
            "dwfbind",
            "check-docs",
            "functions.txt",
            "--artifact",
            "sigs.toml",
        ]);
        match cli.command {
            Commands::CheckDocs { list, artifact } => {
                assert_eq!(list, PathBuf::from("functions.txt"));
                assert_eq!(artifact, Some(PathBuf::from("sigs.toml")));
            }
            _ => panic!("Expected CheckDocs command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::parse_from(["dwfbind", "init", "--force"]);
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(ReportFormat::from(OutputFormat::Json), ReportFormat::Json);
        assert_eq!(
            ReportFormat::from(OutputFormat::Terminal),
            ReportFormat::Terminal
        );
    }
}
