use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Convert two-column dialogue PDFs into line-numbered transcripts.
#[derive(Debug, Parser)]
#[command(name = "pdf2transcript", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a dialogue PDF into a numbered transcript
    Convert {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file path
        #[arg(
            short,
            long,
            value_name = "FILE",
            default_value = "transcript_with_lines.txt"
        )]
        output: PathBuf,
    },

    /// Split a top-level JSON array into numbered per-element files
    Split {
        /// Path to the JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory for the element files
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_convert_subcommand_with_file() {
        let cli = Cli::parse_from(["pdf2transcript", "convert", "interview.pdf"]);
        match cli.command {
            Commands::Convert {
                ref file,
                ref output,
            } => {
                assert_eq!(file, &PathBuf::from("interview.pdf"));
                assert_eq!(output, &PathBuf::from("transcript_with_lines.txt"));
            }
            _ => panic!("expected Convert subcommand"),
        }
    }

    #[test]
    fn parse_convert_with_output() {
        let cli = Cli::parse_from([
            "pdf2transcript",
            "convert",
            "interview.pdf",
            "-o",
            "out.txt",
        ]);
        match cli.command {
            Commands::Convert { ref output, .. } => {
                assert_eq!(output, &PathBuf::from("out.txt"));
            }
            _ => panic!("expected Convert subcommand"),
        }
    }

    #[test]
    fn parse_convert_with_long_output_flag() {
        let cli = Cli::parse_from([
            "pdf2transcript",
            "convert",
            "interview.pdf",
            "--output",
            "dir/out.txt",
        ]);
        match cli.command {
            Commands::Convert { ref output, .. } => {
                assert_eq!(output, &PathBuf::from("dir/out.txt"));
            }
            _ => panic!("expected Convert subcommand"),
        }
    }

    #[test]
    fn parse_split_subcommand() {
        let cli = Cli::parse_from(["pdf2transcript", "split", "outline.json", "-o", "parts"]);
        match cli.command {
            Commands::Split {
                ref file,
                ref output,
            } => {
                assert_eq!(file, &PathBuf::from("outline.json"));
                assert_eq!(output, &PathBuf::from("parts"));
            }
            _ => panic!("expected Split subcommand"),
        }
    }

    #[test]
    fn split_requires_output_dir() {
        let result = Cli::try_parse_from(["pdf2transcript", "split", "outline.json"]);
        assert!(result.is_err());
    }
}
