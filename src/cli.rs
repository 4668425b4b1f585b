use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nullmedia")]
#[command(author, version, about = "Replace media files with null placeholders of the same shape")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify a media file and print its metadata string
    Identify {
        /// File to identify
        #[arg(required = true)]
        file: PathBuf,

        /// Signature to embed instead of the content hash (6 hex digits)
        #[arg(short, long)]
        signature: Option<String>,

        /// Do not sniff headers of files with missing or unknown extensions
        #[arg(long)]
        no_sniff: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Synthesize a null file from a metadata string
    Shrink {
        /// Metadata string, e.g. 1920x1080x61500x9e107d.mp4
        metadata: String,

        /// Where to write the null file
        output: PathBuf,
    },

    /// Replace a media file in place with its null counterpart
    Replace {
        /// File to replace
        #[arg(required = true)]
        file: PathBuf,

        /// Signature to embed instead of the content hash (6 hex digits)
        #[arg(short, long)]
        signature: Option<String>,
    },

    /// Validate and display a metadata string
    Decode {
        /// Metadata string, e.g. 1920x1080x61500x9e107d.mp4
        metadata: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Synthesize and re-identify a sample of every supported format
    CheckCompat {
        /// Scratch directory for the samples
        dir: PathBuf,
    },

    /// Display version information
    Version,
}
