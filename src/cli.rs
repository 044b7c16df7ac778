use crate::links::MapProvider;
use crate::ocr::OcrEngine;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parcel-address")]
#[command(about = "Extract UK/NI delivery addresses from parcel label OCR text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (per-line decisions, OCR commands)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// OCR engine (overrides config)
    #[arg(long, global = true)]
    pub ocr_engine: Option<OcrEngine>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract an address from OCR text (file or stdin)
    Extract {
        /// Text file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Print the full extraction result as JSON
        #[arg(long)]
        json: bool,

        /// Also print map links
        #[arg(long)]
        links: bool,

        /// Maximum address lines kept before the postcode
        #[arg(long)]
        max_lines: Option<usize>,

        /// Maximum lines inspected above the postcode
        #[arg(long)]
        max_inspect: Option<usize>,
    },

    /// OCR a folder of label photos and extract addresses
    Scan {
        /// Photo folder
        #[arg(required = true)]
        folder: PathBuf,

        /// Output JSON file (default: FOLDER/addresses.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scan subfolders too
        #[arg(short = 'r', long)]
        recursive: bool,

        /// Reuse cached OCR text for unchanged images
        #[arg(long)]
        use_cache: bool,

        /// OCR language (overrides config, e.g. eng)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Review and edit scanned addresses interactively
    Review {
        /// Scan result JSON file
        #[arg(required = true)]
        input: PathBuf,

        /// Output file (overwrites input when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Map service for the printed link
        #[arg(long)]
        provider: Option<MapProvider>,
    },

    /// Print map links for an address
    Links {
        /// Address text
        #[arg(required = true)]
        address: String,

        /// Only this map service (all when omitted)
        #[arg(long)]
        provider: Option<MapProvider>,
    },

    /// Show or edit settings
    Config {
        /// Set the default OCR engine
        #[arg(long)]
        set_ocr_engine: Option<OcrEngine>,

        /// Set the default map service
        #[arg(long)]
        set_map_provider: Option<MapProvider>,

        /// Set the OCR language
        #[arg(long)]
        set_lang: Option<String>,

        /// Show settings
        #[arg(long)]
        show: bool,
    },

    /// OCR cache management
    Cache {
        /// Delete the cache
        #[arg(long)]
        clear: bool,

        /// Target folder (current directory when omitted)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// Show cache info
        #[arg(long)]
        info: bool,
    },
}
