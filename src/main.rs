use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use striplog::cli;
use striplog::logging::{init_logging, log_system_info};

#[derive(Parser)]
#[command(
    name = "striplog",
    version,
    about = "Extract depth-labeled strip images from well-log PDF reports"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page and report its raster dimensions
    Inspect {
        /// Path to the well-log PDF report
        pdf: PathBuf,

        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Zoom factor for rasterization
        #[arg(long, default_value_t = 2.0)]
        zoom: f32,

        /// Where to save the preview image (default: <pdf>_page<N>.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Pick a crop region by clicking two corners on a rendered page
    Select {
        /// Path to the well-log PDF report
        pdf: PathBuf,

        /// Zero-based page index (use the first data page)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Zoom factor for rasterization
        #[arg(long, default_value_t = 2.0)]
        zoom: f32,
    },

    /// Tighten the configured crop region by clicking inside its render
    Refine {
        /// Path to the well-log PDF report
        pdf: PathBuf,

        /// Zero-based page index
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Config file holding the [crop] section to refine
        #[arg(long, default_value = "striplog.toml")]
        config: PathBuf,
    },

    /// Render the configured crop region to an image file
    Preview {
        /// Zero-based page index
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Config file holding the document path and [crop] section
        #[arg(long, default_value = "striplog.toml")]
        config: PathBuf,

        /// Where to save the preview image
        #[arg(long, default_value = "crop_preview.png")]
        out: PathBuf,
    },

    /// Extract every data page as a depth-named JPEG
    Extract {
        /// Config file describing the document, crop and depth scale
        #[arg(long, default_value = "striplog.toml")]
        config: PathBuf,
    },

    /// Write a default striplog.toml to edit by hand
    Init {
        /// Where to write the config file
        #[arg(long, default_value = "striplog.toml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    log_system_info();

    let result = match cli.command {
        Commands::Inspect {
            pdf,
            page,
            zoom,
            out,
        } => cli::inspect_command(pdf, page, zoom, out),
        Commands::Select { pdf, page, zoom } => cli::select_command(pdf, page, zoom),
        Commands::Refine { pdf, page, config } => cli::refine_command(pdf, page, config),
        Commands::Preview { page, config, out } => cli::preview_command(page, config, out),
        Commands::Extract { config } => cli::extract_command(config),
        Commands::Init { config } => cli::init_command(config),
    };

    if let Err(error) = &result {
        if let Some(strip_error) = error.downcast_ref::<striplog::error::StripError>() {
            eprintln!("{}", strip_error.user_message());
        }
    }

    result
}
