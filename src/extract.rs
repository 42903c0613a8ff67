use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use tracing::{info, warn};

use crate::config::ExtractionConfig;
use crate::coordinate_mapping::DepthScale;
use crate::error::{StripError, StripResult};
use crate::render::{render_region_raster, PageRenderer};

/// What a finished extraction run produced.
#[derive(Debug)]
pub struct ExtractionSummary {
    pub written: usize,
    /// Filenames that truncated to a name an earlier page already used.
    /// The earlier file is overwritten, matching the naming convention;
    /// the collision is surfaced here and in the log.
    pub collisions: Vec<String>,
    pub output_dir: PathBuf,
}

/// Output filenames for every data page, in page order. Pure planning
/// step; rendering never changes the names.
pub fn plan_file_names(scale: &DepthScale) -> Vec<String> {
    (1..=scale.pages)
        .map(|page| scale.interval(page).file_name())
        .collect()
}

/// Filenames that appear more than once in a plan, in first-collision
/// order. A span below one depth unit truncates adjacent pages to the
/// same name.
pub fn find_collisions(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut collisions = Vec::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            collisions.push(name.clone());
        }
    }
    collisions
}

/// Batch step: render every data page's crop region and write one JPEG
/// per page, named by its depth interval. Pages are processed one at a
/// time; any failure aborts the run.
pub fn extract_strips(
    renderer: &PageRenderer,
    config: &ExtractionConfig,
) -> StripResult<ExtractionSummary> {
    if config.depth.pages == 0 {
        return Err(StripError::configuration("depth.pages must be at least 1"));
    }

    let output_dir = &config.output.directory;
    std::fs::create_dir_all(output_dir)
        .map_err(|e| StripError::file_io(output_dir.to_string_lossy().to_string(), e))?;

    info!(
        "📏 Extracting {} data pages from {:?}",
        config.depth.pages, config.document.pdf_path
    );
    info!(
        "Depth range: {} to {} ({:.2} per page)",
        config.depth.start,
        config.depth.end,
        config.depth.span()
    );

    let names = plan_file_names(&config.depth);
    let collisions = find_collisions(&names);
    for name in &collisions {
        warn!(
            "⚠️ Truncated depth bounds collide on {}: an earlier page's file will be overwritten",
            name
        );
    }

    let document = renderer.open(&config.document.pdf_path)?;
    let mut written = 0;
    for data_page in 1..=config.depth.pages {
        let document_page = config.document_page(data_page);
        let region = config.crop_for_page(data_page);

        let strip = render_region_raster(&document, document_page, &region)?;

        let file_name = &names[(data_page - 1) as usize];
        let path = output_dir.join(file_name);
        write_jpeg(&strip, &path, config.output.jpeg_quality)?;

        info!("💾 Saved: {}", file_name);
        written += 1;
    }

    info!(
        "✅ Extraction complete: {} images saved to {}",
        written,
        output_dir.display()
    );

    Ok(ExtractionSummary {
        written,
        collisions,
        output_dir: output_dir.clone(),
    })
}

/// Encode a raster as JPEG at the given quality.
///
/// The raster is flattened to RGB first; JPEG has no alpha channel.
pub fn write_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> StripResult<()> {
    let file = File::create(path)
        .map_err(|e| StripError::file_io(path.to_string_lossy().to_string(), e))?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality);
    image
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| StripError::image_encoding(path.to_string_lossy().to_string(), e))?;
    Ok(())
}
