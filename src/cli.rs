use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::ExtractionConfig;
#[cfg(feature = "gui")]
use crate::error::StripError;
use crate::extract;
use crate::render::PageRenderer;

/// Inspect a page: report its raster dimensions and save a preview image
/// for manual examination.
pub fn inspect_command(
    pdf_path: PathBuf,
    page: u32,
    zoom: f32,
    output: Option<PathBuf>,
) -> Result<()> {
    info!("🔍 Inspecting page {} of {:?}", page, pdf_path);

    let renderer = PageRenderer::new()?;
    let page_count = renderer.page_count(&pdf_path)?;
    let raster = renderer.render_page(&pdf_path, page, zoom)?;

    let output_path = output.unwrap_or_else(|| {
        let stem = pdf_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        PathBuf::from(format!("{}_page{}.png", stem, page))
    });
    raster.image.save(&output_path)?;

    println!("📄 Document: {} pages", page_count);
    println!(
        "Page {} dimensions: {} x {} px (at zoom {})",
        page,
        raster.image.width(),
        raster.image.height(),
        zoom
    );
    println!(
        "Page size: {:.1} x {:.1} document units",
        raster.page_width, raster.page_height
    );
    println!("Preview saved to: {:?}", output_path);

    Ok(())
}

/// Interactive crop selection on a full page. Prints the chosen region as
/// a config snippet to paste into striplog.toml.
#[cfg(feature = "gui")]
pub fn select_command(pdf_path: PathBuf, page: u32, zoom: f32) -> Result<()> {
    info!("🖱️ Selecting crop region on page {} of {:?}", page, pdf_path);

    let renderer = PageRenderer::new()?;
    let raster = renderer.render_page(&pdf_path, page, zoom)?;
    println!(
        "Page {} dimensions: {} x {} px",
        page,
        raster.image.width(),
        raster.image.height()
    );
    println!("Click twice to define the crop region: two opposite corners, any order");

    let label = format!("Page {} - click to define crop region", page);
    match crate::gui::run_selector(&label, raster, None)? {
        Some(region) => {
            info!(
                "✅ Crop region selected: x {:.1}..{:.1}, y {:.1}..{:.1}",
                region.x_start, region.x_end, region.y_start, region.y_end
            );
            println!("Paste the [crop] section above into striplog.toml, then run:");
            println!("  striplog preview {:?} --page {}", pdf_path, page);
        }
        None => {
            return Err(StripError::SelectionIncomplete.into());
        }
    }

    Ok(())
}

/// Interactive refinement of an existing crop region: the region is
/// re-rendered at its zoom factor and two clicks inside it compose back
/// into document space.
#[cfg(feature = "gui")]
pub fn refine_command(pdf_path: PathBuf, page: u32, config_path: PathBuf) -> Result<()> {
    let config = ExtractionConfig::load_from_file(&config_path)?;
    let base = config.crop;

    info!(
        "🖱️ Refining crop region on page {} of {:?}",
        page, pdf_path
    );
    println!("Current crop region (document space):");
    println!("  X: {:.1} to {:.1}", base.x_start, base.x_end);
    println!("  Y: {:.1} to {:.1}", base.y_start, base.y_end);
    println!("Click twice to refine: two opposite corners, any order");

    let renderer = PageRenderer::new()?;
    let raster = renderer.render_region(&pdf_path, page, &base)?;
    println!(
        "Cropped image size: {} x {} px",
        raster.width(),
        raster.height()
    );

    let page_raster = crate::render::PageRaster {
        image: raster,
        page_width: base.width(),
        page_height: base.height(),
        zoom: base.zoom,
    };

    let label = format!("Page {} - refine crop region", page);
    match crate::gui::run_selector(&label, page_raster, Some(base))? {
        Some(_) => {
            info!("✅ Refined crop region selected");
            println!("Replace the [crop] section in {:?} with the one above", config_path);
        }
        None => {
            return Err(StripError::SelectionIncomplete.into());
        }
    }

    Ok(())
}

#[cfg(not(feature = "gui"))]
pub fn select_command(_pdf_path: PathBuf, _page: u32, _zoom: f32) -> Result<()> {
    Err(anyhow::anyhow!(
        "interactive selection requires the gui feature: rebuild with --features gui"
    ))
}

#[cfg(not(feature = "gui"))]
pub fn refine_command(_pdf_path: PathBuf, _page: u32, _config_path: PathBuf) -> Result<()> {
    Err(anyhow::anyhow!(
        "interactive refinement requires the gui feature: rebuild with --features gui"
    ))
}

/// Render the configured crop region of one page to an image file so the
/// boundaries can be checked without the interactive window.
pub fn preview_command(page: u32, config_path: PathBuf, output: PathBuf) -> Result<()> {
    let config = ExtractionConfig::load_from_file(&config_path)?;

    info!(
        "🔍 Previewing crop region on page {} of {:?}",
        page, config.document.pdf_path
    );

    let renderer = PageRenderer::new()?;
    let strip = renderer.render_region(&config.document.pdf_path, page, &config.crop)?;
    strip.save(&output)?;

    println!(
        "Cropped image size: {} x {} px",
        strip.width(),
        strip.height()
    );
    println!(
        "Region: ({:.1}, {:.1}) to ({:.1}, {:.1})",
        config.crop.x_start, config.crop.y_start, config.crop.x_end, config.crop.y_end
    );
    println!("Preview saved to: {:?}", output);

    Ok(())
}

/// Batch extraction: one depth-named JPEG per data page.
pub fn extract_command(config_path: PathBuf) -> Result<()> {
    let config = ExtractionConfig::load_from_file(&config_path)?;

    let renderer = PageRenderer::new()?;
    let summary = extract::extract_strips(&renderer, &config)?;

    println!("🎉 Extraction Complete!");
    println!("   Images written: {}", summary.written);
    println!("   Output directory: {}", summary.output_dir.display());
    if !summary.collisions.is_empty() {
        println!(
            "   ⚠️ {} filename collision(s): {}",
            summary.collisions.len(),
            summary.collisions.join(", ")
        );
        println!("   Colliding pages overwrote earlier ones; widen the depth span per page to avoid this");
    }

    Ok(())
}

/// Write a default striplog.toml to edit by hand.
pub fn init_command(config_path: PathBuf) -> Result<()> {
    if config_path.exists() {
        return Err(anyhow::anyhow!(
            "refusing to overwrite existing config: {:?}",
            config_path
        ));
    }
    let config = ExtractionConfig::default();
    config.save_to_file(&config_path)?;

    println!("📝 Default config written to: {:?}", config_path);
    println!("   Edit the document, crop and depth sections before extracting");

    Ok(())
}
