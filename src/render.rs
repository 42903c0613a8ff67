use std::path::Path;

use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

use crate::coordinate_mapping::CropRegion;
use crate::error::{StripError, StripResult};

/// A rendered page raster along with the geometry it was produced from.
pub struct PageRaster {
    pub image: DynamicImage,
    /// Page size in document units (PDF points)
    pub page_width: f32,
    pub page_height: f32,
    pub zoom: f32,
}

/// Handles page rasterization using pdfium-render.
///
/// The document is opened per operation; nothing is cached between calls.
pub struct PageRenderer {
    pdfium: Pdfium,
}

impl PageRenderer {
    pub fn new() -> StripResult<Self> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_system_library()
                .map_err(|e| StripError::render_with_source("failed to bind pdfium library", e))?,
        );
        Ok(Self { pdfium })
    }

    /// Number of pages in the document.
    pub fn page_count(&self, pdf_path: &Path) -> StripResult<u32> {
        let document = self.load(pdf_path)?;
        Ok(document.pages().len() as u32)
    }

    /// Render one full page (zero-based index) at the given zoom factor.
    pub fn render_page(&self, pdf_path: &Path, page: u32, zoom: f32) -> StripResult<PageRaster> {
        let document = self.load(pdf_path)?;
        let raster = render_page_raster(&document, page, zoom)?;
        debug!(
            "Rendered page {} at zoom {}: {}x{} px",
            page,
            zoom,
            raster.image.width(),
            raster.image.height()
        );
        Ok(raster)
    }

    /// Render a crop region of one page (zero-based index) at the region's
    /// zoom factor. The page is rasterized at zoom, then the region's pixel
    /// bounds are cut out of the raster.
    pub fn render_region(
        &self,
        pdf_path: &Path,
        page: u32,
        region: &CropRegion,
    ) -> StripResult<DynamicImage> {
        let document = self.load(pdf_path)?;
        render_region_raster(&document, page, region)
    }

    /// Open a document once, for callers that loop over pages without
    /// reopening the file per page.
    pub fn open(&self, pdf_path: &Path) -> StripResult<PdfDocument<'_>> {
        self.load(pdf_path)
    }

    fn load(&self, pdf_path: &Path) -> StripResult<PdfDocument<'_>> {
        if !pdf_path.exists() {
            return Err(StripError::file_io(
                pdf_path.to_string_lossy().to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "PDF file not found"),
            ));
        }
        self.pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| {
                StripError::render_with_source(
                    format!("failed to open {}", pdf_path.display()),
                    e,
                )
            })
    }
}

/// Render one full page of an already-open document.
pub fn render_page_raster(
    document: &PdfDocument,
    page: u32,
    zoom: f32,
) -> StripResult<PageRaster> {
    let page_count = document.pages().len() as u32;
    if page >= page_count {
        return Err(StripError::PageOutOfRange { page, page_count });
    }

    let pdf_page = document
        .pages()
        .get(page as u16)
        .map_err(|e| StripError::render_with_source(format!("failed to load page {}", page), e))?;

    let page_width = pdf_page.width().value;
    let page_height = pdf_page.height().value;

    let render_config = PdfRenderConfig::new().scale_page_by_factor(zoom);
    let bitmap = pdf_page
        .render_with_config(&render_config)
        .map_err(|e| StripError::render_with_source(format!("failed to render page {}", page), e))?;

    Ok(PageRaster {
        image: bitmap.as_image(),
        page_width,
        page_height,
        zoom,
    })
}

/// Render a crop region of one page of an already-open document.
pub fn render_region_raster(
    document: &PdfDocument,
    page: u32,
    region: &CropRegion,
) -> StripResult<DynamicImage> {
    let raster = render_page_raster(document, page, region.zoom)?;
    let (x, y, w, h) = region.pixel_bounds(region.zoom, raster.image.width(), raster.image.height());
    if w == 0 || h == 0 {
        return Err(StripError::render(format!(
            "crop region {:?} lies outside page {}",
            region, page
        )));
    }
    Ok(raster.image.crop_imm(x, y, w, h))
}
