use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::coordinate_mapping::{CropRegion, DepthScale};

/// Everything the extraction run needs, made explicit instead of the
/// edit-the-source constants the workflow started from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub document: DocumentConfig,
    pub crop: CropRegion,
    pub depth: DepthScale,
    pub output: OutputConfig,
    /// Pages whose header banner eats into the normal strip area
    #[serde(default)]
    pub header_overrides: Vec<HeaderOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Path to the well-log PDF report
    pub pdf_path: PathBuf,

    /// Zero-based document page of the first data page. Page 0 of a log
    /// print is typically a title page with no depth data.
    pub first_data_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the depth-named JPEGs are written to
    pub directory: PathBuf,

    /// JPEG encoding quality (1-100)
    pub jpeg_quality: u8,
}

/// Replacement y bounds for one data page (1-indexed among data pages).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeaderOverride {
    pub page: u32,
    pub y_start: f32,
    pub y_end: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            document: DocumentConfig {
                pdf_path: PathBuf::from("document.pdf"),
                first_data_page: 1,
            },
            crop: CropRegion {
                x_start: 100.0,
                x_end: 1500.0,
                y_start: 50.0,
                y_end: 2800.0,
                zoom: 2.0,
            },
            depth: DepthScale {
                start: 2990.0,
                end: 8506.0,
                pages: 196,
            },
            output: OutputConfig {
                directory: PathBuf::from("extracted_strips"),
                jpeg_quality: 95,
            },
            header_overrides: vec![
                // first data page carries the column header banner,
                // second-to-last repeats it at the bottom
                HeaderOverride {
                    page: 1,
                    y_start: 50.0,
                    y_end: 2600.0,
                },
                HeaderOverride {
                    page: 196,
                    y_start: 250.0,
                    y_end: 2800.0,
                },
            ],
        }
    }
}

impl ExtractionConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow!("Failed to read config file: {}", e))?;

        let config: ExtractionConfig = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| anyhow!("Failed to write config file: {}", e))?;

        Ok(())
    }

    /// Y bounds to use for a given data page (1-indexed), honoring any
    /// header override.
    pub fn y_bounds_for_page(&self, data_page: u32) -> (f32, f32) {
        self.header_overrides
            .iter()
            .find(|o| o.page == data_page)
            .map(|o| (o.y_start, o.y_end))
            .unwrap_or((self.crop.y_start, self.crop.y_end))
    }

    /// Crop region for a given data page (1-indexed), honoring any header
    /// override.
    pub fn crop_for_page(&self, data_page: u32) -> CropRegion {
        let (y_start, y_end) = self.y_bounds_for_page(data_page);
        self.crop.with_y_bounds(y_start, y_end)
    }

    /// Zero-based document page index for a data page (1-indexed).
    pub fn document_page(&self, data_page: u32) -> u32 {
        self.document.first_data_page + data_page - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.depth.pages, 196);
        assert_eq!(config.output.jpeg_quality, 95);
        assert_eq!(config.document.first_data_page, 1);
        assert_eq!(config.header_overrides.len(), 2);
    }

    #[test]
    fn test_config_round_trip() {
        let config = ExtractionConfig::default();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("striplog.toml");

        config.save_to_file(&config_path).unwrap();

        let loaded = ExtractionConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.depth.pages, 196);
        assert_eq!(loaded.crop.zoom, 2.0);
        assert_eq!(loaded.header_overrides.len(), 2);
    }

    #[test]
    fn test_header_override_replaces_y_bounds() {
        let config = ExtractionConfig::default();

        // normal page keeps the configured crop
        let normal = config.crop_for_page(100);
        assert_eq!(normal.y_start, config.crop.y_start);
        assert_eq!(normal.y_end, config.crop.y_end);
        assert_eq!(normal.x_start, config.crop.x_start);

        // first data page gets a shortened strip
        let first = config.crop_for_page(1);
        assert_eq!(first.y_start, 50.0);
        assert_eq!(first.y_end, 2600.0);

        // x bounds and zoom are untouched by the override
        assert_eq!(first.x_start, config.crop.x_start);
        assert_eq!(first.zoom, config.crop.zoom);
    }

    #[test]
    fn test_document_page_offsets_past_title_page() {
        let config = ExtractionConfig::default();
        assert_eq!(config.document_page(1), 1);
        assert_eq!(config.document_page(196), 196);

        let mut shifted = config.clone();
        shifted.document.first_data_page = 3;
        assert_eq!(shifted.document_page(1), 3);
    }

    #[test]
    fn test_crop_snippet_parses_back() {
        let config = ExtractionConfig::default();
        let snippet = config.crop.toml_snippet();

        #[derive(Deserialize)]
        struct Wrapper {
            crop: CropRegion,
        }
        let parsed: Wrapper = toml::from_str(&snippet).unwrap();
        assert_eq!(parsed.crop, config.crop);
    }
}
