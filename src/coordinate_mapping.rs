use serde::{Deserialize, Serialize};

/// A single click captured on a rendered page, in raster pixels.
///
/// Pixel coordinates are integers, so mapping back to document space is
/// only accurate to within ±1/zoom document units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickPoint {
    pub x: u32,
    pub y: u32,
}

impl ClickPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Map this raster pixel back to document space for a page rendered
    /// at `zoom`.
    pub fn to_document(self, zoom: f32) -> (f32, f32) {
        (self.x as f32 / zoom, self.y as f32 / zoom)
    }
}

/// Crop rectangle in document coordinate space.
///
/// Invariant: x_start <= x_end and y_start <= y_end. The constructors
/// normalize click order with min/max, so the two corners may be supplied
/// in any order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x_start: f32,
    pub x_end: f32,
    pub y_start: f32,
    pub y_end: f32,
    /// Zoom factor the region was derived at, carried along so a refine
    /// pass renders the sub-crop the same way.
    pub zoom: f32,
}

impl CropRegion {
    /// Build a normalized region from two clicks on a full page rendered
    /// at `zoom`.
    pub fn from_clicks(a: ClickPoint, b: ClickPoint, zoom: f32) -> Self {
        let (x1, y1) = a.to_document(zoom);
        let (x2, y2) = b.to_document(zoom);
        Self {
            x_start: x1.min(x2),
            x_end: x1.max(x2),
            y_start: y1.min(y2),
            y_end: y1.max(y2),
            zoom,
        }
    }

    /// Build a normalized region from two clicks on a rendering of *this*
    /// region. The sub-crop was rendered starting at this region's origin,
    /// so the mapping composes: document = origin + click / zoom.
    pub fn refined(&self, a: ClickPoint, b: ClickPoint) -> Self {
        let x1 = self.x_start + a.x as f32 / self.zoom;
        let y1 = self.y_start + a.y as f32 / self.zoom;
        let x2 = self.x_start + b.x as f32 / self.zoom;
        let y2 = self.y_start + b.y as f32 / self.zoom;
        Self {
            x_start: x1.min(x2),
            x_end: x1.max(x2),
            y_start: y1.min(y2),
            y_end: y1.max(y2),
            zoom: self.zoom,
        }
    }

    /// Same region with the y bounds replaced, used for pages whose header
    /// banner eats into the normal strip area.
    pub fn with_y_bounds(&self, y_start: f32, y_end: f32) -> Self {
        Self {
            y_start: y_start.min(y_end),
            y_end: y_start.max(y_end),
            ..*self
        }
    }

    pub fn width(&self) -> f32 {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> f32 {
        self.y_end - self.y_start
    }

    /// Pixel bounds (x, y, w, h) of this region on a raster rendered at
    /// `zoom`, clamped to the raster dimensions.
    pub fn pixel_bounds(&self, zoom: f32, raster_w: u32, raster_h: u32) -> (u32, u32, u32, u32) {
        let x = ((self.x_start * zoom).round().max(0.0) as u32).min(raster_w);
        let y = ((self.y_start * zoom).round().max(0.0) as u32).min(raster_h);
        let w = ((self.width() * zoom).round() as u32).min(raster_w - x);
        let h = ((self.height() * zoom).round() as u32).min(raster_h - y);
        (x, y, w, h)
    }

    /// Printable config snippet, the copy-paste handoff into the next run.
    pub fn toml_snippet(&self) -> String {
        format!(
            "[crop]\nx_start = {:.1}\nx_end = {:.1}\ny_start = {:.1}\ny_end = {:.1}\nzoom = {:.1}\n",
            self.x_start, self.x_end, self.y_start, self.y_end, self.zoom
        )
    }
}

/// Linear page-to-depth scale for a log print.
///
/// Assumes every data page spans an equal physical depth interval. Whether
/// real log prints always satisfy this is unverified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthScale {
    /// Shallowest depth covered by the log (e.g. feet)
    pub start: f64,
    /// Deepest depth covered by the log
    pub end: f64,
    /// Number of data-bearing pages the range is spread across
    pub pages: u32,
}

impl DepthScale {
    /// Depth covered by a single page.
    pub fn span(&self) -> f64 {
        (self.end - self.start) / self.pages as f64
    }

    /// Depth interval assigned to data page `page` (1-indexed).
    pub fn interval(&self, page: u32) -> DepthInterval {
        let span = self.span();
        DepthInterval {
            from: self.start + (page - 1) as f64 * span,
            to: self.start + page as f64 * span,
        }
    }
}

/// The physical measurement range one page of the log represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthInterval {
    pub from: f64,
    pub to: f64,
}

impl DepthInterval {
    /// Output filename for this interval. Both bounds are truncated to
    /// integers, so adjacent pages can collide on the same name when the
    /// per-page span is below one depth unit.
    pub fn file_name(&self) -> String {
        format!("{}-{}.jpg", self.from as i64, self.to as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_document_round_trip() {
        for zoom in [1.0_f32, 2.0, 3.5] {
            for (px, py) in [(0u32, 0u32), (300, 100), (1499, 2799)] {
                let (dx, dy) = ClickPoint::new(px, py).to_document(zoom);
                assert!((dx * zoom - px as f32).abs() <= 1.0);
                assert!((dy * zoom - py as f32).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_region_normalization_order_independence() {
        let a = ClickPoint::new(300, 100);
        let b = ClickPoint::new(50, 400);
        let forward = CropRegion::from_clicks(a, b, 2.0);
        let reverse = CropRegion::from_clicks(b, a, 2.0);
        assert_eq!(forward, reverse);
        assert!(forward.x_start <= forward.x_end);
        assert!(forward.y_start <= forward.y_end);
    }

    #[test]
    fn test_region_from_clicks_concrete() {
        // ((300,100),(50,400)) at zoom 2.0 -> (25.0, 150.0, 50.0, 200.0)
        let region = CropRegion::from_clicks(
            ClickPoint::new(300, 100),
            ClickPoint::new(50, 400),
            2.0,
        );
        assert_eq!(region.x_start, 25.0);
        assert_eq!(region.x_end, 150.0);
        assert_eq!(region.y_start, 50.0);
        assert_eq!(region.y_end, 200.0);
    }

    #[test]
    fn test_refined_composes_offset() {
        let base = CropRegion {
            x_start: 121.0,
            x_end: 377.0,
            y_start: 0.5,
            y_end: 1222.0,
            zoom: 2.0,
        };
        let refined = base.refined(ClickPoint::new(10, 20), ClickPoint::new(110, 220));
        assert_eq!(refined.x_start, 121.0 + 5.0);
        assert_eq!(refined.y_start, 0.5 + 10.0);
        assert_eq!(refined.x_end, 121.0 + 55.0);
        assert_eq!(refined.y_end, 0.5 + 110.0);
        assert_eq!(refined.zoom, 2.0);

        // corner order doesn't matter here either
        let reverse = base.refined(ClickPoint::new(110, 220), ClickPoint::new(10, 20));
        assert_eq!(refined, reverse);
    }

    #[test]
    fn test_pixel_bounds_clamped_to_raster() {
        let region = CropRegion {
            x_start: 100.0,
            x_end: 1500.0,
            y_start: 50.0,
            y_end: 2800.0,
            zoom: 2.0,
        };
        let (x, y, w, h) = region.pixel_bounds(2.0, 1700, 2400);
        assert_eq!((x, y), (200, 100));
        assert_eq!(w, 1500); // 2800 wide, clamped to raster
        assert_eq!(h, 2300);
    }

    #[test]
    fn test_depth_intervals_exact_and_contiguous() {
        let scale = DepthScale {
            start: 2990.0,
            end: 8506.0,
            pages: 196,
        };
        let span = scale.span();
        assert!((span - 28.142857142857142).abs() < 1e-9);

        for page in 1..=scale.pages {
            let interval = scale.interval(page);
            assert!((interval.from - (scale.start + (page - 1) as f64 * span)).abs() < 1e-9);
            assert!((interval.to - (scale.start + page as f64 * span)).abs() < 1e-9);
        }

        // consecutive pages are contiguous
        for page in 1..scale.pages {
            let a = scale.interval(page);
            let b = scale.interval(page + 1);
            assert!((a.to - b.from).abs() < 1e-9);
        }
    }

    #[test]
    fn test_depth_interval_file_name() {
        let scale = DepthScale {
            start: 2990.0,
            end: 8506.0,
            pages: 196,
        };
        let first = scale.interval(1);
        assert!((first.from - 2990.0).abs() < 1e-9);
        assert!((first.to - 3018.142857142857).abs() < 1e-9);
        assert_eq!(first.file_name(), "2990-3018.jpg");

        let last = scale.interval(196);
        assert_eq!(last.file_name(), "8477-8506.jpg");
    }

    #[test]
    fn test_truncated_file_names_can_collide() {
        // A span below one depth unit truncates adjacent pages to the
        // same name; the extractor is responsible for flagging this.
        let scale = DepthScale {
            start: 100.0,
            end: 101.0,
            pages: 4,
        };
        assert_eq!(scale.interval(1).file_name(), "100-100.jpg");
        assert_eq!(scale.interval(2).file_name(), "100-100.jpg");
    }
}
