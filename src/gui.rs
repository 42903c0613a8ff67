use std::sync::{Arc, Mutex};

use eframe::egui::{self, Color32, ColorImage, Pos2, Rect, Sense, Stroke, TextureHandle};
use eframe::NativeOptions;
use tracing::info;

use crate::coordinate_mapping::{ClickPoint, CropRegion};
use crate::error::{StripError, StripResult};
use crate::render::PageRaster;
use crate::selection::{CornerSelection, SelectionState};

/// Interactive two-click crop selector window.
///
/// Shows the rendered page, collects two corner clicks through the
/// selection state machine, and reports the normalized crop region.
/// Closing the window before the second click abandons the selection.
struct SelectorApp {
    page_label: String,
    pending_image: Option<ColorImage>,
    texture: Option<TextureHandle>,
    raster_size: (u32, u32),
    zoom: f32,
    /// Present when refining: the region the raster was cropped from,
    /// so clicks compose back through its origin offset.
    base: Option<CropRegion>,
    selection: CornerSelection,
    result: Arc<Mutex<Option<CropRegion>>>,
}

impl SelectorApp {
    fn instruction(&self) -> &'static str {
        match self.selection.state() {
            SelectionState::AwaitingFirstClick => "Click the first corner of the strip area",
            SelectionState::AwaitingSecondClick { .. } => "Now click the opposite corner",
            SelectionState::Complete { .. } => "Region selected - close the window to continue",
        }
    }

    fn handle_click(&mut self, click_pos: Pos2, image_rect: Rect, scale: f32) {
        // Scale the window position back to raster pixels. Clicks are
        // captured as integer pixels, same as the raster itself.
        let relative = click_pos - image_rect.min;
        let px = (relative.x / scale).round().clamp(0.0, (self.raster_size.0 - 1) as f32);
        let py = (relative.y / scale).round().clamp(0.0, (self.raster_size.1 - 1) as f32);
        let point = ClickPoint::new(px as u32, py as u32);

        let state = self.selection.click(point);
        match state {
            SelectionState::AwaitingSecondClick { first } => {
                info!("First corner: ({}, {})", first.x, first.y);
            }
            SelectionState::Complete { first, second } => {
                info!("Second corner: ({}, {})", second.x, second.y);
                let region = match &self.base {
                    Some(base) => base.refined(first, second),
                    None => CropRegion::from_clicks(first, second, self.zoom),
                };
                // the printed snippet is the handoff into striplog.toml
                println!("\n{}", region.toml_snippet());
                *self.result.lock().unwrap() = Some(region);
            }
            SelectionState::AwaitingFirstClick => {}
        }
    }

    fn draw_selection(&self, ui: &egui::Ui, image_rect: Rect, scale: f32) {
        let painter = ui.painter();
        let to_display = |p: ClickPoint| -> Pos2 {
            image_rect.min + egui::vec2(p.x as f32 * scale, p.y as f32 * scale)
        };

        for point in self.selection.points() {
            painter.circle_filled(to_display(point), 5.0, Color32::RED);
        }

        if let Some((first, second)) = self.selection.corners() {
            let rect = Rect::from_two_pos(to_display(first), to_display(second));
            painter.rect_stroke(rect, egui::Rounding::default(), Stroke::new(2.0, Color32::RED));
        }
    }
}

impl eframe::App for SelectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("📏 {}", self.page_label));
            ui.horizontal(|ui| {
                ui.label(self.instruction());
                if ui.button("Reset selection").clicked() {
                    self.selection.reset();
                    *self.result.lock().unwrap() = None;
                }
            });
            ui.separator();

            // Upload the raster once, on the first frame
            if self.texture.is_none() {
                if let Some(image) = self.pending_image.take() {
                    self.texture = Some(ctx.load_texture(
                        "selector_page",
                        image,
                        egui::TextureOptions::default(),
                    ));
                }
            }

            // handle is refcounted; clone it so click handling can
            // borrow the app mutably
            if let Some(texture) = self.texture.clone() {
                let available_width = ui.available_width();
                let available_height = ui.available_height();
                let texture_size = texture.size_vec2();
                let scale = (available_width / texture_size.x)
                    .min(available_height / texture_size.y)
                    .min(1.0);
                let display_size = texture_size * scale;

                let response = ui.add(
                    egui::Image::from_texture(&texture)
                        .fit_to_exact_size(display_size)
                        .sense(Sense::click()),
                );

                if response.clicked() {
                    if let Some(click_pos) = response.interact_pointer_pos() {
                        self.handle_click(click_pos, response.rect, scale);
                    }
                }

                self.draw_selection(ui, response.rect, scale);
            }
        });
    }
}

/// Show the selector window for a rendered page and block until the user
/// closes it. Returns the selected region, or `None` if the window was
/// closed with fewer than two clicks.
///
/// Pass `base` when the raster is a render of an existing crop region:
/// the clicks then compose back through the region's origin.
pub fn run_selector(
    page_label: &str,
    raster: PageRaster,
    base: Option<CropRegion>,
) -> StripResult<Option<CropRegion>> {
    let rgba = raster.image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = ColorImage::from_rgba_unmultiplied(size, &rgba);

    let result = Arc::new(Mutex::new(None));
    let app = SelectorApp {
        page_label: page_label.to_string(),
        pending_image: Some(color_image),
        texture: None,
        raster_size: (rgba.width(), rgba.height()),
        zoom: raster.zoom,
        base,
        selection: CornerSelection::new(),
        result: Arc::clone(&result),
    };

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 1300.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "striplog",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| StripError::render(format!("selector window failed: {}", e)))?;

    let region = result.lock().unwrap().take();
    Ok(region)
}
