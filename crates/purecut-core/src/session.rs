//! Editing session: owner of the canonical source buffer.
//!
//! The session keeps the only persistent copy of the image. Previews are
//! rendered from it on demand and never written back. Destructive
//! operations (erasers, quarter turns, flips, background removal) replace
//! the source, reset the preview settings and advance the source
//! generation.

use tracing::{info, instrument, warn};

use crate::buffer::PixelBuffer;
use crate::compositor::render;
use crate::decode::decode_image;
use crate::encode::encode_png;
use crate::error::EditError;
use crate::eraser::{self, EraseReport};
use crate::gateway::{GatewayError, GatewayTicket};
use crate::transform;
use crate::{AdjustmentParameters, FilterType, Tolerance};

/// State of one image being edited.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    source: Option<PixelBuffer>,
    params: AdjustmentParameters,
    filter: FilterType,
    tolerance: Tolerance,
    generation: u32,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session image with an already decoded buffer.
    pub fn load(&mut self, buffer: PixelBuffer) {
        info!(width = buffer.width, height = buffer.height, "image loaded");
        self.source = Some(buffer);
        self.commit();
    }

    /// Decode uploaded file bytes and load them.
    ///
    /// On failure the current image is kept.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), EditError> {
        let buffer = decode_image(bytes)?;
        self.load(buffer);
        Ok(())
    }

    /// Drop the image and reset every setting except the tolerance.
    pub fn clear(&mut self) {
        info!("session cleared");
        self.source = None;
        self.commit();
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// The canonical source buffer, if an image is loaded.
    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    /// Counter advanced every time the source is replaced. Wraps on overflow.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn params(&self) -> &AdjustmentParameters {
        &self.params
    }

    pub fn set_params(&mut self, params: AdjustmentParameters) {
        self.params = params;
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn set_filter(&mut self, filter: FilterType) {
        self.filter = filter;
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
    }

    /// Return adjustments and preset to identity without touching the source.
    pub fn reset_adjustments(&mut self) {
        self.params = AdjustmentParameters::default();
        self.filter = FilterType::None;
    }

    /// Advance the preview rotation by a quarter turn, wrapping at 360.
    pub fn rotate_preview_clockwise(&mut self) {
        self.params.rotation_degrees = (self.params.normalized_rotation() + 90) % 360;
    }

    /// Render the preview for the current settings.
    pub fn render_preview(&self) -> Result<PixelBuffer, EditError> {
        let source = self.require_source()?;
        Ok(render(source, &self.params, self.filter))
    }

    /// Encode the current preview as PNG for download.
    #[instrument(skip_all)]
    pub fn export_png(&self) -> Result<Vec<u8>, EditError> {
        let preview = self.render_preview()?;
        let png = encode_png(&preview)?;
        info!(bytes = png.len(), "exported PNG");
        Ok(png)
    }

    /// Encode the unadjusted source, e.g. to hand to the removal service.
    pub fn source_png(&self) -> Result<Vec<u8>, EditError> {
        Ok(encode_png(self.require_source()?)?)
    }

    /// Magic-wand erase at `(x, y)` with the session tolerance.
    ///
    /// An erase that removes nothing leaves the settings untouched.
    pub fn erase_region(&mut self, x: i64, y: i64) -> Result<EraseReport, EditError> {
        let tolerance = self.tolerance;
        let source = self.require_source_mut()?;
        let report = eraser::erase_region(source, x, y, tolerance)?;
        if !report.is_noop() {
            info!(erased = report.erased, "magic wand applied");
            self.commit();
        }
        Ok(report)
    }

    /// Remove every pixel close to the color under `(x, y)`.
    pub fn erase_color_at(&mut self, x: i64, y: i64) -> Result<EraseReport, EditError> {
        let tolerance = self.tolerance;
        let source = self.require_source_mut()?;
        let report = eraser::erase_color_at(source, x, y, tolerance)?;
        if !report.is_noop() {
            info!(erased = report.erased, "color range removed");
            self.commit();
        }
        Ok(report)
    }

    /// Remove every pixel close to `target`.
    pub fn erase_color(&mut self, target: [u8; 3]) -> Result<EraseReport, EditError> {
        let tolerance = self.tolerance;
        let source = self.require_source_mut()?;
        let report = eraser::erase_color_range(source, target, tolerance);
        if !report.is_noop() {
            info!(erased = report.erased, "color range removed");
            self.commit();
        }
        Ok(report)
    }

    pub fn rotate90(&mut self) -> Result<(), EditError> {
        self.replace_with("rotate90", transform::rotate90)
    }

    pub fn flip_horizontal(&mut self) -> Result<(), EditError> {
        self.replace_with("flip_horizontal", transform::flip_horizontal)
    }

    pub fn flip_vertical(&mut self) -> Result<(), EditError> {
        self.replace_with("flip_vertical", transform::flip_vertical)
    }

    /// Record that a background-removal call is starting for the current
    /// source.
    pub fn begin_background_removal(&self) -> Result<GatewayTicket, EditError> {
        self.require_source()?;
        Ok(GatewayTicket::new(self.generation))
    }

    /// Accept the outcome of a background-removal call.
    ///
    /// # Errors
    ///
    /// - `StaleGatewayResult` if the source was replaced after `ticket` was
    ///   issued
    /// - `GatewayFailure` if the service failed
    ///
    /// In both cases the session is left exactly as it was.
    pub fn complete_background_removal(
        &mut self,
        ticket: GatewayTicket,
        result: Result<PixelBuffer, GatewayError>,
    ) -> Result<(), EditError> {
        if ticket.generation() != self.generation {
            warn!(
                ticket = ticket.generation(),
                current = self.generation,
                "dropping stale background-removal result"
            );
            return Err(EditError::StaleGatewayResult {
                ticket: ticket.generation(),
                current: self.generation,
            });
        }

        let buffer = result.inspect_err(|e| warn!(error = %e, "background removal failed"))?;
        info!(
            width = buffer.width,
            height = buffer.height,
            "background removal applied"
        );
        self.source = Some(buffer);
        self.commit();
        Ok(())
    }

    fn replace_with(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&PixelBuffer) -> PixelBuffer,
    ) -> Result<(), EditError> {
        let next = f(self.require_source()?);
        info!(op, width = next.width, height = next.height, "source replaced");
        self.source = Some(next);
        self.commit();
        Ok(())
    }

    /// Bookkeeping after the source changed.
    fn commit(&mut self) {
        self.reset_adjustments();
        self.generation = self.generation.wrapping_add(1);
    }

    fn require_source(&self) -> Result<&PixelBuffer, EditError> {
        self.source.as_ref().ok_or(EditError::NoImage)
    }

    fn require_source_mut(&mut self) -> Result<&mut PixelBuffer, EditError> {
        self.source.as_mut().ok_or(EditError::NoImage)
    }
}
