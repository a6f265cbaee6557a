//! Background erasers: magic wand and global color-range removal.
//!
//! Both erase by forcing alpha to 0 and leave RGB in place. Pixels that are
//! already transparent never match, so they are neither counted nor
//! expanded through.

use tracing::{debug, instrument};

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::EditError;
use crate::Tolerance;

/// Outcome of an erase operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct EraseReport {
    /// Pixels whose alpha went from non-zero to 0
    pub erased: usize,
}

impl EraseReport {
    /// True when the buffer was left unchanged.
    pub fn is_noop(&self) -> bool {
        self.erased == 0
    }
}

/// Magic wand: erase the 4-connected region around a seed.
///
/// A pixel joins the region when it is not already transparent and its
/// squared RGB distance to the seed color is at most `tolerance² × 3`.
/// Pixels that fail the test are walls.
///
/// # Errors
///
/// Returns `EditError::InvalidCoordinate` if the seed is outside the image.
/// The buffer is not modified in that case.
///
/// A seed on a transparent pixel is a no-op.
#[instrument(skip_all, fields(seed_x = seed_x, seed_y = seed_y, tolerance = tolerance.value()))]
pub fn erase_region(
    buffer: &mut PixelBuffer,
    seed_x: i64,
    seed_y: i64,
    tolerance: Tolerance,
) -> Result<EraseReport, EditError> {
    let seed = pick(buffer, seed_x, seed_y)?;
    if seed[3] == 0 {
        debug!("seed pixel already transparent");
        return Ok(EraseReport::default());
    }

    let seed_rgb = [seed[0], seed[1], seed[2]];
    let limit = region_limit(tolerance);
    let width = buffer.width as usize;
    let height = buffer.height as usize;

    let matches = |px: &[u8]| px[3] != 0 && distance_sq(px, seed_rgb) <= limit;

    let mut visited = vec![false; width * height];
    let mut stack = Vec::new();
    let mut erased = 0usize;

    let start = seed_y as usize * width + seed_x as usize;
    visited[start] = true;
    buffer.pixels[start * CHANNELS + 3] = 0;
    erased += 1;
    stack.push(start);

    while let Some(i) = stack.pop() {
        let x = i % width;
        let y = i / width;

        let neighbors = [
            (x > 0).then(|| i - 1),
            (x + 1 < width).then(|| i + 1),
            (y > 0).then(|| i - width),
            (y + 1 < height).then(|| i + width),
        ];

        for n in neighbors.into_iter().flatten() {
            if visited[n] {
                continue;
            }
            visited[n] = true;

            let offset = n * CHANNELS;
            if matches(&buffer.pixels[offset..offset + CHANNELS]) {
                buffer.pixels[offset + 3] = 0;
                erased += 1;
                stack.push(n);
            }
        }
    }

    debug!(erased, "magic wand finished");
    Ok(EraseReport { erased })
}

/// Erase every pixel whose RGB distance to `target` is below `tolerance`.
///
/// Unlike the magic wand this is global: matching pixels need not be
/// connected. The comparison is strict, so a tolerance of 0 erases nothing.
#[instrument(skip_all, fields(target = ?target, tolerance = tolerance.value()))]
pub fn erase_color_range(
    buffer: &mut PixelBuffer,
    target: [u8; 3],
    tolerance: Tolerance,
) -> EraseReport {
    let t = tolerance.value();
    let limit = t * t;
    let mut erased = 0usize;

    for px in buffer.pixels.chunks_exact_mut(CHANNELS) {
        if px[3] == 0 {
            continue;
        }
        if distance_sq(px, target) < limit {
            px[3] = 0;
            erased += 1;
        }
    }

    debug!(erased, "color range removal finished");
    EraseReport { erased }
}

/// Color-range removal using the color under `(x, y)` as the target.
///
/// # Errors
///
/// Returns `EditError::InvalidCoordinate` if the pick point is outside the
/// image. Picking a transparent pixel is a no-op.
pub fn erase_color_at(
    buffer: &mut PixelBuffer,
    x: i64,
    y: i64,
    tolerance: Tolerance,
) -> Result<EraseReport, EditError> {
    let picked = pick(buffer, x, y)?;
    if picked[3] == 0 {
        return Ok(EraseReport::default());
    }
    Ok(erase_color_range(
        buffer,
        [picked[0], picked[1], picked[2]],
        tolerance,
    ))
}

/// Read the pixel at a host-supplied coordinate.
fn pick(buffer: &PixelBuffer, x: i64, y: i64) -> Result<[u8; 4], EditError> {
    let invalid = || EditError::InvalidCoordinate {
        x,
        y,
        width: buffer.width,
        height: buffer.height,
    };
    if !buffer.in_bounds(x, y) {
        return Err(invalid());
    }
    buffer.pixel(x as u32, y as u32).ok_or_else(invalid)
}

/// Squared distance threshold for the magic wand.
#[inline]
fn region_limit(tolerance: Tolerance) -> f32 {
    let t = tolerance.value();
    t * t * 3.0
}

#[inline]
fn distance_sq(px: &[u8], target: [u8; 3]) -> f32 {
    let dr = px[0] as f32 - target[0] as f32;
    let dg = px[1] as f32 - target[1] as f32;
    let db = px[2] as f32 - target[2] as f32;
    dr * dr + dg * dg + db * db
}
