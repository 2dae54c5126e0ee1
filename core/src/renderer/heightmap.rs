use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::builder::ProgressCallback;
use crate::error::{NoiseError, Result};
use crate::map::Map2D;

/// Cell type a heightmap can be rendered into.
///
/// `from_noise` receives a noise value and strictly increasing bounds and
/// maps `[lower, upper]` onto the type's range. Integer heights saturate
/// outside the bounds and truncate inside; `f32` is clamped only.
pub trait Elevation: Copy + Default + PartialOrd {
    fn from_noise(value: f32, lower: f32, upper: f32) -> Self;
}

// Truncating scale of `value` onto `0..=max`
fn quantize(value: f32, lower: f32, upper: f32, max: f32) -> f32 {
    if value <= lower {
        0.0
    } else if value >= upper {
        max
    } else {
        ((value - lower) / (upper - lower) * max).trunc()
    }
}

impl Elevation for u8 {
    fn from_noise(value: f32, lower: f32, upper: f32) -> Self {
        quantize(value, lower, upper, u8::MAX as f32) as u8
    }
}

impl Elevation for u16 {
    fn from_noise(value: f32, lower: f32, upper: f32) -> Self {
        quantize(value, lower, upper, u16::MAX as f32) as u16
    }
}

impl Elevation for f32 {
    fn from_noise(value: f32, lower: f32, upper: f32) -> Self {
        value.clamp(lower, upper)
    }
}

// Noise range mapped onto the full height range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightBounds {
    pub lower: f32,
    pub upper: f32,
}

impl HeightBounds {
    pub fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.lower < self.upper) {
            return Err(NoiseError::IncoherentBounds {
                what: "lower height bound >= upper height bound",
            });
        }
        Ok(())
    }
}

impl Default for HeightBounds {
    fn default() -> Self {
        Self::new(-1.0, 1.0)
    }
}

// Index of the cell across the wrap seam; interior indices map to themselves
fn opposite(i: usize, len: usize) -> usize {
    if i == 0 {
        len - 1
    } else if i == len - 1 {
        0
    } else {
        i
    }
}

/// Quantizes a noise map into an 8-bit, 16-bit or float heightmap.
///
/// With wrapping enabled, every edge cell is averaged once with its
/// counterpart on the opposite edge (left with right, top with bottom,
/// corners with the diagonal corner), so matching edges hold identical
/// heights and the heightmap tiles.
pub struct HeightmapRenderer {
    bounds: HeightBounds,
    wrap: bool,
    callback: Option<ProgressCallback>,
}

impl HeightmapRenderer {
    pub fn new() -> Self {
        Self::with_bounds(HeightBounds::default())
    }

    // Bounds are checked when rendering
    pub fn with_bounds(bounds: HeightBounds) -> Self {
        Self {
            bounds,
            wrap: false,
            callback: None,
        }
    }

    pub fn bounds(&self) -> HeightBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, lower: f32, upper: f32) -> Result<()> {
        let bounds = HeightBounds::new(lower, upper);
        bounds.validate()?;
        self.bounds = bounds;
        Ok(())
    }

    // Uses the lowest and highest values of `noise` as bounds
    pub fn exact_fit(&mut self, noise: &dyn Map2D<f32>) {
        let (lower, upper) = noise.min_max();
        self.bounds = HeightBounds::new(lower, upper);
    }

    pub fn wrap_enabled(&self) -> bool {
        self.wrap
    }

    pub fn set_wrap_enabled(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn set_callback(&mut self, callback: ProgressCallback) {
        self.callback = Some(callback);
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    pub fn render<H, M>(&mut self, noise: &dyn Map2D<f32>, dest: &mut M) -> Result<()>
    where
        H: Elevation,
        M: Map2D<H> + ?Sized,
    {
        let (width, height) = (noise.width(), noise.height());
        if width == 0 || height == 0 {
            return Err(NoiseError::EmptyNoiseMap { width, height });
        }
        self.bounds.validate()?;

        let HeightBounds { lower, upper } = self.bounds;
        debug!(width, height, lower, upper, wrap = self.wrap, "rendering heightmap");

        dest.set_size(width, height);

        for y in 0..height {
            for x in 0..width {
                let mut value = noise.get_value(x, y);
                if self.wrap {
                    let (x_off, y_off) = (opposite(x, width), opposite(y, height));
                    if (x_off, y_off) != (x, y) {
                        // Midpoint is symmetric, so both cells of a pair agree exactly
                        value = (value + noise.get_value(x_off, y_off)) * 0.5;
                    }
                }
                dest.set_value(x, y, H::from_noise(value, lower, upper));
            }

            trace!(row = y, "heightmap row complete");
            if let Some(callback) = self.callback.as_mut() {
                callback(y);
            }
        }

        Ok(())
    }
}

impl Default for HeightmapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::map::{Heightmap8, Heightmap16, Heightmap32, NoiseMap};

    fn noise(values: &[f32], width: usize) -> NoiseMap {
        let mut map = NoiseMap::with_size(width, values.len() / width);
        for (i, &v) in values.iter().enumerate() {
            map.set_value(i % width, i / width, v);
        }
        map
    }

    #[test]
    fn quantization_per_width() {
        assert_eq!(u8::from_noise(-2.0, -1.0, 1.0), 0);
        assert_eq!(u8::from_noise(-1.0, -1.0, 1.0), 0);
        assert_eq!(u8::from_noise(0.0, -1.0, 1.0), 127);
        assert_eq!(u8::from_noise(1.0, -1.0, 1.0), 255);
        assert_eq!(u16::from_noise(0.0, -1.0, 1.0), 32767);
        assert_eq!(u16::from_noise(5.0, -1.0, 1.0), u16::MAX);
        assert_eq!(f32::from_noise(0.3, -1.0, 1.0), 0.3);
        assert_eq!(f32::from_noise(-4.0, -1.0, 1.0), -1.0);
    }

    #[test]
    fn renders_all_cells() {
        let src = noise(&[-1.0, 0.0, 1.0, 0.5], 2);
        let mut renderer = HeightmapRenderer::new();
        let mut dest = Heightmap8::new();
        renderer.render(&src, &mut dest).unwrap();
        assert_eq!(dest.as_slice(), &[0, 127, 255, 191]);
    }

    #[test]
    fn empty_noise_map_is_rejected() {
        let mut renderer = HeightmapRenderer::new();
        let mut dest = Heightmap16::with_size(1, 1);
        let err = renderer.render(&NoiseMap::new(), &mut dest).unwrap_err();
        assert!(matches!(err, NoiseError::EmptyNoiseMap { width: 0, height: 0 }));
        assert_eq!(dest.width(), 1);
    }

    #[test]
    fn bounds_must_increase() {
        let mut renderer = HeightmapRenderer::new();
        assert!(renderer.set_bounds(0.5, 0.5).is_err());
        assert_eq!(renderer.bounds(), HeightBounds::default());

        // Bounds from configuration are only checked at render time
        let mut renderer = HeightmapRenderer::with_bounds(HeightBounds::new(1.0, 0.0));
        let err = renderer
            .render(&noise(&[0.0], 1), &mut Heightmap8::new())
            .unwrap_err();
        assert!(matches!(err, NoiseError::IncoherentBounds { .. }));
    }

    #[test]
    fn exact_fit_spans_full_range() {
        let src = noise(&[0.2, 0.4, 0.6, 0.3], 2);
        let mut renderer = HeightmapRenderer::new();
        renderer.exact_fit(&src);
        assert_eq!(renderer.bounds(), HeightBounds::new(0.2, 0.6));

        let mut dest = Heightmap8::new();
        renderer.render(&src, &mut dest).unwrap();
        assert_eq!(dest.min_max(), (0, 255));
    }

    #[test]
    fn wrap_blends_opposite_edges() {
        #[rustfmt::skip]
        let src = noise(&[
            0.0, 0.0, 0.5,
            0.0, 0.0, 1.0,
            0.5, 0.0, 0.0,
        ], 3);
        let mut renderer = HeightmapRenderer::new();
        renderer.set_wrap_enabled(true);
        let mut dest = Heightmap32::new();
        renderer.render(&src, &mut dest).unwrap();

        // Left and right edges meet halfway
        assert_eq!(dest.get_value(0, 1), 0.5);
        assert_eq!(dest.get_value(2, 1), 0.5);
        // Corners blend with the diagonal corner once
        assert_eq!(dest.get_value(0, 0), 0.0);
        assert_eq!(dest.get_value(2, 0), 0.5);
        assert_eq!(dest.get_value(0, 2), 0.5);
        assert_eq!(dest.get_value(2, 2), 0.0);
        // Top and bottom middle cells pair with each other
        assert_eq!(dest.get_value(1, 0), 0.0);
        assert_eq!(dest.get_value(1, 2), 0.0);
        // Interior untouched
        assert_eq!(dest.get_value(1, 1), 0.0);
    }

    #[test]
    fn wrapped_edges_are_identical() {
        let (w, h) = (5, 4);
        let values: Vec<f32> = (0..w * h)
            .map(|i| ((i * 37) % 11) as f32 / 10.0 - 0.5)
            .collect();
        let src = noise(&values, w);
        let mut renderer = HeightmapRenderer::new();
        renderer.set_wrap_enabled(true);
        let mut dest = Heightmap16::new();
        renderer.render(&src, &mut dest).unwrap();

        for y in 1..h - 1 {
            assert_eq!(dest.get_value(0, y), dest.get_value(w - 1, y), "row {y}");
        }
        for x in 1..w - 1 {
            assert_eq!(dest.get_value(x, 0), dest.get_value(x, h - 1), "column {x}");
        }
        assert_eq!(dest.get_value(0, 0), dest.get_value(w - 1, h - 1));
        assert_eq!(dest.get_value(w - 1, 0), dest.get_value(0, h - 1));
    }

    #[test]
    fn single_cell_is_not_blended() {
        let mut renderer = HeightmapRenderer::new();
        renderer.set_wrap_enabled(true);
        let mut dest = Heightmap32::new();
        renderer.render(&noise(&[0.75], 1), &mut dest).unwrap();
        assert_eq!(dest.get_value(0, 0), 0.75);
    }

    #[test]
    fn callback_counts_rows() {
        let rows = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&rows);
        let mut renderer = HeightmapRenderer::new();
        renderer.set_callback(Box::new(move |_| *counter.lock().unwrap() += 1));
        renderer
            .render(&noise(&[0.0; 6], 2), &mut Heightmap16::new())
            .unwrap();
        assert_eq!(*rows.lock().unwrap(), 3);
    }
}
