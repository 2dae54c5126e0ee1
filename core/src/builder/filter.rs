use crate::map::{Image, Map2D};
use crate::utils::lerp_f32;

// Outcome of the per-cell filter decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterLevel {
    // Ignore the source, use the constant value
    Constant,
    // Use the sampled source value unmodified
    Source,
    // Pass the sampled value through `filter_value`
    Filter,
}

/// Per-cell gate consulted by map builders.
///
/// Builders call `is_filtered` first and only sample the module graph when
/// the answer is not `Constant`. Implementations may cache per cell, so a
/// filter must not be shared between builders running concurrently.
pub trait BuilderFilter: Send {
    fn constant_value(&self) -> f32;

    fn set_constant_value(&mut self, value: f32);

    fn is_filtered(&mut self, x: usize, y: usize) -> FilterLevel;

    fn filter_value(&mut self, x: usize, y: usize, source: f32) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LevelCache {
    x: usize,
    y: usize,
    level: u8,
}

// Masks a noise map with a greyscale shape image.
// The red channel of the shape is the weight: 0 keeps the constant, 255
// keeps the source, anything between blends the two.
#[derive(Debug, Clone)]
pub struct ShapeFilter {
    shape: Image,
    constant: f32,
    cache: Option<LevelCache>,
}

impl ShapeFilter {
    pub const DEFAULT_VALUE: f32 = -0.5;

    pub fn new(shape: Image) -> Self {
        Self {
            shape,
            constant: Self::DEFAULT_VALUE,
            cache: None,
        }
    }

    pub fn shape(&self) -> &Image {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: Image) {
        self.shape = shape;
        self.cache = None;
    }

    // Shape lookups are memoized for the last queried cell
    fn greyscale_level(&mut self, x: usize, y: usize) -> u8 {
        match self.cache {
            Some(c) if c.x == x && c.y == y => c.level,
            _ => {
                let level = self.shape.get_value(x, y).red;
                self.cache = Some(LevelCache { x, y, level });
                level
            }
        }
    }
}

impl BuilderFilter for ShapeFilter {
    fn constant_value(&self) -> f32 {
        self.constant
    }

    fn set_constant_value(&mut self, value: f32) {
        self.constant = value;
    }

    fn is_filtered(&mut self, x: usize, y: usize) -> FilterLevel {
        match self.greyscale_level(x, y) {
            u8::MIN => FilterLevel::Constant,
            u8::MAX => FilterLevel::Source,
            _ => FilterLevel::Filter,
        }
    }

    fn filter_value(&mut self, x: usize, y: usize, source: f32) -> f32 {
        match self.greyscale_level(x, y) {
            u8::MAX => source,
            u8::MIN => self.constant,
            level => lerp_f32(self.constant, source, level as f32 / 255.0),
        }
    }
}
