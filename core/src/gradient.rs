use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{NoiseError, Result};

// One knot of a piecewise-linear color ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientPoint {
    pub position: f32,
    pub color: Color,
}

impl GradientPoint {
    pub fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// Maps a scalar position onto a color.
///
/// Points can be added in any order; they are kept sorted by position and no
/// two points share a position. Between two points the color is linearly
/// interpolated; outside the covered range the nearest end color is used.
///
/// With points at -1 (black) and 1 (white), `get_color(-0.5)` is dark grey
/// and `get_color(2.0)` is white.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GradientPoint>", into = "Vec<GradientPoint>")]
pub struct GradientColor {
    points: Vec<GradientPoint>,
}

impl GradientColor {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(10),
        }
    }

    // Same color across [-1, 1]
    pub fn solid(color: Color) -> Self {
        Self::two_color(color, color)
    }

    // Ramp from `start` at -1 to `end` at 1
    pub fn two_color(start: Color, end: Color) -> Self {
        Self {
            points: vec![GradientPoint::new(-1.0, start), GradientPoint::new(1.0, end)],
        }
    }

    pub fn grayscale() -> Self {
        Self::two_color(Color::BLACK, Color::WHITE)
    }

    pub fn empty() -> Self {
        Self::solid(Color::TRANSPARENT)
    }

    // Water, sand, grass, dirt, rock and snow over [-1, 1]
    pub fn terrain() -> Self {
        let knots = [
            (-1.0, Color::rgb(0, 0, 128)),      // deeps
            (-0.25, Color::rgb(0, 0, 255)),     // shallow
            (0.0, Color::rgb(0, 128, 255)),     // shore
            (0.0625, Color::rgb(240, 240, 64)), // sand
            (0.125, Color::rgb(32, 160, 0)),    // grass
            (0.375, Color::rgb(224, 224, 0)),   // dirt
            (0.75, Color::rgb(128, 128, 128)),  // rock
            (1.0, Color::rgb(255, 255, 255)),   // snow
        ];
        Self {
            points: knots
                .into_iter()
                .map(|(p, c)| GradientPoint::new(p, c))
                .collect(),
        }
    }

    pub fn add_gradient_point(&mut self, position: f32, color: Color) -> Result<()> {
        self.add_point(GradientPoint::new(position, color))
    }

    pub fn add_point(&mut self, point: GradientPoint) -> Result<()> {
        // NaN would defeat the ordering the lookups rely on
        if !point.position.is_finite() {
            return Err(NoiseError::NonFiniteGradientPosition {
                position: point.position,
            });
        }
        // First index whose position is not below the new one
        let at = self.points.partition_point(|p| p.position < point.position);
        if self
            .points
            .get(at)
            .is_some_and(|p| p.position == point.position)
        {
            return Err(NoiseError::DuplicateGradientPosition {
                position: point.position,
            });
        }
        self.points.insert(at, point);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // Sorted ascending by position
    pub fn points(&self) -> &[GradientPoint] {
        &self.points
    }

    pub fn get_color(&self, position: f32) -> Color {
        if self.points.is_empty() {
            return Color::TRANSPARENT;
        }
        let last = self.points.len() - 1;

        // First point whose position exceeds the query
        let index = self.points.partition_point(|p| p.position <= position);

        // The two nearest points, clamped into the array
        let i0 = index.saturating_sub(1).min(last);
        let i1 = index.min(last);

        // Outside the covered range both indices collapse onto an end point
        if i0 == i1 {
            return self.points[i1].color;
        }

        let p0 = &self.points[i0];
        let p1 = &self.points[i1];
        let alpha = (position - p0.position) / (p1.position - p0.position);
        Color::lerp(p0.color, p1.color, alpha)
    }
}

// Validates a point list coming from configuration
impl TryFrom<Vec<GradientPoint>> for GradientColor {
    type Error = NoiseError;

    fn try_from(points: Vec<GradientPoint>) -> Result<Self> {
        let mut gradient = GradientColor::new();
        for point in points {
            gradient.add_point(point)?;
        }
        Ok(gradient)
    }
}

impl From<GradientColor> for Vec<GradientPoint> {
    fn from(gradient: GradientColor) -> Self {
        gradient.points
    }
}
