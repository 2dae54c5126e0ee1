use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BuilderState, NoiseMapBuilder};
use crate::error::{NoiseError, Result};
use crate::map::Map2D;
use crate::model::Sphere;

// Latitude/longitude window in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereBounds {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl SphereBounds {
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.south < self.north) || !(self.west < self.east) {
            return Err(NoiseError::IncoherentBounds {
                what: "south >= north or west >= east",
            });
        }
        Ok(())
    }

    pub fn lat_extent(&self) -> f64 {
        self.north - self.south
    }

    pub fn lon_extent(&self) -> f64 {
        self.east - self.west
    }
}

// Whole globe
impl Default for SphereBounds {
    fn default() -> Self {
        Self::new(-90.0, 90.0, -180.0, 180.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereBuilderConfig {
    pub width: usize,
    pub height: usize,
    pub bounds: SphereBounds,
}

impl Default for SphereBuilderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 256,
            bounds: SphereBounds::default(),
        }
    }
}

// Builds an equirectangular noise map: columns walk longitude from west to
// east, rows walk latitude from south to north
pub struct NoiseMapBuilderSphere {
    state: BuilderState,
    bounds: SphereBounds,
}

impl NoiseMapBuilderSphere {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            state: BuilderState::new(width, height),
            bounds: SphereBounds::default(),
        }
    }

    pub fn from_config(config: &SphereBuilderConfig) -> Self {
        Self {
            state: BuilderState::new(config.width, config.height),
            bounds: config.bounds,
        }
    }

    pub fn bounds(&self) -> SphereBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, south: f64, north: f64, west: f64, east: f64) -> Result<()> {
        let bounds = SphereBounds::new(south, north, west, east);
        bounds.validate()?;
        self.bounds = bounds;
        Ok(())
    }
}

impl NoiseMapBuilder for NoiseMapBuilderSphere {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }

    fn build(&mut self, dest: &mut dyn Map2D<f32>) -> Result<()> {
        self.bounds.validate()?;
        let model = Sphere::new(self.state.ready_source()?);

        let bounds = self.bounds;
        let lon_delta = bounds.lon_extent() / self.state.width as f64;
        let lat_delta = bounds.lat_extent() / self.state.height as f64;

        debug!(
            width = self.state.width,
            height = self.state.height,
            ?bounds,
            "building spherical noise map"
        );

        self.state.fill(dest, |x, y| {
            let lon = bounds.west + x as f64 * lon_delta;
            let lat = bounds.south + y as f64 * lat_delta;
            model.get_value(lat, lon)
        })
    }
}
