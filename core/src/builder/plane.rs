use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BuilderState, NoiseMapBuilder};
use crate::error::{NoiseError, Result};
use crate::map::Map2D;
use crate::model::Plane;
use crate::utils::lerp;

// Rectangle of the (x, z) plane covered by the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneBounds {
    pub lower_x: f64,
    pub upper_x: f64,
    pub lower_z: f64,
    pub upper_z: f64,
}

impl PlaneBounds {
    pub fn new(lower_x: f64, upper_x: f64, lower_z: f64, upper_z: f64) -> Self {
        Self {
            lower_x,
            upper_x,
            lower_z,
            upper_z,
        }
    }

    pub fn validate(&self) -> Result<()> {
        // Negated so NaN bounds are rejected too
        if !(self.lower_x < self.upper_x) || !(self.lower_z < self.upper_z) {
            return Err(NoiseError::IncoherentBounds {
                what: "lower_x >= upper_x or lower_z >= upper_z",
            });
        }
        Ok(())
    }

    pub fn x_extent(&self) -> f64 {
        self.upper_x - self.lower_x
    }

    pub fn z_extent(&self) -> f64 {
        self.upper_z - self.lower_z
    }
}

impl Default for PlaneBounds {
    fn default() -> Self {
        Self::new(-1.0, 1.0, -1.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneBuilderConfig {
    pub width: usize,
    pub height: usize,
    pub bounds: PlaneBounds,
    pub seamless: bool,
}

impl Default for PlaneBuilderConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            bounds: PlaneBounds::default(),
            seamless: false,
        }
    }
}

/// Builds a noise map from the (x, z) plane of a 3D module.
///
/// In seamless mode every cell blends four samples taken one extent apart so
/// the map tiles without a visible edge.
pub struct NoiseMapBuilderPlane {
    state: BuilderState,
    bounds: PlaneBounds,
    seamless: bool,
}

impl NoiseMapBuilderPlane {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            state: BuilderState::new(width, height),
            bounds: PlaneBounds::default(),
            seamless: false,
        }
    }

    // Config bounds are checked when the map is built
    pub fn from_config(config: &PlaneBuilderConfig) -> Self {
        Self {
            state: BuilderState::new(config.width, config.height),
            bounds: config.bounds,
            seamless: config.seamless,
        }
    }

    pub fn bounds(&self) -> PlaneBounds {
        self.bounds
    }

    pub fn set_bounds(
        &mut self,
        lower_x: f64,
        upper_x: f64,
        lower_z: f64,
        upper_z: f64,
    ) -> Result<()> {
        let bounds = PlaneBounds::new(lower_x, upper_x, lower_z, upper_z);
        bounds.validate()?;
        self.bounds = bounds;
        Ok(())
    }

    pub fn seamless(&self) -> bool {
        self.seamless
    }

    pub fn set_seamless(&mut self, seamless: bool) {
        self.seamless = seamless;
    }
}

// Bilinear blend of the sample and its three wrapped copies
fn seamless_value(model: &Plane, bounds: &PlaneBounds, x: f64, z: f64) -> f64 {
    let x_extent = bounds.x_extent();
    let z_extent = bounds.z_extent();

    let sw = model.get_value(x, z);
    let se = model.get_value(x + x_extent, z);
    let nw = model.get_value(x, z + z_extent);
    let ne = model.get_value(x + x_extent, z + z_extent);

    let x_blend = 1.0 - (x - bounds.lower_x) / x_extent;
    let z_blend = 1.0 - (z - bounds.lower_z) / z_extent;

    let z0 = lerp(sw, se, x_blend);
    let z1 = lerp(nw, ne, x_blend);
    lerp(z0, z1, z_blend)
}

impl NoiseMapBuilder for NoiseMapBuilderPlane {
    fn state(&self) -> &BuilderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState {
        &mut self.state
    }

    fn build(&mut self, dest: &mut dyn Map2D<f32>) -> Result<()> {
        self.bounds.validate()?;
        let model = Plane::new(self.state.ready_source()?);

        let bounds = self.bounds;
        let seamless = self.seamless;
        let x_delta = bounds.x_extent() / self.state.width as f64;
        let z_delta = bounds.z_extent() / self.state.height as f64;

        debug!(
            width = self.state.width,
            height = self.state.height,
            ?bounds,
            seamless,
            "building planar noise map"
        );

        self.state.fill(dest, |x, z| {
            let x_cur = bounds.lower_x + x as f64 * x_delta;
            let z_cur = bounds.lower_z + z as f64 * z_delta;
            if seamless {
                seamless_value(&model, &bounds, x_cur, z_cur)
            } else {
                model.get_value(x_cur, z_cur)
            }
        })
    }
}
