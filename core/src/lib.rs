// noisemap holds the module graph, the sampling models, the map builders and
// the renderers that turn noise maps into heightmaps and colors
pub mod builder;
pub mod color;
pub mod combiner;
pub mod error;
pub mod filter;
pub mod gradient;
pub mod map;
pub mod model;
pub mod perlin;
pub mod primitive;
pub mod renderer;
pub mod simplex;
pub mod transformer;
pub mod utils;

use std::sync::Arc;

pub use builder::{
    BuilderFilter, CancelToken, FilterLevel, NoiseMapBuilder, NoiseMapBuilderPlane,
    NoiseMapBuilderSphere, PlaneBounds, PlaneBuilderConfig, ShapeFilter, SphereBounds,
    SphereBuilderConfig,
};
pub use color::Color;
pub use combiner::{Blend, CombineOp, Combiner};
pub use error::{NoiseError, Result};
pub use filter::{Pipe, SumFractal};
pub use gradient::{GradientColor, GradientPoint};
pub use map::{DataMap, Heightmap8, Heightmap16, Heightmap32, Image, Map2D, NoiseMap};
pub use model::{Line, Plane, Sphere};
pub use perlin::Perlin;
pub use primitive::{Constant, NoiseQuality, PrimitiveModule};
pub use renderer::{Elevation, HeightBounds, HeightmapRenderer, ImageRenderer};
pub use simplex::Simplex;
pub use transformer::{Displace, RotatePoint, ScalePoint, TranslatePoint};

bitflags::bitflags! {
    // Coordinate arities a module can be evaluated on
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Dimensions: u8 {
        const D1 = 0b0001;
        const D2 = 0b0010;
        const D3 = 0b0100;
        const D4 = 0b1000;
    }
}

// Shared handle to a node of the module graph.
// The same submodule can feed several parents; children are immutable once
// wrapped, so a graph built from these handles never contains a cycle.
pub type ModuleRef = Arc<dyn Module>;

// A node of the noise graph that evaluates a scalar at a coordinate.
// Each implementation overrides the `getN` methods listed in `dimensions()`.
// Calling any other arity is a programming error and panics.
pub trait Module: Send + Sync {
    fn dimensions(&self) -> Dimensions;

    fn get1(&self, _x: f64) -> f64 {
        panic!("get1 not implemented for this module");
    }

    fn get2(&self, _x: f64, _y: f64) -> f64 {
        panic!("get2 not implemented for this module");
    }

    fn get3(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        panic!("get3 not implemented for this module");
    }

    fn get4(&self, _x: f64, _y: f64, _z: f64, _t: f64) -> f64 {
        panic!("get4 not implemented for this module");
    }

    /// Verifies that every input this module (and its children) needs is
    /// connected. Leaves have no inputs.
    fn check_inputs(&self) -> Result<()> {
        Ok(())
    }
}

// Wraps a module into a shareable graph handle
pub fn module<M: Module + 'static>(m: M) -> ModuleRef {
    Arc::new(m)
}

// Fails with a descriptive error unless `source` covers every arity in `required`
pub fn ensure_dimensions(source: &dyn Module, required: Dimensions) -> Result<()> {
    let supported = source.dimensions();
    if supported.contains(required) {
        Ok(())
    } else {
        Err(NoiseError::UnsupportedDimension {
            required,
            supported,
        })
    }
}

// Borrows a connected input, panicking if the graph was never wired
pub(crate) fn connected<'a>(
    input: &'a Option<ModuleRef>,
    module: &'static str,
) -> &'a ModuleRef {
    match input {
        Some(m) => m,
        None => panic!("{module} evaluated before all input modules were connected"),
    }
}

// Requires `input` to be connected, then checks its own inputs
pub(crate) fn check_connected(
    input: &Option<ModuleRef>,
    module: &'static str,
    name: &'static str,
) -> Result<()> {
    input
        .as_ref()
        .ok_or(NoiseError::MissingInput {
            module,
            input: name,
        })?
        .check_inputs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_dimensions_reports_missing_arity() {
        let s = Simplex::new(0);
        assert!(ensure_dimensions(&s, Dimensions::D2).is_ok());
        let err = ensure_dimensions(&s, Dimensions::D3).unwrap_err();
        assert!(matches!(err, NoiseError::UnsupportedDimension { .. }));
    }

    #[test]
    fn shared_submodule_feeds_two_parents() {
        let base = module(Constant::new(0.25));
        let sum = Combiner::new(CombineOp::Add, base.clone(), base.clone());
        let prod = Combiner::new(CombineOp::Multiply, base.clone(), base);
        assert_eq!(sum.get3(1.0, 2.0, 3.0), 0.5);
        assert_eq!(prod.get3(1.0, 2.0, 3.0), 0.0625);
    }
}
