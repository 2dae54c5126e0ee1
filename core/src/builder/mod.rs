// Map builders drive the sampling loop: one model sample per output cell,
// gated by an optional builder filter, written into a `Map2D<f32>`
mod filter;
mod plane;
mod sphere;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{trace, warn};

use crate::error::{NoiseError, Result};
use crate::map::Map2D;
use crate::{Dimensions, ModuleRef, ensure_dimensions};

pub use filter::{BuilderFilter, FilterLevel, ShapeFilter};
pub use plane::{NoiseMapBuilderPlane, PlaneBounds, PlaneBuilderConfig};
pub use sphere::{NoiseMapBuilderSphere, SphereBounds, SphereBuilderConfig};

// Invoked once per completed row with the row index
pub type ProgressCallback = Box<dyn FnMut(usize) + Send>;

/// Cooperative stop signal for long builds.
///
/// Clones share the same flag, so a token handed to a builder can be
/// cancelled from another thread or from inside the progress callback. The
/// builder checks it before each row.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// State every builder carries regardless of its coordinate domain
#[derive(Default)]
pub struct BuilderState {
    source: Option<ModuleRef>,
    filter: Option<Box<dyn BuilderFilter>>,
    width: usize,
    height: usize,
    callback: Option<ProgressCallback>,
    cancel: Option<CancelToken>,
}

impl BuilderState {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    // The source to sample, once it is known to be evaluable in 3D
    fn ready_source(&self) -> Result<ModuleRef> {
        let source = self.source.as_ref().ok_or(NoiseError::MissingSource)?;
        source.check_inputs()?;
        ensure_dimensions(source.as_ref(), Dimensions::D3)?;
        Ok(Arc::clone(source))
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    // Resizes `dest` and fills it row by row with `sample(x, y)`
    fn fill<F>(&mut self, dest: &mut dyn Map2D<f32>, sample: F) -> Result<()>
    where
        F: Fn(usize, usize) -> f64,
    {
        if self.cancelled() {
            warn!("noise map build cancelled before it started");
            return Err(NoiseError::Cancelled { row: 0 });
        }

        dest.set_size(self.width, self.height);

        for y in 0..self.height {
            if y > 0 && self.cancelled() {
                warn!(row = y, "noise map build cancelled");
                return Err(NoiseError::Cancelled { row: y });
            }

            for x in 0..self.width {
                let value = match self.filter.as_deref_mut() {
                    None => sample(x, y) as f32,
                    Some(filter) => match filter.is_filtered(x, y) {
                        FilterLevel::Constant => filter.constant_value(),
                        FilterLevel::Source => sample(x, y) as f32,
                        FilterLevel::Filter => {
                            let source = sample(x, y) as f32;
                            filter.filter_value(x, y, source)
                        }
                    },
                };
                dest.set_value(x, y, value);
            }

            trace!(row = y, "noise map row complete");
            if let Some(callback) = self.callback.as_mut() {
                callback(y);
            }
        }

        Ok(())
    }
}

/// Shared configuration surface of the plane and sphere builders.
///
/// Only `build` and the state accessors are specific to a builder; every
/// setter below works on the common `BuilderState`.
pub trait NoiseMapBuilder {
    fn state(&self) -> &BuilderState;

    fn state_mut(&mut self) -> &mut BuilderState;

    /// Samples the source over the builder's bounds into `dest`.
    ///
    /// Bounds, the source module and its inputs are validated first; on
    /// failure `dest` is left untouched. On success `dest` is resized to
    /// `width × height` and every cell is overwritten.
    fn build(&mut self, dest: &mut dyn Map2D<f32>) -> Result<()>;

    fn source_module(&self) -> Option<&ModuleRef> {
        self.state().source.as_ref()
    }

    fn set_source_module(&mut self, source: ModuleRef) {
        self.state_mut().source = Some(source);
    }

    fn width(&self) -> usize {
        self.state().width
    }

    fn height(&self) -> usize {
        self.state().height
    }

    fn set_size(&mut self, width: usize, height: usize) {
        let state = self.state_mut();
        state.width = width;
        state.height = height;
    }

    fn filter(&self) -> Option<&dyn BuilderFilter> {
        self.state().filter.as_deref()
    }

    fn set_filter(&mut self, filter: Box<dyn BuilderFilter>) {
        self.state_mut().filter = Some(filter);
    }

    fn clear_filter(&mut self) {
        self.state_mut().filter = None;
    }

    fn set_callback(&mut self, callback: ProgressCallback) {
        self.state_mut().callback = Some(callback);
    }

    fn clear_callback(&mut self) {
        self.state_mut().callback = None;
    }

    fn set_cancel_token(&mut self, token: CancelToken) {
        self.state_mut().cancel = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::map::{Image, NoiseMap};
    use crate::primitive::Constant;
    use crate::{Color, CombineOp, Combiner, Simplex, module};

    fn builder(value: f64) -> NoiseMapBuilderPlane {
        let mut b = NoiseMapBuilderPlane::new(4, 3);
        b.set_source_module(module(Constant::new(value)));
        b
    }

    #[test]
    fn callback_sees_every_row_in_order() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&rows);
        let mut b = builder(0.5);
        b.set_callback(Box::new(move |row| seen.lock().unwrap().push(row)));

        let mut map = NoiseMap::new();
        b.build(&mut map).unwrap();
        assert_eq!(*rows.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn missing_source_leaves_map_untouched() {
        let mut b = NoiseMapBuilderPlane::new(4, 4);
        let mut map = NoiseMap::with_size(2, 2);
        map.clear(7.0);

        let err = b.build(&mut map).unwrap_err();
        assert!(matches!(err, NoiseError::MissingSource));
        assert_eq!((map.width(), map.height()), (2, 2));
        assert!(map.as_slice().iter().all(|&v| v == 7.0));
    }

    #[test]
    fn unwired_graph_is_rejected() {
        let mut b = NoiseMapBuilderPlane::new(2, 2);
        b.set_source_module(module(Combiner::unconnected(CombineOp::Add)));
        let err = b.build(&mut NoiseMap::new()).unwrap_err();
        assert!(matches!(err, NoiseError::MissingInput { .. }));
    }

    #[test]
    fn two_dimensional_source_is_rejected() {
        let mut b = NoiseMapBuilderPlane::new(2, 2);
        b.set_source_module(module(Simplex::new(1)));
        let err = b.build(&mut NoiseMap::new()).unwrap_err();
        assert!(matches!(err, NoiseError::UnsupportedDimension { .. }));
    }

    #[test]
    fn cancel_stops_before_next_row() {
        let token = CancelToken::new();
        let trigger = token.clone();
        let mut b = builder(0.25);
        b.set_cancel_token(token);
        b.set_callback(Box::new(move |row| {
            if row == 1 {
                trigger.cancel();
            }
        }));

        let mut map = NoiseMap::new();
        let err = b.build(&mut map).unwrap_err();
        assert!(matches!(err, NoiseError::Cancelled { row: 2 }));
        // Completed rows stay written
        assert_eq!(map.get_value(3, 1), 0.25);
        assert_eq!(map.get_value(0, 2), 0.0);
    }

    #[test]
    fn cancelled_token_prevents_any_write() {
        let token = CancelToken::new();
        token.cancel();
        let mut b = builder(1.0);
        b.set_cancel_token(token);

        let mut map = NoiseMap::new();
        let err = b.build(&mut map).unwrap_err();
        assert!(matches!(err, NoiseError::Cancelled { row: 0 }));
        assert_eq!(map.width(), 0);
    }

    #[test]
    fn shape_filter_gates_cells() {
        let mut shape = Image::with_size(4, 3);
        shape.clear(Color::WHITE);
        shape.set_value(0, 0, Color::BLACK);
        shape.set_value(1, 0, Color::rgb(51, 0, 0));

        let mut b = builder(1.0);
        let mut filter = ShapeFilter::new(shape);
        filter.set_constant_value(-1.0);
        b.set_filter(Box::new(filter));
        assert_eq!(b.filter().map(|f| f.constant_value()), Some(-1.0));

        let mut map = NoiseMap::new();
        b.build(&mut map).unwrap();
        assert_eq!(map.get_value(0, 0), -1.0);
        assert!((map.get_value(1, 0) - (-0.6)).abs() < 1e-6);
        assert_eq!(map.get_value(2, 0), 1.0);
        assert_eq!(map.get_value(3, 2), 1.0);
    }

    #[test]
    fn zero_size_build_succeeds() {
        let mut b = builder(0.0);
        b.set_size(0, 0);
        let mut map = NoiseMap::with_size(3, 3);
        b.build(&mut map).unwrap();
        assert_eq!(map.as_slice().len(), 0);
    }
}
