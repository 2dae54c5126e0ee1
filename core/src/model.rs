// Models adapt a lower-dimensional parametric domain onto the 3D coordinate
// space of a module
use crate::utils::lat_lon_to_xyz;
use crate::ModuleRef;

// Flat surface: (x, z) with y fixed at 0
#[derive(Clone)]
pub struct Plane {
    source: ModuleRef,
}

impl Plane {
    pub fn new(source: ModuleRef) -> Self {
        Self { source }
    }

    pub fn source_module(&self) -> &ModuleRef {
        &self.source
    }

    pub fn get_value(&self, x: f64, z: f64) -> f64 {
        self.source.get3(x, 0.0, z)
    }
}

// Unit sphere centered on the origin, addressed by latitude and longitude
// in degrees
#[derive(Clone)]
pub struct Sphere {
    source: ModuleRef,
}

impl Sphere {
    pub fn new(source: ModuleRef) -> Self {
        Self { source }
    }

    pub fn source_module(&self) -> &ModuleRef {
        &self.source
    }

    pub fn get_value(&self, lat: f64, lon: f64) -> f64 {
        let (x, y, z) = lat_lon_to_xyz(lat, lon);
        self.source.get3(x, y, z)
    }
}

/// Samples noise along a line segment, typically to displace roads and
/// rivers.
///
/// `p = 0` is the start point and `p = 1` the end point. With attenuation
/// on (the default) the output is scaled by `4·p·(1-p)` so it fades to zero
/// at both ends. With attenuation off, `p` may leave `[0, 1]` and the line
/// is extrapolated.
#[derive(Clone)]
pub struct Line {
    source: ModuleRef,
    attenuate: bool,
    start: [f64; 3],
    end: [f64; 3],
}

impl Line {
    pub fn new(source: ModuleRef) -> Self {
        Self {
            source,
            attenuate: true,
            start: [0.0; 3],
            end: [0.0; 3],
        }
    }

    pub fn attenuate(&self) -> bool {
        self.attenuate
    }

    pub fn set_attenuate(&mut self, attenuate: bool) {
        self.attenuate = attenuate;
    }

    pub fn set_start_point(&mut self, x: f64, y: f64, z: f64) {
        self.start = [x, y, z];
    }

    pub fn set_end_point(&mut self, x: f64, y: f64, z: f64) {
        self.end = [x, y, z];
    }

    pub fn get_value(&self, p: f64) -> f64 {
        let at = |i: usize| (self.end[i] - self.start[i]) * p + self.start[i];
        let value = self.source.get3(at(0), at(1), at(2));

        if self.attenuate {
            p * (1.0 - p) * 4.0 * value
        } else {
            value
        }
    }
}
