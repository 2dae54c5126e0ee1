// Shared math helpers for modules, models and renderers

pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

// Linear interpolation
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

// Byte channel interpolation, truncated toward zero
#[inline]
pub fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t) as u8
}

// Cubic s-curve: 3t^2 - 2t^3
#[inline]
pub fn s_curve3(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

// Quintic s-curve as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
// First and second derivatives are zero at t=0 and t=1
#[inline]
pub fn s_curve5(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

// Converts (latitude, longitude) in degrees into a point on the unit sphere
pub fn lat_lon_to_xyz(lat: f64, lon: f64) -> (f64, f64, f64) {
    let r = (lat * DEG_TO_RAD).cos();
    let x = r * (lon * DEG_TO_RAD).cos();
    let y = (lat * DEG_TO_RAD).sin();
    let z = r * (lon * DEG_TO_RAD).sin();
    (x, y, z)
}
