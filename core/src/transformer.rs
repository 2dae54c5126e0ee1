use crate::error::Result;
use crate::utils::DEG_TO_RAD;
use crate::{Dimensions, Module, ModuleRef, check_connected, connected};

// Transformers remap the input coordinate, then delegate to a 3D source

fn source_dimensions(source: &Option<ModuleRef>) -> Dimensions {
    source
        .as_ref()
        .map_or(Dimensions::D3, |s| s.dimensions() & Dimensions::D3)
}

// Rotates the input coordinate around the origin before sampling the source.
// The coordinate system is left-handed: x right, y up, z inward.
pub struct RotatePoint {
    source: Option<ModuleRef>,
    angles: [f64; 3], // degrees around x, y, z
    matrix: [[f64; 3]; 3],
}

impl RotatePoint {
    pub fn new(source: ModuleRef) -> Self {
        Self::with_angles(source, 0.0, 0.0, 0.0)
    }

    pub fn with_angles(source: ModuleRef, x_angle: f64, y_angle: f64, z_angle: f64) -> Self {
        let mut r = Self {
            source: Some(source),
            angles: [0.0; 3],
            matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        };
        r.set_angles(x_angle, y_angle, z_angle);
        r
    }

    pub fn source_module(&self) -> Option<&ModuleRef> {
        self.source.as_ref()
    }

    pub fn set_source_module(&mut self, source: ModuleRef) {
        self.source = Some(source);
    }

    pub fn x_angle(&self) -> f64 {
        self.angles[0]
    }

    pub fn y_angle(&self) -> f64 {
        self.angles[1]
    }

    pub fn z_angle(&self) -> f64 {
        self.angles[2]
    }

    pub fn set_x_angle(&mut self, angle: f64) {
        self.set_angles(angle, self.angles[1], self.angles[2]);
    }

    pub fn set_y_angle(&mut self, angle: f64) {
        self.set_angles(self.angles[0], angle, self.angles[2]);
    }

    pub fn set_z_angle(&mut self, angle: f64) {
        self.set_angles(self.angles[0], self.angles[1], angle);
    }

    /// Sets the rotation around all three axes, in degrees, and recomputes
    /// the rotation matrix. Sampling never touches the trigonometry.
    pub fn set_angles(&mut self, x_angle: f64, y_angle: f64, z_angle: f64) {
        let (x_sin, x_cos) = (x_angle * DEG_TO_RAD).sin_cos();
        let (y_sin, y_cos) = (y_angle * DEG_TO_RAD).sin_cos();
        let (z_sin, z_cos) = (z_angle * DEG_TO_RAD).sin_cos();

        // Rows produce nx, ny, nz; columns multiply x, y, z
        self.matrix = [
            [
                y_sin * x_sin * z_sin + y_cos * z_cos,
                x_cos * z_sin,
                y_sin * z_cos - y_cos * x_sin * z_sin,
            ],
            [
                y_sin * x_sin * z_cos - y_cos * z_sin,
                x_cos * z_cos,
                -y_cos * x_sin * z_cos - y_sin * z_sin,
            ],
            [-y_sin * x_cos, x_sin, y_cos * x_cos],
        ];
        self.angles = [x_angle, y_angle, z_angle];
    }

    fn rotate(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let m = &self.matrix;
        (
            m[0][0] * x + m[0][1] * y + m[0][2] * z,
            m[1][0] * x + m[1][1] * y + m[1][2] * z,
            m[2][0] * x + m[2][1] * y + m[2][2] * z,
        )
    }
}

impl Module for RotatePoint {
    fn dimensions(&self) -> Dimensions {
        source_dimensions(&self.source)
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (nx, ny, nz) = self.rotate(x, y, z);
        connected(&self.source, "rotate point").get3(nx, ny, nz)
    }

    fn check_inputs(&self) -> Result<()> {
        check_connected(&self.source, "rotate point", "source")
    }
}

// Moves the input coordinate by a fixed offset
pub struct TranslatePoint {
    source: Option<ModuleRef>,
    pub x_translate: f64,
    pub y_translate: f64,
    pub z_translate: f64,
}

impl TranslatePoint {
    pub fn new(source: ModuleRef, x: f64, y: f64, z: f64) -> Self {
        Self {
            source: Some(source),
            x_translate: x,
            y_translate: y,
            z_translate: z,
        }
    }

    pub fn set_source_module(&mut self, source: ModuleRef) {
        self.source = Some(source);
    }
}

impl Module for TranslatePoint {
    fn dimensions(&self) -> Dimensions {
        source_dimensions(&self.source)
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        connected(&self.source, "translate point").get3(
            x + self.x_translate,
            y + self.y_translate,
            z + self.z_translate,
        )
    }

    fn check_inputs(&self) -> Result<()> {
        check_connected(&self.source, "translate point", "source")
    }
}

// Scales the input coordinate per axis
pub struct ScalePoint {
    source: Option<ModuleRef>,
    pub x_scale: f64,
    pub y_scale: f64,
    pub z_scale: f64,
}

impl ScalePoint {
    pub fn new(source: ModuleRef, x: f64, y: f64, z: f64) -> Self {
        Self {
            source: Some(source),
            x_scale: x,
            y_scale: y,
            z_scale: z,
        }
    }

    pub fn uniform(source: ModuleRef, scale: f64) -> Self {
        Self::new(source, scale, scale, scale)
    }

    pub fn set_source_module(&mut self, source: ModuleRef) {
        self.source = Some(source);
    }
}

impl Module for ScalePoint {
    fn dimensions(&self) -> Dimensions {
        source_dimensions(&self.source)
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        connected(&self.source, "scale point").get3(
            x * self.x_scale,
            y * self.y_scale,
            z * self.z_scale,
        )
    }

    fn check_inputs(&self) -> Result<()> {
        check_connected(&self.source, "scale point", "source")
    }
}

// Domain warping as a graph node: each axis is offset by the output of its
// own displacement module before the source is sampled
pub struct Displace {
    source: Option<ModuleRef>,
    x_displace: Option<ModuleRef>,
    y_displace: Option<ModuleRef>,
    z_displace: Option<ModuleRef>,
}

impl Displace {
    pub fn new(source: ModuleRef, x: ModuleRef, y: ModuleRef, z: ModuleRef) -> Self {
        Self {
            source: Some(source),
            x_displace: Some(x),
            y_displace: Some(y),
            z_displace: Some(z),
        }
    }

    pub fn set_source_module(&mut self, source: ModuleRef) {
        self.source = Some(source);
    }

    pub fn set_displace_modules(&mut self, x: ModuleRef, y: ModuleRef, z: ModuleRef) {
        self.x_displace = Some(x);
        self.y_displace = Some(y);
        self.z_displace = Some(z);
    }
}

impl Module for Displace {
    fn dimensions(&self) -> Dimensions {
        [&self.x_displace, &self.y_displace, &self.z_displace]
            .into_iter()
            .fold(source_dimensions(&self.source), |acc, m| {
                acc & source_dimensions(m)
            })
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let dx = connected(&self.x_displace, "displace").get3(x, y, z);
        let dy = connected(&self.y_displace, "displace").get3(x, y, z);
        let dz = connected(&self.z_displace, "displace").get3(x, y, z);
        connected(&self.source, "displace").get3(x + dx, y + dy, z + dz)
    }

    fn check_inputs(&self) -> Result<()> {
        check_connected(&self.source, "displace", "source")?;
        check_connected(&self.x_displace, "displace", "x displace")?;
        check_connected(&self.y_displace, "displace", "y displace")?;
        check_connected(&self.z_displace, "displace", "z displace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Constant;
    use crate::{Perlin, module};

    // Reports the x coordinate it was sampled at
    struct ProbeX;

    impl Module for ProbeX {
        fn dimensions(&self) -> Dimensions {
            Dimensions::D3
        }

        fn get3(&self, x: f64, _y: f64, _z: f64) -> f64 {
            x
        }
    }

    #[test]
    fn zero_rotation_is_identity() {
        let p = module(Perlin::new(4));
        let r = RotatePoint::new(p.clone());
        let a = p.get3(0.3, 1.7, -2.2);
        let b = r.get3(0.3, 1.7, -2.2);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn rotation_about_y_moves_x_onto_z() {
        let r = RotatePoint::with_angles(module(ProbeX), 0.0, 90.0, 0.0);
        // (0, 0, 1) is rotated onto the x axis
        assert!((r.get3(0.0, 0.0, 1.0) - 1.0).abs() < 1e-12);
        assert!(r.get3(1.0, 0.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_preserves_length() {
        let mut r = RotatePoint::new(module(Constant::new(0.0)));
        r.set_angles(30.0, 45.0, 60.0);
        let (x, y, z) = r.rotate(1.0, 2.0, 3.0);
        let len = (x * x + y * y + z * z).sqrt();
        assert!((len - 14f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn per_axis_setters_keep_other_angles() {
        let mut r = RotatePoint::new(module(Constant::new(0.0)));
        r.set_angles(10.0, 20.0, 30.0);
        r.set_y_angle(45.0);
        assert_eq!((r.x_angle(), r.y_angle(), r.z_angle()), (10.0, 45.0, 30.0));
    }

    #[test]
    fn translate_and_scale_remap_input() {
        let t = TranslatePoint::new(module(ProbeX), 2.5, 0.0, 0.0);
        assert_eq!(t.get3(1.0, 0.0, 0.0), 3.5);
        let s = ScalePoint::uniform(module(ProbeX), 4.0);
        assert_eq!(s.get3(1.5, 0.0, 0.0), 6.0);
    }

    #[test]
    fn displace_offsets_each_axis() {
        let d = Displace::new(
            module(ProbeX),
            module(Constant::new(0.5)),
            module(Constant::new(9.0)),
            module(Constant::new(9.0)),
        );
        assert_eq!(d.get3(1.0, 0.0, 0.0), 1.5);
        assert!(d.check_inputs().is_ok());
        assert_eq!(d.dimensions(), Dimensions::D3);
    }

    #[test]
    fn transformers_only_expose_3d() {
        let r = RotatePoint::new(module(Constant::new(1.0)));
        assert_eq!(r.dimensions(), Dimensions::D3);
    }
}
