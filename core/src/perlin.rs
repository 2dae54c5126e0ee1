use crate::primitive::{NoiseQuality, PrimitiveModule};
use crate::utils::lerp;
use crate::{Dimensions, Module};

const PERLIN_SALT: u64 = 0xAABB_CCDD_EEFF_1122;

// Gradient (Perlin) noise primitive.
// Lower arities sample the 3D field along the remaining axes at 0.
pub struct Perlin {
    primitive: PrimitiveModule,
    perm: [u8; 512], // permutation table (256 duplicated)
}

impl Perlin {
    pub fn new(seed: i32) -> Self {
        Self::with_quality(seed, PrimitiveModule::DEFAULT_QUALITY)
    }

    pub fn with_quality(seed: i32, quality: NoiseQuality) -> Self {
        let primitive = PrimitiveModule::new(seed, quality);
        Self {
            perm: primitive.permutation(PERLIN_SALT),
            primitive,
        }
    }

    pub fn seed(&self) -> i32 {
        self.primitive.seed
    }

    // Rebuilds the permutation table
    pub fn set_seed(&mut self, seed: i32) {
        self.primitive.seed = seed;
        self.perm = self.primitive.permutation(PERLIN_SALT);
    }

    pub fn quality(&self) -> NoiseQuality {
        self.primitive.quality
    }

    pub fn set_quality(&mut self, quality: NoiseQuality) {
        self.primitive.quality = quality;
    }

    // Picks one of 12 gradient directions from the low 4 bits of the hash
    #[inline]
    fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
        let h = hash & 0xF;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        let sign_u = if (h & 1) == 0 { u } else { -u };
        let sign_v = if (h & 2) == 0 { v } else { -v };
        sign_u + sign_v
    }

    #[inline]
    fn hash(&self, x: usize, y: usize, z: usize) -> u8 {
        let p = &self.perm;
        p[p[p[x] as usize + y] as usize + z]
    }

    // Raw single-octave noise at (x, y, z)
    fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        // Unit cube that contains the point
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let zi = (z.floor() as i64 & 255) as usize;
        // Relative coordinates within the cube
        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();

        let quality = self.primitive.quality;
        let u = quality.curve(xf);
        let v = quality.curve(yf);
        let w = quality.curve(zf);

        let x1 = lerp(
            Self::grad(self.hash(xi, yi, zi), xf, yf, zf),
            Self::grad(self.hash(xi + 1, yi, zi), xf - 1.0, yf, zf),
            u,
        );
        let x2 = lerp(
            Self::grad(self.hash(xi, yi + 1, zi), xf, yf - 1.0, zf),
            Self::grad(self.hash(xi + 1, yi + 1, zi), xf - 1.0, yf - 1.0, zf),
            u,
        );
        let y1 = lerp(x1, x2, v);

        let x3 = lerp(
            Self::grad(self.hash(xi, yi, zi + 1), xf, yf, zf - 1.0),
            Self::grad(self.hash(xi + 1, yi, zi + 1), xf - 1.0, yf, zf - 1.0),
            u,
        );
        let x4 = lerp(
            Self::grad(self.hash(xi, yi + 1, zi + 1), xf, yf - 1.0, zf - 1.0),
            Self::grad(self.hash(xi + 1, yi + 1, zi + 1), xf - 1.0, yf - 1.0, zf - 1.0),
            u,
        );
        let y2 = lerp(x3, x4, v);

        // Final interpolation along z; the peak slightly overshoots ±1
        lerp(y1, y2, w).clamp(-1.0, 1.0)
    }
}

impl Module for Perlin {
    fn dimensions(&self) -> Dimensions {
        Dimensions::D1 | Dimensions::D2 | Dimensions::D3
    }

    fn get1(&self, x: f64) -> f64 {
        self.noise(x, 0.0, 0.0)
    }

    fn get2(&self, x: f64, y: f64) -> f64 {
        self.noise(x, y, 0.0)
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise(x, y, z)
    }
}
