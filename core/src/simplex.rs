use crate::primitive::PrimitiveModule;
use crate::{Dimensions, Module};

const SIMPLEX_SALT: u64 = 0x1234_5678_9ABC_DEF0;

// Predefined 2D gradient directions
const GRAD2: [(i8, i8); 12] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

// 2D simplex noise primitive.
// Simplex divides space into triangles rather than squares, which gives
// better isotropy. Quality has no effect: the kernel has its own falloff.
pub struct Simplex {
    primitive: PrimitiveModule,
    perm: [u8; 512],
}

impl Simplex {
    pub fn new(seed: i32) -> Self {
        let primitive = PrimitiveModule::new(seed, PrimitiveModule::DEFAULT_QUALITY);
        Self {
            perm: primitive.permutation(SIMPLEX_SALT),
            primitive,
        }
    }

    pub fn seed(&self) -> i32 {
        self.primitive.seed
    }

    pub fn set_seed(&mut self, seed: i32) {
        self.primitive.seed = seed;
        self.perm = self.primitive.permutation(SIMPLEX_SALT);
    }

    #[inline]
    fn dot(g: (i8, i8), x: f64, y: f64) -> f64 {
        (g.0 as f64) * x + (g.1 as f64) * y
    }

    #[inline]
    fn corner(g: (i8, i8), x: f64, y: f64) -> f64 {
        // Circular radius of influence
        let t = 0.5 - x * x - y * y;
        if t > 0.0 {
            let t_sq = t * t;
            t_sq * t_sq * Self::dot(g, x, y)
        } else {
            0.0
        }
    }

    fn raw_noise(&self, xin: f64, yin: f64) -> f64 {
        const SQRT_3: f64 = 1.732_050_807_568_877_2;
        // Skew into a rhombus of equilateral triangles, and back
        const F2: f64 = 0.5 * (SQRT_3 - 1.0);
        const G2: f64 = (3.0 - SQRT_3) / 6.0;

        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i64;
        let j = (yin + s).floor() as i64;

        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // Lower or upper triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let p = &self.perm;
        let gi0 = p[ii + p[jj] as usize] as usize % 12;
        let gi1 = p[ii + i1 + p[jj + j1] as usize] as usize % 12;
        let gi2 = p[ii + 1 + p[jj + 1] as usize] as usize % 12;

        let n = Self::corner(GRAD2[gi0], x0, y0)
            + Self::corner(GRAD2[gi1], x1, y1)
            + Self::corner(GRAD2[gi2], x2, y2);

        // Scaled to roughly [-1, 1]
        (70.0 * n).clamp(-1.0, 1.0)
    }
}

impl Module for Simplex {
    fn dimensions(&self) -> Dimensions {
        Dimensions::D2
    }

    fn get2(&self, x: f64, y: f64) -> f64 {
        self.raw_noise(x, y)
    }
}
