use serde::{Deserialize, Serialize};

use crate::utils::{s_curve3, s_curve5};
use crate::{Dimensions, Module};

// Interpolation quality used by coherent-noise kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoiseQuality {
    // Linear interpolation, visible creases at lattice boundaries
    Fast,
    // Cubic s-curve
    #[default]
    Standard,
    // Quintic s-curve, continuous second derivative
    Best,
}

impl NoiseQuality {
    #[inline]
    pub fn curve(self, t: f64) -> f64 {
        match self {
            NoiseQuality::Fast => t,
            NoiseQuality::Standard => s_curve3(t),
            NoiseQuality::Best => s_curve5(t),
        }
    }
}

// Seed + quality shared by every noise primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrimitiveModule {
    pub seed: i32,
    pub quality: NoiseQuality,
}

impl PrimitiveModule {
    pub const DEFAULT_SEED: i32 = 0;
    pub const DEFAULT_QUALITY: NoiseQuality = NoiseQuality::Standard;

    pub fn new(seed: i32, quality: NoiseQuality) -> Self {
        Self { seed, quality }
    }

    // Builds a pseudorandom permutation table of size 256, duplicated into 512.
    // `salt` keeps different kernels from sharing a table for the same seed.
    pub(crate) fn permutation(&self, salt: u64) -> [u8; 512] {
        let mut p: Vec<u8> = (0..256).map(|i| i as u8).collect();
        // xorshift, seeded from the sign-extended seed
        let mut x = (self.seed as i64 as u64) ^ salt;
        if x == 0 {
            x = salt.rotate_left(17) | 1;
        }
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        };
        // Fisher–Yates shuffle p[0..256]
        for i in (1..256).rev() {
            let j = (rng() % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }
        // Duplicated so lookups never need `% 256`
        let mut perm = [0u8; 512];
        for (i, v) in perm.iter_mut().enumerate() {
            *v = p[i & 255];
        }
        perm
    }
}

// Outputs the same value everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

impl Module for Constant {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn get1(&self, _x: f64) -> f64 {
        self.value
    }

    fn get2(&self, _x: f64, _y: f64) -> f64 {
        self.value
    }

    fn get3(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.value
    }

    fn get4(&self, _x: f64, _y: f64, _z: f64, _t: f64) -> f64 {
        self.value
    }
}
