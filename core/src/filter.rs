use crate::error::Result;
use crate::{Dimensions, Module, ModuleRef, check_connected, connected};

// Parameters shared by filter modules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterModule {
    // Multiplier applied to every input coordinate
    pub frequency: f64,
    // Frequency multiplier between successive octaves
    pub lacunarity: f64,
    // Amplitude multiplier between successive octaves
    pub persistence: f64,
    pub octave_count: usize,
}

impl FilterModule {
    pub const DEFAULT_FREQUENCY: f64 = 1.0;
    pub const DEFAULT_LACUNARITY: f64 = 2.0;
    pub const DEFAULT_PERSISTENCE: f64 = 0.5;
    pub const DEFAULT_OCTAVE_COUNT: usize = 6;
}

impl Default for FilterModule {
    fn default() -> Self {
        Self {
            frequency: Self::DEFAULT_FREQUENCY,
            lacunarity: Self::DEFAULT_LACUNARITY,
            persistence: Self::DEFAULT_PERSISTENCE,
            octave_count: Self::DEFAULT_OCTAVE_COUNT,
        }
    }
}

// Passes the source through, only scaling coordinates by the frequency.
// Adapts any module into the filter chain.
pub struct Pipe {
    source: Option<ModuleRef>,
    params: FilterModule,
}

impl Pipe {
    pub fn new(source: ModuleRef) -> Self {
        Self {
            source: Some(source),
            params: FilterModule::default(),
        }
    }

    pub fn with_frequency(source: ModuleRef, frequency: f64) -> Self {
        let mut p = Self::new(source);
        p.params.frequency = frequency;
        p
    }

    pub fn frequency(&self) -> f64 {
        self.params.frequency
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.params.frequency = frequency;
    }

    pub fn source_module(&self) -> Option<&ModuleRef> {
        self.source.as_ref()
    }

    pub fn set_source_module(&mut self, source: ModuleRef) {
        self.source = Some(source);
    }
}

impl Module for Pipe {
    fn dimensions(&self) -> Dimensions {
        self.source
            .as_ref()
            .map_or(Dimensions::all(), |s| s.dimensions())
    }

    fn get1(&self, x: f64) -> f64 {
        let f = self.params.frequency;
        connected(&self.source, "pipe").get1(x * f)
    }

    fn get2(&self, x: f64, y: f64) -> f64 {
        let f = self.params.frequency;
        connected(&self.source, "pipe").get2(x * f, y * f)
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let f = self.params.frequency;
        connected(&self.source, "pipe").get3(x * f, y * f, z * f)
    }

    fn get4(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let f = self.params.frequency;
        connected(&self.source, "pipe").get4(x * f, y * f, z * f, t * f)
    }

    fn check_inputs(&self) -> Result<()> {
        check_connected(&self.source, "pipe", "source")
    }
}

// Fractal Brownian motion: sums octaves of the source.
// Each octave multiplies the frequency by the lacunarity and the amplitude
// by the persistence; the sum is divided by the total amplitude so the
// output stays within the source's range.
pub struct SumFractal {
    source: Option<ModuleRef>,
    params: FilterModule,
}

impl SumFractal {
    pub fn new(source: ModuleRef) -> Self {
        Self {
            source: Some(source),
            params: FilterModule::default(),
        }
    }

    pub fn with_params(source: ModuleRef, params: FilterModule) -> Self {
        Self {
            source: Some(source),
            params,
        }
    }

    pub fn params(&self) -> &FilterModule {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut FilterModule {
        &mut self.params
    }

    pub fn set_source_module(&mut self, source: ModuleRef) {
        self.source = Some(source);
    }

    fn accumulate(&self, mut sample: impl FnMut(f64) -> f64) -> f64 {
        let mut amplitude = 1.0; // weight of the current octave
        let mut freq = self.params.frequency;
        let mut total = 0.0;
        let mut max_amp = 0.0;

        for _ in 0..self.params.octave_count {
            total += sample(freq) * amplitude;
            max_amp += amplitude;
            amplitude *= self.params.persistence;
            freq *= self.params.lacunarity;
        }

        if max_amp > 0.0 { total / max_amp } else { 0.0 }
    }
}

impl Module for SumFractal {
    fn dimensions(&self) -> Dimensions {
        self.source
            .as_ref()
            .map_or(Dimensions::all(), |s| s.dimensions())
    }

    fn get1(&self, x: f64) -> f64 {
        let s = connected(&self.source, "sum fractal");
        self.accumulate(|f| s.get1(x * f))
    }

    fn get2(&self, x: f64, y: f64) -> f64 {
        let s = connected(&self.source, "sum fractal");
        self.accumulate(|f| s.get2(x * f, y * f))
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let s = connected(&self.source, "sum fractal");
        self.accumulate(|f| s.get3(x * f, y * f, z * f))
    }

    fn get4(&self, x: f64, y: f64, z: f64, t: f64) -> f64 {
        let s = connected(&self.source, "sum fractal");
        self.accumulate(|f| s.get4(x * f, y * f, z * f, t * f))
    }

    fn check_inputs(&self) -> Result<()> {
        check_connected(&self.source, "sum fractal", "source")
    }
}
