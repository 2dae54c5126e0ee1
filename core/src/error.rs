use crate::Dimensions;

#[derive(Debug, thiserror::Error)]
pub enum NoiseError {
    #[error("incoherent bounds: {what}")]
    IncoherentBounds { what: &'static str },

    #[error("a source module must be provided")]
    MissingSource,

    #[error("{module} has no {input} module connected")]
    MissingInput {
        module: &'static str,
        input: &'static str,
    },

    #[error("source module does not support {required:?} (supports {supported:?})")]
    UnsupportedDimension {
        required: Dimensions,
        supported: Dimensions,
    },

    #[error("incoherent noise map size ({width}, {height})")]
    EmptyNoiseMap { width: usize, height: usize },

    #[error("cannot insert gradient point at {position}: each point requires a unique position")]
    DuplicateGradientPosition { position: f32 },

    #[error("gradient point position must be finite, got {position}")]
    NonFiniteGradientPosition { position: f32 },

    #[error("build cancelled before row {row}")]
    Cancelled { row: usize },
}

pub type Result<T> = std::result::Result<T, NoiseError>;
