// Renderers turn a finished noise map into elevation values or colors
mod heightmap;
mod image;

pub use self::heightmap::{Elevation, HeightBounds, HeightmapRenderer};
pub use self::image::{ImageRenderer, to_gray_image, to_rgba_image};
