use ::image::{GrayImage, Luma, Rgba, RgbaImage};
use tracing::debug;

use crate::color::Color;
use crate::error::{NoiseError, Result};
use crate::gradient::GradientColor;
use crate::map::{Heightmap8, Image, Map2D};

// Colorizes a noise map by looking every value up in a gradient
#[derive(Debug, Clone, Default)]
pub struct ImageRenderer {
    gradient: GradientColor,
}

impl ImageRenderer {
    pub fn new(gradient: GradientColor) -> Self {
        Self { gradient }
    }

    pub fn gradient(&self) -> &GradientColor {
        &self.gradient
    }

    pub fn set_gradient(&mut self, gradient: GradientColor) {
        self.gradient = gradient;
    }

    pub fn render(&self, noise: &dyn Map2D<f32>, dest: &mut dyn Map2D<Color>) -> Result<()> {
        let (width, height) = (noise.width(), noise.height());
        if width == 0 || height == 0 {
            return Err(NoiseError::EmptyNoiseMap { width, height });
        }
        debug!(width, height, points = self.gradient.len(), "rendering color image");

        dest.set_size(width, height);
        for y in 0..height {
            for x in 0..width {
                dest.set_value(x, y, self.gradient.get_color(noise.get_value(x, y)));
            }
        }
        Ok(())
    }
}

// Copies an image into an `image` crate buffer, ready to be saved
pub fn to_rgba_image(src: &Image) -> RgbaImage {
    let mut img = RgbaImage::new(src.width() as u32, src.height() as u32);
    for (y, row) in src.rows().enumerate() {
        for (x, c) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Rgba([c.red, c.green, c.blue, c.alpha]));
        }
    }
    img
}

pub fn to_gray_image(src: &Heightmap8) -> GrayImage {
    let mut img = GrayImage::new(src.width() as u32, src.height() as u32);
    for (y, row) in src.rows().enumerate() {
        for (x, &h) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Luma([h]));
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::NoiseMap;

    #[test]
    fn colors_follow_gradient() {
        let mut noise = NoiseMap::with_size(3, 1);
        noise.set_value(0, 0, -1.0);
        noise.set_value(1, 0, 0.0);
        noise.set_value(2, 0, 2.0);

        let renderer = ImageRenderer::new(GradientColor::grayscale());
        let mut img = Image::new();
        renderer.render(&noise, &mut img).unwrap();
        assert_eq!(img.get_value(0, 0), Color::BLACK);
        assert_eq!(img.get_value(1, 0), Color::rgb(127, 127, 127));
        assert_eq!(img.get_value(2, 0), Color::WHITE);
    }

    #[test]
    fn empty_gradient_renders_transparent() {
        let noise = NoiseMap::with_size(2, 2);
        let mut img = Image::new();
        ImageRenderer::default().render(&noise, &mut img).unwrap();
        assert!(img.as_slice().iter().all(|&c| c == Color::TRANSPARENT));
    }

    #[test]
    fn empty_noise_map_is_rejected() {
        let err = ImageRenderer::default()
            .render(&NoiseMap::new(), &mut Image::new())
            .unwrap_err();
        assert!(matches!(err, NoiseError::EmptyNoiseMap { .. }));
    }

    #[test]
    fn buffers_keep_layout() {
        let mut src = Image::with_size(2, 3);
        src.set_value(1, 2, Color::new(1, 2, 3, 4));
        let img = to_rgba_image(&src);
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(img.get_pixel(1, 2), &Rgba([1, 2, 3, 4]));

        let mut h = Heightmap8::with_size(3, 1);
        h.set_value(2, 0, 200);
        assert_eq!(to_gray_image(&h).get_pixel(2, 0), &Luma([200]));
    }
}
