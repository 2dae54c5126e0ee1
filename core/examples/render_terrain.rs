use std::path::Path;

use noisemap::renderer::to_rgba_image;
use noisemap::{
    Color, GradientColor, Image, ImageRenderer, Map2D, NoiseMap, NoiseMapBuilder,
    NoiseMapBuilderPlane, Perlin, RotatePoint, SumFractal, module,
};

// Lambertian hillshade of a noise map, light from the north-west at 45°
// `z_scale` adjusts vertical exaggeration
fn hillshade(map: &NoiseMap, z_scale: f32) -> NoiseMap {
    let (w, h) = (map.width(), map.height());
    let mut shade = NoiseMap::with_size(w, h);
    shade.clear(1.0);
    let azimuth = std::f32::consts::PI / 4.0;
    let altitude = std::f32::consts::PI / 4.0;
    let (sin_alt, cos_alt) = altitude.sin_cos();
    let (lx, ly, lz) = (azimuth.cos() * cos_alt, azimuth.sin() * cos_alt, sin_alt);

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let dzdx = (map.get_value(x + 1, y) - map.get_value(x - 1, y)) / 2.0 * z_scale;
            let dzdy = (map.get_value(x, y + 1) - map.get_value(x, y - 1)) / 2.0 * z_scale;
            let len = (dzdx * dzdx + dzdy * dzdy + 1.0).sqrt();
            let dot = (-dzdx * lx - dzdy * ly + lz) / len;
            shade.set_value(x, y, dot.max(0.0));
        }
    }
    shade
}

fn main() {
    let size = 513;
    let fractal = module(SumFractal::new(module(Perlin::new(2025))));
    let source = module(RotatePoint::with_angles(fractal, 0.0, 30.0, 0.0));

    let mut builder = NoiseMapBuilderPlane::new(size, size);
    builder.set_source_module(source);
    builder.set_bounds(0.0, 6.0, 0.0, 6.0).unwrap();
    builder.set_seamless(true);
    builder.set_callback(Box::new(move |row| {
        if row % 128 == 0 {
            println!("row {row}/{size}");
        }
    }));

    let mut noise = NoiseMap::new();
    builder.build(&mut noise).unwrap();

    let mut colors = Image::new();
    ImageRenderer::new(GradientColor::terrain())
        .render(&noise, &mut colors)
        .unwrap();

    // Darken each pixel by its hillshade
    let shade = hillshade(&noise, 40.0);
    for y in 0..size {
        for x in 0..size {
            let light = (shade.get_value(x, y) * 0.5 + 0.5).clamp(0.0, 1.0);
            let c = colors.get_value(x, y);
            colors.set_value(x, y, Color::lerp24(Color::BLACK, c, light));
        }
    }

    let path = Path::new("terrain.png");
    to_rgba_image(&colors).save(path).unwrap();
    println!("Saved terrain image to {:?}", path);
}
