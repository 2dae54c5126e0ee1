use std::path::Path;

use noisemap::renderer::to_gray_image;
use noisemap::{
    Heightmap8, HeightmapRenderer, NoiseMap, NoiseMapBuilder, NoiseMapBuilderSphere, Perlin,
    SumFractal, module,
};

fn main() {
    // Equirectangular 2:1 map of the whole globe
    let mut builder = NoiseMapBuilderSphere::new(1024, 512);
    builder.set_source_module(module(SumFractal::new(module(Perlin::new(7)))));

    let mut noise = NoiseMap::new();
    builder.build(&mut noise).unwrap();

    let mut renderer = HeightmapRenderer::new();
    renderer.exact_fit(&noise);
    let mut heights = Heightmap8::new();
    renderer.render(&noise, &mut heights).unwrap();

    let path = Path::new("globe_heightmap.png");
    to_gray_image(&heights).save(path).unwrap();
    println!("Saved globe heightmap to {:?}", path);
}
