use noisemap::{Map2D, NoiseMap, NoiseMapBuilder, NoiseMapBuilderPlane, Perlin, SumFractal, module};

fn main() {
    // 129×129 fractal Perlin over [0, 4) × [0, 4), seed 2025
    let mut builder = NoiseMapBuilderPlane::new(129, 129);
    builder.set_source_module(module(SumFractal::new(module(Perlin::new(2025)))));
    builder.set_bounds(0.0, 4.0, 0.0, 4.0).unwrap();

    let mut map = NoiseMap::new();
    builder.build(&mut map).unwrap();

    // Print the top-left 16×16 corner of the map
    for y in 0..16 {
        for x in 0..16 {
            print!("{:>6.3} ", map.get_value(x, y));
        }
        println!();
    }
}
