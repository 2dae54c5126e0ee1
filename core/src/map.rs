use crate::color::Color;

/// Two-dimensional grid consumed and produced by builders and renderers.
///
/// Builders and renderers only talk to this trait, so external storage
/// (a native pixel surface, for instance) can stand in for `DataMap`.
pub trait Map2D<T: Copy> {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    // Border value for out-of-range coordinates
    fn get_value(&self, x: usize, y: usize) -> T;

    // Out-of-range writes are ignored
    fn set_value(&mut self, x: usize, y: usize, value: T);

    // Resizes the grid; prior contents are not preserved
    fn set_size(&mut self, width: usize, height: usize);

    fn clear(&mut self, value: T);

    // Lowest and highest values; an empty map yields a pair of defaults
    fn min_max(&self) -> (T, T);
}

// Row-major grid with a fixed border value for out-of-bounds reads
#[derive(Debug, Clone, PartialEq)]
pub struct DataMap<T> {
    width: usize,
    height: usize,
    border_value: T,
    data: Vec<T>,
}

pub type NoiseMap = DataMap<f32>;
pub type Heightmap8 = DataMap<u8>;
pub type Heightmap16 = DataMap<u16>;
pub type Heightmap32 = DataMap<f32>;
pub type Image = DataMap<Color>;

impl<T: Copy + Default> DataMap<T> {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            border_value: T::default(),
            data: Vec::new(),
        }
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            border_value: T::default(),
            data: vec![T::default(); width * height],
        }
    }

    pub fn border_value(&self) -> T {
        self.border_value
    }

    pub fn set_border_value(&mut self, value: T) {
        self.border_value = value;
    }

    // Flattened row-major view
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.width.max(1)).take(self.height)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl<T: Copy + Default> Default for DataMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default + PartialOrd> Map2D<T> for DataMap<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_value(&self, x: usize, y: usize) -> T {
        self.index(x, y)
            .map_or(self.border_value, |i| self.data[i])
    }

    fn set_value(&mut self, x: usize, y: usize, value: T) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = value;
        }
    }

    fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height, T::default());
    }

    fn clear(&mut self, value: T) {
        self.data.fill(value);
    }

    fn min_max(&self) -> (T, T) {
        let Some(&first) = self.data.first() else {
            return (T::default(), T::default());
        };
        self.data.iter().fold((first, first), |(min, max), &v| {
            (
                if v < min { v } else { min },
                if v > max { v } else { max },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_return_border() {
        let mut m = NoiseMap::with_size(2, 2);
        m.set_border_value(-9.0);
        m.set_value(1, 1, 0.5);
        assert_eq!(m.get_value(1, 1), 0.5);
        assert_eq!(m.get_value(2, 0), -9.0);
        assert_eq!(m.get_value(0, 7), -9.0);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut m = Heightmap8::with_size(2, 2);
        m.set_value(5, 5, 7);
        assert!(m.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn heightmap8_min_max() {
        let empty = Heightmap8::new();
        assert_eq!(empty.min_max(), (0, 0));

        let mut m = Heightmap8::with_size(3, 1);
        for (x, v) in [10u8, 5, 200].into_iter().enumerate() {
            m.set_value(x, 0, v);
        }
        assert_eq!(m.min_max(), (5, 200));
    }

    #[test]
    fn set_size_discards_contents() {
        let mut m = Heightmap16::with_size(2, 2);
        m.clear(42);
        m.set_size(3, 2);
        assert_eq!((m.width(), m.height()), (3, 2));
        assert_eq!(m.as_slice().len(), 6);
        assert!(m.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn rows_are_row_major() {
        let mut m = NoiseMap::with_size(3, 2);
        m.set_value(2, 1, 1.0);
        let rows: Vec<&[f32]> = m.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[0.0, 0.0, 1.0]);
        assert_eq!(NoiseMap::new().rows().count(), 0);
    }
}
