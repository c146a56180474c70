use glam::Vec2;

/// Height provider for the scene's terrain surface. Returns None where no
/// elevation data exists; callers treat that as no constraint.
pub trait TerrainSource {
    fn height_at(&self, xy: Vec2) -> Option<f32>;
}

/// Terrain with a single uniform elevation
#[derive(Debug, Clone, Copy)]
pub struct FlatTerrain {
    pub elevation: f32,
}

impl FlatTerrain {
    pub fn new(elevation: f32) -> Self {
        Self { elevation }
    }
}

impl TerrainSource for FlatTerrain {
    fn height_at(&self, _xy: Vec2) -> Option<f32> {
        Some(self.elevation)
    }
}

/// Regular height grid sampled bilinearly. The valid domain is half-open;
/// queries outside it return None.
#[derive(Debug, Clone)]
pub struct GridTerrain {
    origin: Vec2,
    cell_size: f32,
    cols: usize,
    rows: usize,
    heights: Vec<f32>,
}

impl GridTerrain {
    pub fn new(origin: Vec2, cell_size: f32, cols: usize, rows: usize, heights: Vec<f32>) -> Self {
        debug_assert_eq!(heights.len(), cols * rows);
        Self {
            origin,
            cell_size,
            cols,
            rows,
            heights,
        }
    }

    /// Build a grid by sampling a height function at every vertex
    pub fn from_fn(
        origin: Vec2,
        cell_size: f32,
        cols: usize,
        rows: usize,
        f: impl Fn(Vec2) -> f32,
    ) -> Self {
        let mut heights = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let xy = origin + Vec2::new(col as f32, row as f32) * cell_size;
                heights.push(f(xy));
            }
        }
        Self::new(origin, cell_size, cols, rows, heights)
    }

    fn sample(&self, col: usize, row: usize) -> f32 {
        self.heights[row * self.cols + col]
    }
}

impl TerrainSource for GridTerrain {
    fn height_at(&self, xy: Vec2) -> Option<f32> {
        let rel = (xy - self.origin) / self.cell_size;
        if rel.x < 0.0 || rel.y < 0.0 {
            return None;
        }

        let col = rel.x.floor() as usize;
        let row = rel.y.floor() as usize;
        if col + 1 >= self.cols || row + 1 >= self.rows {
            return None;
        }

        let fx = rel.x - col as f32;
        let fy = rel.y - row as f32;

        let h00 = self.sample(col, row);
        let h10 = self.sample(col + 1, row);
        let h01 = self.sample(col, row + 1);
        let h11 = self.sample(col + 1, row + 1);

        let south = h00 + (h10 - h00) * fx;
        let north = h01 + (h11 - h01) * fx;
        Some(south + (north - south) * fy)
    }
}
