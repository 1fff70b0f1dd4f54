// Spatial hash grid for blip neighbour queries.
//
// Instead of testing every pair of blips, each blip is filed under the cell
// containing its center. With a cell size of at least one collision diameter,
// every blip that can touch a query point lives in the 3×3 block of cells
// around it.

use std::collections::HashMap;

use super::geometry::PointF;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// Size of each cell in the grid.
    cell_size: f64,
    /// Map from cell coordinates to the items filed there, in insertion order.
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    /// Create a new grid. Cell size should be at least the largest distance
    /// at which two items interact.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { 1.0 };
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, p: PointF) -> (i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    pub fn insert(&mut self, item: usize, p: PointF) {
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().push(item);
    }

    /// Items in the 3×3 cells around `p`. Order is deterministic: cells
    /// row by row, items in insertion order.
    pub fn query(&self, p: PointF) -> Vec<usize> {
        let (cx, cy) = self.cell_of(p);
        let mut result = Vec::new();
        for y in cy - 1..=cy + 1 {
            for x in cx - 1..=cx + 1 {
                if let Some(items) = self.cells.get(&(x, y)) {
                    result.extend_from_slice(items);
                }
            }
        }
        result
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
