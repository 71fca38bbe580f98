//! Grid shape and active region.

use crate::error::{FieldError, FieldResult};

/// Rank-1..3 grid with an inclusive active region per axis.
///
/// Axes beyond `rank` have extent 1. Cells are flattened x-fastest:
/// `i + d0 * (j + d1 * k)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    rank: usize,
    dimension: [usize; 3],
    start: [usize; 3],
    end: [usize; 3],
}

impl GridShape {
    /// Build a shape from per-axis extents and inclusive active bounds.
    pub fn new(dimension: &[usize], start: &[usize], end: &[usize]) -> FieldResult<Self> {
        let rank = dimension.len();
        if !(1..=3).contains(&rank) {
            return Err(FieldError::InvalidRank { rank });
        }
        if start.len() != rank {
            return Err(FieldError::AxisCount {
                what: "active_start",
                found: start.len(),
                rank,
            });
        }
        if end.len() != rank {
            return Err(FieldError::AxisCount {
                what: "active_end",
                found: end.len(),
                rank,
            });
        }

        let mut shape = Self {
            rank,
            dimension: [1; 3],
            start: [0; 3],
            end: [0; 3],
        };
        for axis in 0..rank {
            if dimension[axis] == 0 {
                return Err(FieldError::InvalidAxis {
                    axis,
                    what: "extent must be at least 1",
                });
            }
            if start[axis] > end[axis] {
                return Err(FieldError::InvalidAxis {
                    axis,
                    what: "active_start exceeds active_end",
                });
            }
            if end[axis] >= dimension[axis] {
                return Err(FieldError::InvalidAxis {
                    axis,
                    what: "active_end lies outside the grid",
                });
            }
            shape.dimension[axis] = dimension[axis];
            shape.start[axis] = start[axis];
            shape.end[axis] = end[axis];
        }
        Ok(shape)
    }

    /// Grid without ghost zones: every cell is active.
    pub fn full(dimension: &[usize]) -> FieldResult<Self> {
        let start = vec![0; dimension.len()];
        let end: Vec<usize> = dimension.iter().map(|d| d.saturating_sub(1)).collect();
        Self::new(dimension, &start, &end)
    }

    /// Grid with `ghost` layers on both sides of every axis.
    pub fn with_ghost_zones(active: &[usize], ghost: usize) -> FieldResult<Self> {
        let dimension: Vec<usize> = active.iter().map(|n| n + 2 * ghost).collect();
        let start = vec![ghost; active.len()];
        let end: Vec<usize> = active
            .iter()
            .map(|n| (n + ghost).saturating_sub(1))
            .collect();
        Self::new(&dimension, &start, &end)
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn dimension(&self) -> &[usize] {
        &self.dimension[..self.rank]
    }

    pub fn active_start(&self) -> &[usize] {
        &self.start[..self.rank]
    }

    pub fn active_end(&self) -> &[usize] {
        &self.end[..self.rank]
    }

    /// Total cell count including ghost zones.
    pub fn volume(&self) -> usize {
        self.dimension.iter().product()
    }

    pub fn active_count(&self) -> usize {
        (0..3).map(|a| self.end[a] - self.start[a] + 1).product()
    }

    #[inline]
    pub fn flat_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.dimension[0] * (j + self.dimension[1] * k)
    }

    /// Flat indices of the active cells, in flattening order.
    pub fn active_indices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.active_count());
        for k in self.start[2]..=self.end[2] {
            for j in self.start[1]..=self.end[1] {
                for i in self.start[0]..=self.end[0] {
                    out.push(self.flat_index(i, j, k));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_rank3() {
        let shape = GridShape::new(&[1, 1, 1], &[0, 0, 0], &[0, 0, 0]).unwrap();
        assert_eq!(shape.volume(), 1);
        assert_eq!(shape.active_indices(), vec![0]);
    }

    #[test]
    fn ghost_zones_are_excluded() {
        let shape = GridShape::with_ghost_zones(&[2, 2], 1).unwrap();
        assert_eq!(shape.dimension(), &[4, 4]);
        assert_eq!(shape.volume(), 16);
        assert_eq!(shape.active_count(), 4);
        assert_eq!(shape.active_indices(), vec![5, 6, 9, 10]);
    }

    #[test]
    fn x_fastest_flattening() {
        let shape = GridShape::full(&[3, 2, 2]).unwrap();
        assert_eq!(shape.flat_index(1, 0, 0), 1);
        assert_eq!(shape.flat_index(0, 1, 0), 3);
        assert_eq!(shape.flat_index(0, 0, 1), 6);
        assert_eq!(shape.active_indices(), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn reject_invalid_shapes() {
        assert!(matches!(
            GridShape::new(&[], &[], &[]),
            Err(FieldError::InvalidRank { rank: 0 })
        ));
        assert!(GridShape::new(&[1, 1, 1, 1], &[0; 4], &[0; 4]).is_err());
        assert!(matches!(
            GridShape::new(&[4], &[0, 0], &[3]),
            Err(FieldError::AxisCount { .. })
        ));
        assert!(GridShape::new(&[4], &[3], &[2]).is_err());
        assert!(GridShape::new(&[4], &[0], &[4]).is_err());
        assert!(GridShape::new(&[0], &[0], &[0]).is_err());
    }
}
