//! Occupancy grid and flood-fill reclamation
//!
//! Cells are `true` when claimed (walls, committed rays, annexed regions) and
//! `false` when open. Everything outside the grid counts as claimed.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::{cell_index, cell_position};

/// 4-connected neighbour offsets
const NEIGHBORS: [IVec2; 4] = [IVec2::NEG_X, IVec2::X, IVec2::NEG_Y, IVec2::Y];

/// Fixed-size claimed/open field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// Fully open grid
    pub fn new(rows: u32, cols: u32) -> Self {
        debug_assert!(rows > 0 && cols > 0, "grid must not be empty");
        Self {
            rows,
            cols,
            cells: vec![false; rows as usize * cols as usize],
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Claimed flags, row-major (`x + y * cols`)
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of `(x, y)`, or `None` when outside the grid
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(IVec2::new(x, y))
            .then(|| cell_index(IVec2::new(x, y), self.cols))
    }

    #[inline]
    pub fn position(&self, index: usize) -> IVec2 {
        cell_position(index, self.cols)
    }

    /// Whether `pos` lies inside the grid
    #[inline]
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.cols && (pos.y as u32) < self.rows
    }

    /// True if `(x, y)` is outside the grid or claimed
    #[inline]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => self.cells[i],
            None => true,
        }
    }

    #[inline]
    pub fn is_blocked_at(&self, pos: IVec2) -> bool {
        self.is_blocked(pos.x, pos.y)
    }

    #[inline]
    pub fn is_open_at(&self, pos: IVec2) -> bool {
        !self.is_blocked_at(pos)
    }

    /// Mark one cell claimed
    pub fn claim(&mut self, index: usize) {
        debug_assert!(index < self.cells.len(), "claim outside grid: {index}");
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = true;
        }
    }

    /// Mark every listed cell claimed (ray commit)
    pub fn claim_all(&mut self, indices: impl IntoIterator<Item = usize>) {
        for index in indices {
            self.claim(index);
        }
    }

    /// Open every cell again (level start)
    pub fn reset(&mut self) {
        self.cells.fill(false);
    }

    pub fn claimed_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Claimed share of the grid, rounded half up to a whole percent
    pub fn percent_claimed(&self) -> u32 {
        let total = self.cells.len();
        if total == 0 {
            return 0;
        }
        ((200 * self.claimed_count() + total) / (2 * total)) as u32
    }

    /// Annex every open region that holds no ball.
    ///
    /// Multi-source BFS from all ball cells through open cells. Open cells the
    /// search never reaches become claimed; claimed cells stay claimed. With no
    /// balls at all the whole open area is claimed.
    pub fn reclaim(&mut self, balls: impl IntoIterator<Item = IVec2>) {
        let mut reached = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        for pos in balls {
            match self.index(pos.x, pos.y) {
                Some(i) if !reached[i] => {
                    reached[i] = true;
                    queue.push_back(pos);
                }
                Some(_) => {}
                None => log::warn!("Ignoring ball outside grid at {pos}"),
            }
        }

        while let Some(pos) = queue.pop_front() {
            for offset in NEIGHBORS {
                let next = pos + offset;
                let Some(i) = self.index(next.x, next.y) else {
                    continue;
                };
                if !self.cells[i] && !reached[i] {
                    reached[i] = true;
                    queue.push_back(next);
                }
            }
        }

        let before = self.claimed_count();
        for (cell, reached) in self.cells.iter_mut().zip(reached) {
            *cell = *cell || !reached;
        }
        log::debug!(
            "Reclaimed {} cells ({}% claimed)",
            self.claimed_count() - before,
            self.percent_claimed()
        );
    }
}
