//! Cutting rays
//!
//! A ray starts at the player's chosen cell and advances one cell per tick in a
//! fixed direction, leaving a trail. Reaching a blocked cell commits the trail;
//! a ball touching the trail destroys it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::cell_index;

/// Travel direction of a ray (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::North => IVec2::NEG_Y,
            Direction::South => IVec2::Y,
            Direction::East => IVec2::X,
            Direction::West => IVec2::NEG_X,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Cut orientation chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

impl Axis {
    /// The two directions a cut along this axis spawns
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Axis::Horizontal => [Direction::East, Direction::West],
            Axis::Vertical => [Direction::North, Direction::South],
        }
    }

    pub fn toggled(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Result of one advance attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RayOutcome {
    /// Head moved one cell
    Continued,
    /// Hit a blocked cell; these cells must be claimed and a reclamation scheduled
    Committed(Vec<usize>),
}

/// A cutting line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ray {
    start: IVec2,
    position: IVec2,
    direction: Direction,
    cols: u32,
    trail: Vec<usize>,
    alive: bool,
    committed: bool,
}

impl Ray {
    pub fn new(grid: &Grid, start: IVec2, direction: Direction) -> Self {
        debug_assert!(grid.contains(start), "ray spawned outside grid at {start}");
        Self {
            start,
            position: start,
            direction,
            cols: grid.cols(),
            trail: vec![cell_index(start, grid.cols())],
            alive: true,
            committed: false,
        }
    }

    pub fn start(&self) -> IVec2 {
        self.start
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Visited cell indices, oldest first
    pub fn trail(&self) -> &[usize] {
        &self.trail
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether the trail was written to the grid. Committed trails are land,
    /// no longer something a ball can strike.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Step toward the next cell, committing if it is blocked
    pub fn attempt_advance(&mut self, grid: &Grid) -> RayOutcome {
        debug_assert!(self.alive, "advancing a dead ray");
        let candidate = self.position + self.direction.delta();
        self.push_head();

        if grid.is_blocked_at(candidate) {
            self.alive = false;
            self.committed = true;
            RayOutcome::Committed(self.trail.clone())
        } else {
            self.position = candidate;
            RayOutcome::Continued
        }
    }

    /// Whether the trail covers `(x, y)`. The head only joins the trail on the
    /// next advance.
    pub fn contains_cell(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.cols {
            return false;
        }
        let index = cell_index(IVec2::new(x, y), self.cols);
        self.trail.contains(&index)
    }

    /// Destroy without committing
    pub fn kill(&mut self) {
        self.alive = false;
    }

    fn push_head(&mut self) {
        let index = cell_index(self.position, self.cols);
        if self.trail.last() != Some(&index) {
            self.trail.push(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_directions() {
        assert_eq!(Axis::default(), Axis::Vertical);
        assert_eq!(Axis::Horizontal.directions(), [Direction::East, Direction::West]);
        assert_eq!(Axis::Vertical.toggled(), Axis::Horizontal);
        for d in Axis::Vertical.directions() {
            assert_eq!(d.delta() + d.opposite().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_ray_runs_to_wall_and_commits() {
        let grid = Grid::new(5, 5);
        let mut ray = Ray::new(&grid, IVec2::new(2, 1), Direction::East);
        assert_eq!(ray.attempt_advance(&grid), RayOutcome::Continued);
        assert_eq!(ray.position(), IVec2::new(3, 1));
        assert_eq!(ray.attempt_advance(&grid), RayOutcome::Continued);
        assert!(ray.is_alive());

        match ray.attempt_advance(&grid) {
            RayOutcome::Committed(cells) => assert_eq!(cells, vec![7, 8, 9]),
            other => panic!("expected commit, got {other:?}"),
        }
        assert!(!ray.is_alive());
        assert!(ray.is_committed());
        assert_eq!(ray.position(), IVec2::new(4, 1));
    }

    #[test]
    fn test_ray_commits_on_claimed_cell() {
        let mut grid = Grid::new(5, 5);
        grid.claim(grid.index(2, 0).unwrap());
        let mut ray = Ray::new(&grid, IVec2::new(2, 2), Direction::North);
        assert_eq!(ray.attempt_advance(&grid), RayOutcome::Continued);
        assert_eq!(
            ray.attempt_advance(&grid),
            RayOutcome::Committed(vec![12, 7])
        );
    }

    #[test]
    fn test_head_joins_trail_one_tick_late() {
        let grid = Grid::new(5, 5);
        let mut ray = Ray::new(&grid, IVec2::new(0, 0), Direction::South);
        assert!(ray.contains_cell(0, 0));
        ray.attempt_advance(&grid);
        assert!(!ray.contains_cell(0, 1));
        ray.attempt_advance(&grid);
        assert!(ray.contains_cell(0, 1));
        assert!(!ray.contains_cell(-1, 0));
        assert!(!ray.contains_cell(5, 0));
    }

    #[test]
    fn test_kill_keeps_trail() {
        let grid = Grid::new(5, 5);
        let mut ray = Ray::new(&grid, IVec2::new(1, 1), Direction::West);
        ray.kill();
        assert!(!ray.is_alive());
        assert!(!ray.is_committed());
        assert_eq!(ray.trail(), &[6]);
    }
}
