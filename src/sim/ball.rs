//! Bouncing hazards
//!
//! Balls move diagonally one cell per tick through open cells and reflect off
//! claimed cells and the grid edge one axis at a time.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::ray::Ray;

/// A ball entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    pub vel: IVec2,
}

impl Ball {
    pub fn new(pos: IVec2, vel: IVec2) -> Self {
        Self { pos, vel }
    }

    /// Random cell anywhere on the grid, random diagonal heading.
    ///
    /// Spawns happen on a freshly reset grid, so every cell is open.
    pub fn spawn<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        let pos = IVec2::new(
            rng.random_range(0..grid.cols() as i32),
            rng.random_range(0..grid.rows() as i32),
        );
        let vel = IVec2::new(random_sign(rng), random_sign(rng));
        Self::new(pos, vel)
    }

    /// Move diagonally, or bounce in place if the target is blocked
    pub fn attempt_move(&mut self, grid: &Grid) {
        let target = self.pos + self.vel;
        if !grid.is_blocked_at(target) {
            self.pos = target;
            return;
        }

        if grid.is_blocked(target.x, self.pos.y) {
            self.vel.x = -self.vel.x;
        } else if grid.is_blocked(self.pos.x, target.y) {
            self.vel.y = -self.vel.y;
        } else {
            // Corner: only the diagonal neighbour is blocked
            self.vel = -self.vel;
        }
    }

    /// Kill every uncommitted ray whose trail covers this ball's cell.
    ///
    /// Returns the number of hits (one life each). A ray another ball already
    /// struck this tick is still on the field and counts again.
    pub fn check_ray_collisions(&self, rays: &mut [Ray]) -> u32 {
        let mut kills = 0;
        for ray in rays.iter_mut().filter(|r| !r.is_committed()) {
            if ray.contains_cell(self.pos.x, self.pos.y) {
                ray.kill();
                kills += 1;
            }
        }
        kills
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    if rng.random_bool(0.5) { 1 } else { -1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ray::{Direction, RayOutcome};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_moves_diagonally_when_open() {
        let grid = Grid::new(10, 10);
        let mut ball = Ball::new(IVec2::new(5, 5), IVec2::new(1, -1));
        ball.attempt_move(&grid);
        assert_eq!(ball.pos, IVec2::new(6, 4));
        assert_eq!(ball.vel, IVec2::new(1, -1));
    }

    #[test]
    fn test_bounces_off_side_wall() {
        let grid = Grid::new(10, 10);
        let mut ball = Ball::new(IVec2::new(9, 5), IVec2::new(1, 1));
        ball.attempt_move(&grid);
        // Bounce tick: no movement
        assert_eq!(ball.pos, IVec2::new(9, 5));
        assert_eq!(ball.vel, IVec2::new(-1, 1));
        ball.attempt_move(&grid);
        assert_eq!(ball.pos, IVec2::new(8, 6));
    }

    #[test]
    fn test_bounces_off_floor() {
        let grid = Grid::new(10, 10);
        let mut ball = Ball::new(IVec2::new(4, 9), IVec2::new(-1, 1));
        ball.attempt_move(&grid);
        assert_eq!(ball.pos, IVec2::new(4, 9));
        assert_eq!(ball.vel, IVec2::new(-1, -1));
    }

    #[test]
    fn test_grid_corner_flips_x_first() {
        // Both axes blocked: x rule wins, y stays until the next bounce
        let grid = Grid::new(10, 10);
        let mut ball = Ball::new(IVec2::new(9, 9), IVec2::new(1, 1));
        ball.attempt_move(&grid);
        assert_eq!(ball.vel, IVec2::new(-1, 1));
        ball.attempt_move(&grid);
        assert_eq!(ball.vel, IVec2::new(-1, -1));
        assert_eq!(ball.pos, IVec2::new(9, 9));
    }

    #[test]
    fn test_diagonal_only_block_reverses() {
        let mut grid = Grid::new(10, 10);
        grid.claim(grid.index(6, 6).unwrap());
        let mut ball = Ball::new(IVec2::new(5, 5), IVec2::new(1, 1));
        ball.attempt_move(&grid);
        assert_eq!(ball.pos, IVec2::new(5, 5));
        assert_eq!(ball.vel, IVec2::new(-1, -1));
    }

    #[test]
    fn test_kills_every_touching_ray() {
        let grid = Grid::new(10, 10);
        let mut rays = vec![
            Ray::new(&grid, IVec2::new(3, 3), Direction::North),
            Ray::new(&grid, IVec2::new(3, 3), Direction::South),
            Ray::new(&grid, IVec2::new(7, 7), Direction::East),
        ];
        let ball = Ball::new(IVec2::new(3, 3), IVec2::ONE);
        assert_eq!(ball.check_ray_collisions(&mut rays), 2);
        assert!(!rays[0].is_alive());
        assert!(!rays[1].is_alive());
        assert!(rays[2].is_alive());
        // A second ball on the same cell strikes the killed rays again
        let other = Ball::new(IVec2::new(3, 3), IVec2::NEG_ONE);
        assert_eq!(other.check_ray_collisions(&mut rays), 2);
    }

    #[test]
    fn test_committed_ray_is_not_struck() {
        let grid = Grid::new(10, 10);
        let mut rays = vec![Ray::new(&grid, IVec2::new(0, 3), Direction::West)];
        assert!(matches!(
            rays[0].attempt_advance(&grid),
            RayOutcome::Committed(_)
        ));
        let ball = Ball::new(IVec2::new(0, 3), IVec2::ONE);
        assert_eq!(ball.check_ray_collisions(&mut rays), 0);
    }

    #[test]
    fn test_spawn_in_bounds_with_diagonal_velocity() {
        let grid = Grid::new(7, 13);
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let ball = Ball::spawn(&grid, &mut rng);
            assert!(grid.contains(ball.pos));
            assert_eq!(ball.vel.abs(), IVec2::ONE);
        }
    }
}
