//! Poisson-disc sampling.
//!
//! Point sets are built by dart throwing: candidates are drawn uniformly
//! and kept only if they fall inside the disc and are at least the minimum
//! separation away from every point already accepted.
//!
//! Generating a set per pixel is slow, so a [`DiscSampler`] builds a small
//! pool of sets on first use and gives every pixel a randomly chosen member
//! of the pool, translated into that pixel's cell. Neighbouring pixels
//! therefore often share the same shape.

use std::sync::{Mutex, OnceLock, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxsprite_math::{Vec2, VectorExt};

use crate::grid::SampleGrid;

/// Number of point sets in a sampler's pool.
pub const DISC_POOL_SIZE: usize = 10;

/// Dart-throwing attempts allowed per requested point.
pub const ATTEMPTS_PER_POINT: usize = 1000;

/// A set of points with a guaranteed minimum separation, centered on the
/// origin and contained in a disc.
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonDisc {
    points: Vec<Vec2>,
    radius: f64,
    min_distance: f64,
}

impl PoissonDisc {
    /// Throw darts until `accuracy²` points are placed or
    /// `1000 * accuracy²` candidates have been tried.
    ///
    /// Points lie within `0.5 + overlap` of the origin (in pixel units) and
    /// are at least `1 / accuracy` apart. The set can come back sparser than
    /// requested when the budget runs out; it is never empty for
    /// `accuracy >= 1`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, accuracy: usize, overlap: f64) -> Self {
        let target = accuracy * accuracy;
        let radius = (0.5 + overlap).max(0.0);
        let min_distance = 1.0 / accuracy as f64;
        let min_distance_sq = min_distance * min_distance;
        let radius_sq = radius * radius;

        let mut points: Vec<Vec2> = Vec::with_capacity(target);
        for _ in 0..target * ATTEMPTS_PER_POINT {
            let trial = Vec2::new(
                (rng.gen::<f64>() - 0.5) * 2.0 * radius,
                (rng.gen::<f64>() - 0.5) * 2.0 * radius,
            );
            if trial.norm_squared() > radius_sq {
                continue;
            }
            if points
                .iter()
                .any(|p| trial.distance_squared(p) < min_distance_sq)
            {
                continue;
            }

            points.push(trial);
            if points.len() >= target {
                break;
            }
        }

        if target > 0 && points.len() < target {
            log::debug!(
                "poisson disc placed {}/{} points (radius {radius}, separation {min_distance})",
                points.len(),
                target
            );
            if points.is_empty() {
                points.push(Vec2::zeros());
            }
        }

        Self {
            points,
            radius,
            min_distance,
        }
    }

    /// The accepted points, in acceptance order.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Radius of the containing disc.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Minimum separation between any two points.
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the set has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Poisson-disc sample grid generator with its own disc pool.
///
/// The pool is built on the first call to [`DiscSampler::pool`] or
/// [`DiscSampler::sample_grid`] and is immutable afterwards. The random
/// source is locked for the duration of a grid, so one sampler may be
/// shared between threads.
#[derive(Debug)]
pub struct DiscSampler {
    accuracy: usize,
    overlap: f64,
    pool: OnceLock<Vec<PoissonDisc>>,
    rng: Mutex<StdRng>,
}

impl DiscSampler {
    /// Create a sampler seeded from the operating system.
    pub fn new(accuracy: usize, overlap: f64) -> Self {
        Self::with_rng(accuracy, overlap, StdRng::from_entropy())
    }

    /// Create a sampler whose pool and pixel assignment are reproducible.
    pub fn with_seed(accuracy: usize, overlap: f64, seed: u64) -> Self {
        Self::with_rng(accuracy, overlap, StdRng::seed_from_u64(seed))
    }

    fn with_rng(accuracy: usize, overlap: f64, rng: StdRng) -> Self {
        Self {
            accuracy,
            overlap,
            pool: OnceLock::new(),
            rng: Mutex::new(rng),
        }
    }

    /// The shared point sets, generating them if needed.
    pub fn pool(&self) -> &[PoissonDisc] {
        self.pool.get_or_init(|| {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let pool: Vec<PoissonDisc> = (0..DISC_POOL_SIZE)
                .map(|_| PoissonDisc::generate(&mut *rng, self.accuracy, self.overlap))
                .collect();
            log::debug!(
                "built poisson disc pool: {} sets, accuracy {}, overlap {}",
                pool.len(),
                self.accuracy,
                self.overlap
            );
            pool
        })
    }

    /// Assign every pixel of a `width x height` image a disc from the pool,
    /// centered on the pixel cell and scaled to the pixel size.
    ///
    /// Discs sit on the cell center `((i + 0.5) / width, (j + 0.5) / height)`,
    /// whereas the square lattice starts at the cell's top-left corner, so
    /// the two strategies are offset by half a pixel.
    pub fn sample_grid(&self, width: usize, height: usize) -> SampleGrid {
        let pool = self.pool();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let scale = Vec2::new(width as f64, height as f64);

        SampleGrid::from_fn(width, height, |i, j| {
            let center = Vec2::new((i as f64 + 0.5) / scale.x, (j as f64 + 0.5) / scale.y);
            let disc = &pool[rng.gen_range(0..pool.len())];
            disc.points()
                .iter()
                .map(|p| center + p.component_div(&scale))
                .collect()
        })
    }
}
