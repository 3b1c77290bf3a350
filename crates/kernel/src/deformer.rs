use std::time::{Duration, Instant};

use glam::{DMat4, DVec3};
use noisedeform_common::{NoiseParameters, gate, is_gated_off};
use noisedeform_noise::{NoiseField, Simplex};
use rayon::prelude::*;

use crate::displace::displace_point;
use crate::space::{SpaceTransforms, TransformMemo};

/// Task count used when none is configured.
pub const DEFAULT_NUM_TASKS: usize = 16;

/// One vertex as handed over by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Host-side vertex index, carried through untouched.
    pub index: usize,
    pub position: DVec3,
    pub weight: f64,
}

/// Per-pass statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct DeformStats {
    pub displaced: usize,
    pub skipped: usize,
    /// The envelope gated off the whole pass.
    pub pass_gated: bool,
    /// Number of chunks the points were split into.
    pub tasks: usize,
    pub elapsed: Duration,
}

/// A noise deformer: parameters, envelope and task count for successive
/// deform passes, plus the memoized space transforms.
#[derive(Debug, Clone)]
pub struct NoiseDeformer<N: NoiseField = Simplex> {
    pub params: NoiseParameters,
    pub envelope: f64,
    num_tasks: usize,
    noise: N,
    memo: TransformMemo,
}

impl Default for NoiseDeformer<Simplex> {
    fn default() -> Self {
        Self::new(NoiseParameters::default())
    }
}

impl NoiseDeformer<Simplex> {
    pub fn new(params: NoiseParameters) -> Self {
        Self::with_noise(params, Simplex)
    }
}

impl<N: NoiseField> NoiseDeformer<N> {
    /// Build a deformer over a specific noise field.
    pub fn with_noise(params: NoiseParameters, noise: N) -> Self {
        Self {
            params,
            envelope: 1.0,
            num_tasks: DEFAULT_NUM_TASKS,
            noise,
            memo: TransformMemo::new(),
        }
    }

    pub fn with_envelope(mut self, envelope: f64) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_num_tasks(mut self, num_tasks: usize) -> Self {
        self.set_num_tasks(num_tasks);
        self
    }

    /// Set the number of chunks a pass is split into, clamped to at least 1.
    pub fn set_num_tasks(&mut self, num_tasks: usize) {
        self.num_tasks = num_tasks.max(1);
    }

    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    pub fn memo(&self) -> &TransformMemo {
        &self.memo
    }

    /// Run one deform pass over `points` in place.
    ///
    /// `weights[i]` is the painted weight of `points[i]`; points past the end
    /// of `weights` use weight 1.0. Result is independent of `num_tasks`.
    pub fn deform(
        &mut self,
        points: &mut [DVec3],
        weights: &[f64],
        object_to_world: DMat4,
        locator_world: DMat4,
    ) -> DeformStats {
        let _span = tracing::info_span!("deform", points = points.len()).entered();
        let start = Instant::now();

        if is_gated_off(self.envelope) {
            tracing::debug!(envelope = self.envelope, "envelope gated off, pass skipped");
            return DeformStats {
                skipped: points.len(),
                pass_gated: true,
                elapsed: start.elapsed(),
                ..DeformStats::default()
            };
        }
        if points.is_empty() {
            return DeformStats::default();
        }

        let pass = Pass {
            noise: &self.noise,
            params: &self.params,
            transforms: self.memo.get(object_to_world, locator_world),
            envelope: self.envelope,
        };

        let width = task_width(points.len(), self.num_tasks);
        let (displaced, tasks) = if width >= points.len() {
            (pass.run(points, weights, 0), 1)
        } else {
            let displaced = points
                .par_chunks_mut(width)
                .enumerate()
                .map(|(task, chunk)| pass.run(chunk, weights, task * width))
                .sum::<usize>();
            (displaced, points.len().div_ceil(width))
        };

        let stats = DeformStats {
            displaced,
            skipped: points.len() - displaced,
            pass_gated: false,
            tasks,
            elapsed: start.elapsed(),
        };
        tracing::trace!(
            displaced = stats.displaced,
            skipped = stats.skipped,
            tasks = stats.tasks,
            "deform pass complete"
        );
        stats
    }

    /// Run one pass over host-supplied vertices and return their new
    /// positions in the same order.
    pub fn deform_vertices(
        &mut self,
        vertices: &[Vertex],
        object_to_world: DMat4,
        locator_world: DMat4,
    ) -> (Vec<DVec3>, DeformStats) {
        let mut points: Vec<DVec3> = vertices.iter().map(|v| v.position).collect();
        let weights: Vec<f64> = vertices.iter().map(|v| v.weight).collect();
        let stats = self.deform(&mut points, &weights, object_to_world, locator_world);
        (points, stats)
    }

    /// Displace a single object-space point with an explicit weight.
    pub fn displace(
        &mut self,
        point: DVec3,
        weight: f64,
        object_to_world: DMat4,
        locator_world: DMat4,
    ) -> DVec3 {
        let transforms = self.memo.get(object_to_world, locator_world);
        displace_point(
            &self.noise,
            &self.params,
            &transforms,
            gate(self.envelope, weight),
            point,
        )
    }
}

/// Read-only state shared by every chunk of one pass.
struct Pass<'a, N: NoiseField> {
    noise: &'a N,
    params: &'a NoiseParameters,
    transforms: SpaceTransforms,
    envelope: f64,
}

impl<N: NoiseField> Pass<'_, N> {
    /// Displace one contiguous chunk starting at global index `base`.
    /// Returns how many points moved.
    fn run(&self, chunk: &mut [DVec3], weights: &[f64], base: usize) -> usize {
        let mut displaced = 0;
        for (i, p) in chunk.iter_mut().enumerate() {
            let weight = weights.get(base + i).copied().unwrap_or(1.0);
            let g = gate(self.envelope, weight);
            if is_gated_off(g) {
                continue;
            }
            *p = displace_point(self.noise, self.params, &self.transforms, g, *p);
            displaced += 1;
        }
        displaced
    }
}

/// Chunk width for splitting `len` points into `num_tasks` contiguous tasks.
pub fn task_width(len: usize, num_tasks: usize) -> usize {
    len.div_ceil(num_tasks.max(1)).max(1)
}
