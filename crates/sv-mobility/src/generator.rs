//! Task generation: the move-or-wait coin plus destination sampling.

use sv_core::{ObjectRng, Tick};

use crate::{MobilityError, MobilityResult, ObjectSnapshot, Task, TransitionMatrix};

/// Issues fresh tasks to idle objects.
///
/// Holds one [`TransitionMatrix`] per object (indexed by `ObjectId`), the
/// Bernoulli probability of choosing Move over Wait, and the Wait timeout
/// bound.
pub struct TaskGenerator {
    matrices:      Vec<TransitionMatrix>,
    moving_degree: f64,
    max_await:     u64,
}

impl TaskGenerator {
    pub fn new(matrices: Vec<TransitionMatrix>, moving_degree: f64, max_await: u64) -> Self {
        Self {
            matrices,
            moving_degree,
            max_await,
        }
    }

    /// The transition matrix backing a given object, if one exists.
    pub fn matrix_for(&self, object: sv_core::ObjectId) -> Option<&TransitionMatrix> {
        self.matrices.get(object.index())
    }

    /// Create the next task for the object described by `snapshot`.
    ///
    /// Flips a coin with success probability `moving_degree`; on failure the
    /// object waits a uniform `1..=max_await` ticks, on success it moves to a
    /// destination drawn from its transition row at the current domain.
    pub fn create_task(
        &self,
        snapshot: &ObjectSnapshot,
        now:      Tick,
        rng:      &mut ObjectRng,
    ) -> MobilityResult<Task> {
        if !rng.gen_bool(self.moving_degree) {
            let timeout = rng.gen_range(1..=self.max_await);
            return Ok(Task::Wait { deadline: now + timeout });
        }

        let matrix = self
            .matrices
            .get(snapshot.id.index())
            .ok_or(MobilityError::UnknownObject(snapshot.id))?;
        let destination = matrix.sample_destination(snapshot.coordinates.domain, rng.gen_unit())?;
        Ok(Task::Move { destination })
    }
}
