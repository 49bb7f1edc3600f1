//! The mobile object state machine.
//!
//! An object is either `Idle` (executing a Wait task, or between tasks) or
//! `Moving` (following a route of domains).  Each tick it:
//!
//! 1. acquires a task from the dispatcher if its stack is empty;
//! 2. holds position (Idle) or advances along its route (Moving), notifying
//!    the dispatcher on domain leave/enter;
//! 3. pops the current task once it completes and immediately enters the
//!    task revealed underneath (or fetches a fresh one).
//!
//! The completion check runs once per tick, so a chain of instantly-completing
//! tasks (e.g. moves to the current domain) still consumes one tick each.

use sv_core::{DomainId, ObjectId, ObjectRng, Tick};

use crate::{
    Coordinates, MobilityDispatcher, MobilityError, MobilityResult, ObjectSnapshot, Task,
    TaskStack,
};

/// Movement mode.  `Idle` iff the current task is a Wait (or the stack is
/// momentarily empty); `Moving` iff a route is loaded.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mode {
    Idle,
    Moving,
}

/// A simulated object moving over the domain graph.
pub struct MobileObject {
    id:            ObjectId,
    average_speed: f64,
    time_step:     f64,
    start_domain:  DomainId,

    stack:       TaskStack,
    coordinates: Coordinates,
    route:       Vec<DomainId>,
    speed:       f64,
    mode:        Mode,
}

impl MobileObject {
    pub fn new(
        id:            ObjectId,
        start_domain:  DomainId,
        average_speed: f64,
        time_step:     f64,
    ) -> Self {
        let mut object = Self {
            id,
            average_speed,
            time_step,
            start_domain,
            stack:       TaskStack::new(),
            coordinates: Coordinates::resident(start_domain),
            route:       Vec::new(),
            speed:       0.0,
            mode:        Mode::Idle,
        };
        object.reset_state(start_domain);
        object
    }

    /// Return to the initial state at `start_domain`: fresh task stack,
    /// resident coordinates, idle.  Used at the train→infer phase boundary.
    pub fn reset_state(&mut self, start_domain: DomainId) {
        self.start_domain = start_domain;
        self.stack = TaskStack::new();
        self.coordinates = Coordinates::resident(start_domain);
        self.route.clear();
        self.speed = 0.0;
        self.mode = Mode::Idle;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn start_domain(&self) -> DomainId {
        self.start_domain
    }

    pub fn current_task(&self) -> Option<Task> {
        self.stack.current().copied()
    }

    pub fn snapshot(&self) -> ObjectSnapshot {
        ObjectSnapshot {
            id:          self.id,
            coordinates: self.coordinates,
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    pub fn on_timetick(
        &mut self,
        now:        Tick,
        dispatcher: &mut MobilityDispatcher,
        rng:        &mut ObjectRng,
    ) -> MobilityResult<()> {
        if self.stack.current().is_none() {
            self.on_task_changed(now, dispatcher, rng)?;
        }

        match self.mode {
            Mode::Idle => {} // coordinates preserved
            Mode::Moving => self.advance(now, dispatcher)?,
        }

        let current = self
            .current_task()
            .ok_or(MobilityError::EmptyTaskStack)?;
        if current.completed(&self.coordinates, now) {
            tracing::debug!(
                target: "object",
                object = %self.id,
                domain = %self.coordinates.domain,
                tick = %now,
                "task completed"
            );
            self.stack.pop()?;
            self.on_task_changed(now, dispatcher, rng)?;
        }
        Ok(())
    }

    // ── Task transitions ──────────────────────────────────────────────────

    /// Entry point after a push or pop: fetch a fresh task if the stack ran
    /// dry, then run the transition logic for whatever is now on top.
    fn on_task_changed(
        &mut self,
        now:        Tick,
        dispatcher: &mut MobilityDispatcher,
        rng:        &mut ObjectRng,
    ) -> MobilityResult<()> {
        if self.stack.current().is_none() {
            let task = dispatcher.get_task(&self.snapshot(), now, rng)?;
            self.stack.push(task);
        }
        self.enter_current(dispatcher)
    }

    fn enter_current(&mut self, dispatcher: &mut MobilityDispatcher) -> MobilityResult<()> {
        let current = self
            .current_task()
            .ok_or(MobilityError::EmptyTaskStack)?;
        match current {
            Task::Wait { .. } => {
                self.mode = Mode::Idle;
                self.speed = 0.0;
                self.route.clear();
            }
            Task::Move { destination } => {
                let (route, distance) =
                    dispatcher.get_route(self.coordinates.domain, destination)?;
                debug_assert_eq!(route.first().copied(), Some(self.coordinates.domain));
                tracing::debug!(
                    target: "object",
                    object = %self.id,
                    from = %self.coordinates.domain,
                    to = %destination,
                    distance,
                    "route loaded"
                );
                self.route = route;
                self.speed = self.average_speed;
                self.mode = Mode::Moving;
            }
        }
        Ok(())
    }

    // ── Movement ──────────────────────────────────────────────────────────

    fn advance(&mut self, now: Tick, dispatcher: &mut MobilityDispatcher) -> MobilityResult<()> {
        // A zero-length route (move to the current domain) has nothing to
        // traverse; completion is detected by the caller this same tick.
        if self.route.len() <= 1 {
            return Ok(());
        }

        let current = self.route[0];
        let next = self.route[1];
        let edge = dispatcher.edge_weight(current, next)?;

        // First step onto a new edge: the object stops being a guest.
        if self.coordinates.offset == 0.0 {
            dispatcher.on_domain_leave(&self.snapshot(), current, now)?;
        }

        let next_offset = self.coordinates.offset + self.speed * self.time_step;

        if next_offset >= edge {
            // Snap forward onto the next domain (ties reach the node).
            self.coordinates = Coordinates::resident(next);
            self.route.remove(0);
            dispatcher.on_domain_enter(&self.snapshot(), next, now)?;
        } else {
            self.coordinates = Coordinates {
                domain: current,
                offset: next_offset,
            };
        }
        Ok(())
    }
}
