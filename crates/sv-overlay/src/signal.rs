//! The signal vocabulary overlay nodes exchange.

use sv_core::{ObjectId, Tick};

/// Which mode the overlay is operating in.  Carried on every envelope so a
/// receiver interprets the signal under the sender's mode, exactly as the
/// frame-processing handlers do.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Training,
    Inference,
}

/// A hand-off signal between observation nodes.
///
/// A sum type with exhaustive matching; the three variants are the complete
/// protocol.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Signal {
    /// The object disappeared from the sender's frame at `tick`.
    Left { object: ObjectId, tick: Tick },

    /// The object appeared in the sender's frame at `tick`; addressed to the
    /// node that flagged the departure.
    Entered { object: ObjectId, tick: Tick },

    /// Stop expecting the object — it has been sighted elsewhere.
    Cancel { object: ObjectId },
}
