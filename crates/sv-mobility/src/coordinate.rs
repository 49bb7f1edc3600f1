//! Object coordinates: a domain plus an offset along the edge being
//! traversed.
//!
//! `offset` is `0.0` exactly while the object is resident in `domain`, and
//! lies in `[0, edge_length)` mid-traversal.  Arrival snaps the offset back
//! to `0.0`, so coordinate comparison against `Coordinates::resident(dest)`
//! is exact — no epsilon needed.

use sv_core::DomainId;

/// A position on the domain graph.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Coordinates {
    pub domain: DomainId,
    pub offset: f64,
}

impl Coordinates {
    /// Resident position in `domain` (offset 0).
    #[inline]
    pub fn resident(domain: DomainId) -> Self {
        Self { domain, offset: 0.0 }
    }

    /// `true` while the object sits in a domain rather than on an edge.
    #[inline]
    pub fn is_resident(&self) -> bool {
        self.offset == 0.0
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {:.2})", self.domain, self.offset)
    }
}
