//! Strongly-typed identifiers for strand entities.
//!
//! Newtype wrappers prevent accidental mixing of vertex indices
//! with edge indices or strand indices.

use serde::{Deserialize, Serialize};

use crate::constants::DOFS_PER_VERTEX;

/// Index of a vertex along a strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Index of an edge along a strand. Edge `i` joins vertices `i` and `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Index of a strand within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrandId(pub u32);

impl VertexId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// First entry of this vertex's position in the interleaved dof vector.
    #[inline]
    pub fn position_dof(self) -> usize {
        DOFS_PER_VERTEX * self.index()
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Entry of this edge's twist angle in the interleaved dof vector.
    #[inline]
    pub fn theta_dof(self) -> usize {
        DOFS_PER_VERTEX * self.index() + 3
    }

    /// The two vertices joined by this edge.
    #[inline]
    pub fn vertices(self) -> (VertexId, VertexId) {
        (VertexId(self.0), VertexId(self.0 + 1))
    }
}

impl StrandId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for VertexId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for EdgeId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for StrandId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
