// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node records as supplied by the data source, and the roles that size their boxes.

use alloc::string::String;

use kurbo::{Point, Rect, Size};

/// Identifier of a person in the tree.
///
/// Opaque to the engine: ids are assigned by the data source and only compared,
/// hashed, and ordered (ascending id breaks ties wherever order matters).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One person as placed by the external layout pass.
///
/// `x` and `y` are the top-left corner of the display box in layout space.
/// Records are immutable for the lifetime of a layout pass; a new pass
/// replaces the whole list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    /// Stable identifier.
    pub id: NodeId,
    /// Left edge of the display box.
    pub x: f64,
    /// Top edge of the display box.
    pub y: f64,
    /// Parent, `None` only for the root.
    pub father_id: Option<NodeId>,
    /// Generation number, root = 1.
    pub generation: u32,
    /// Optional photo reference, resolved by the host's image loader.
    pub photo_url: Option<String>,
    /// Display name.
    pub name: String,
}

impl NodeRecord {
    /// Create a record without a photo.
    pub fn new(
        id: u64,
        x: f64,
        y: f64,
        father_id: Option<u64>,
        generation: u32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: NodeId(id),
            x,
            y,
            father_id: father_id.map(NodeId),
            generation,
            photo_url: None,
            name: name.into(),
        }
    }

    /// Attach a photo reference.
    pub fn with_photo(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Top-left corner of the display box.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether this record claims to be the root.
    pub fn is_root(&self) -> bool {
        self.father_id.is_none()
    }

    /// The first whitespace-separated word of the name, or the whole name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Role of a node, which decides the size of its display box and its decoration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// The single root.
    Root,
    /// Generation 2 with at least one child.
    SecondGeneration,
    /// Any other node with a photo.
    WithPhoto,
    /// Everything else.
    Plain,
}

impl NodeRole {
    /// Classify a record. Root takes precedence, then second generation, then photo.
    pub fn classify(record: &NodeRecord, has_children: bool) -> Self {
        if record.is_root() {
            Self::Root
        } else if record.generation == 2 && has_children {
            Self::SecondGeneration
        } else if record.photo_url.is_some() {
            Self::WithPhoto
        } else {
            Self::Plain
        }
    }

    /// Display box size for the role, in layout units.
    pub const fn box_size(self) -> Size {
        match self {
            Self::Root => Size::new(240.0, 120.0),
            Self::SecondGeneration => Size::new(220.0, 110.0),
            Self::WithPhoto => Size::new(180.0, 100.0),
            Self::Plain => Size::new(160.0, 72.0),
        }
    }

    /// Display box of a record with this role.
    pub fn display_rect(self, record: &NodeRecord) -> Rect {
        Rect::from_origin_size(record.origin(), self.box_size())
    }
}

bitflags::bitflags! {
    /// Derived per-node facts the renderer keys decoration on.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The tree root.
        const ROOT         = 0b0000_0001;
        /// Has at least one reachable child.
        const HAS_CHILDREN = 0b0000_0010;
        /// Has a photo reference.
        const HAS_PHOTO    = 0b0000_0100;
        /// Selected as a hero for the aggregate view.
        const HERO         = 0b0000_1000;
    }
}
