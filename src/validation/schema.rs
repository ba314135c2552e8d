//! Schema tables describing what a valid document looks like.
//!
//! A [`Schema`] lists the allowed root structures and, per custom structure
//! identifier, a [`StructureRule`] with its properties, custom children and
//! primitive children. Schemas are built in code by the layer that knows
//! the format:
//!
//! ```ignore
//! let schema = Schema::new()
//!     .root(ChildRule::any(GEOMETRY_NODE))
//!     .structure(
//!         MESH,
//!         StructureRule::new()
//!             .property(PropertyRule::optional(LOD, Type::UnsignedInt))
//!             .child(ChildRule::at_least(VERTEX_ARRAY, 1)),
//!     );
//! ```

use std::collections::HashMap;

use crate::types::{Identifier, Type};

/// Whether a property must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    Required,
    #[default]
    Optional,
}

/// A property a structure may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRule {
    pub identifier: Identifier,
    /// Type every value of the property must be compatible with.
    pub ty: Type,
    pub requirement: Requirement,
}

impl PropertyRule {
    pub fn required(identifier: Identifier, ty: Type) -> Self {
        Self {
            identifier,
            ty,
            requirement: Requirement::Required,
        }
    }

    pub fn optional(identifier: Identifier, ty: Type) -> Self {
        Self {
            identifier,
            ty,
            requirement: Requirement::Optional,
        }
    }
}

/// Allowed count of one kind of custom child (or root) structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRule {
    pub identifier: Identifier,
    pub min: usize,
    /// Upper bound; 0 means unbounded.
    pub max: usize,
}

impl ChildRule {
    pub fn new(identifier: Identifier, min: usize, max: usize) -> Self {
        Self { identifier, min, max }
    }

    /// Any number, including none.
    pub fn any(identifier: Identifier) -> Self {
        Self::new(identifier, 0, 0)
    }

    /// At most one.
    pub fn optional(identifier: Identifier) -> Self {
        Self::new(identifier, 0, 1)
    }

    pub fn exactly(identifier: Identifier, count: usize) -> Self {
        Self::new(identifier, count, count)
    }

    pub fn at_least(identifier: Identifier, min: usize) -> Self {
        Self::new(identifier, min, 0)
    }

    /// Whether `count` occurrences satisfy the rule.
    pub fn allows(&self, count: usize) -> bool {
        count >= self.min && (self.max == 0 || count <= self.max)
    }
}

/// Constraints on the primitive children of a structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrimitiveRule {
    /// Allowed data types.
    pub types: Vec<Type>,
    /// Exact number of primitive children; 0 means any number.
    pub count: usize,
    pub min_array_size: usize,
    /// Minimum sub-array size; flat data counts as sub-array size 1.
    pub min_sub_array_size: usize,
}

impl PrimitiveRule {
    pub fn new(types: impl IntoIterator<Item = Type>) -> Self {
        Self {
            types: types.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_min_array_size(mut self, size: usize) -> Self {
        self.min_array_size = size;
        self
    }

    pub fn with_min_sub_array_size(mut self, size: usize) -> Self {
        self.min_sub_array_size = size;
        self
    }
}

/// Everything allowed inside one custom structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructureRule {
    pub properties: Vec<PropertyRule>,
    /// Allowed custom children, checked in this order.
    pub children: Vec<ChildRule>,
    /// `None` forbids primitive children.
    pub primitives: Option<PrimitiveRule>,
    /// Accept custom children that have no rule here.
    pub unrestricted_children: bool,
}

impl StructureRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, rule: PropertyRule) -> Self {
        self.properties.push(rule);
        self
    }

    pub fn child(mut self, rule: ChildRule) -> Self {
        self.children.push(rule);
        self
    }

    pub fn primitives(mut self, rule: PrimitiveRule) -> Self {
        self.primitives = Some(rule);
        self
    }

    pub fn unrestricted(mut self) -> Self {
        self.unrestricted_children = true;
        self
    }
}

/// Root rules plus a rule per custom structure identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    pub roots: Vec<ChildRule>,
    pub structures: HashMap<Identifier, StructureRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, rule: ChildRule) -> Self {
        self.roots.push(rule);
        self
    }

    /// Set the rule for `identifier`, replacing any earlier one.
    pub fn structure(mut self, identifier: Identifier, rule: StructureRule) -> Self {
        self.structures.insert(identifier, rule);
        self
    }

    pub fn rule_for(&self, identifier: Identifier) -> Option<&StructureRule> {
        self.structures.get(&identifier)
    }
}
