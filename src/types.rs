//! Core identifier types for the braidworks workflow system.
//!
//! This module defines the fundamental types used throughout the crate for
//! identifying nodes in workflow graphs. These are the core domain concepts
//! that define what a compiled workflow *is* made of.
//!
//! # Key Types
//!
//! - [`GraphKey`]: the bound a type must satisfy to act as a graph node id
//! - [`NodeHandle`]: a display-name handle carrying an opaque component payload
//!
//! # Name-keyed equality
//!
//! [`NodeHandle`] compares and hashes **solely on its name**. Two handles with
//! the same name are interchangeable as graph keys even when their payloads
//! differ. This is a deliberate invariant, not an accident: it lets graphs use
//! readable names as keys while tolerating payload replacement during
//! assembly (an already-spliced node can have its component swapped without
//! rewiring the topology).
//!
//! # Examples
//!
//! ```rust
//! use braidworks::types::NodeHandle;
//!
//! let a = NodeHandle::named("scale");
//! let b = NodeHandle::named("scale");
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "scale");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::component::Component;

/// Bound for types usable as graph node identifiers.
///
/// Any hashable, cloneable, debuggable value qualifies; the blanket impl
/// means plain `String`s (used by the outline compiler and tests) and
/// [`NodeHandle`]s (used by the assembler) both work without opting in.
pub trait GraphKey: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> GraphKey for T {}

/// A graph node handle pairing a display name with an opaque component.
///
/// The payload is the live [`Component`] instance built by the assembler;
/// structural placeholders (names that never execute) carry `None`.
///
/// Equality, ordering, and hashing are defined on `name` only; see the
/// module docs for why.
#[derive(Clone)]
pub struct NodeHandle {
    /// Readable identifier used as the graph key.
    pub name: String,
    /// Live component instance, if this node is executable.
    pub payload: Option<Arc<dyn Component>>,
}

impl NodeHandle {
    /// Creates a handle with no payload (a structural placeholder).
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    /// Creates a handle wrapping a built component instance.
    ///
    /// The handle's name is taken from the component itself so the graph key
    /// and the executable always agree.
    #[must_use]
    pub fn wrapping(payload: Arc<dyn Component>) -> Self {
        Self {
            name: payload.name().to_string(),
            payload: Some(payload),
        }
    }

    /// Returns the wrapped component, if any.
    #[must_use]
    pub fn component(&self) -> Option<&Arc<dyn Component>> {
        self.payload.as_ref()
    }
}

impl PartialEq for NodeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NodeHandle {}

impl Hash for NodeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for NodeHandle {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeHandle {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("name", &self.name)
            .field("payload", &self.payload.as_ref().map(|_| "<component>"))
            .finish()
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for NodeHandle {
    fn from(name: &str) -> Self {
        NodeHandle::named(name)
    }
}

impl From<String> for NodeHandle {
    fn from(name: String) -> Self {
        NodeHandle::named(name)
    }
}
