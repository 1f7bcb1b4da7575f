//! Layout tree, shape elements and pointer-event dispatch.
//!
//! A document is a [`LayoutTree`]: nested rectangular regions whose corners
//! are fractions of their parent's region. Positioning resolves those
//! fractions into pixels top-down; rendering walks the same tree and asks a
//! [`Surface`] to draw each node's elements; dispatch routes pointer events
//! down to buttons and routes sound requests up to the root, which owns the
//! single [`SoundOutput`].

mod dispatch;
pub mod element;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod recording;
pub mod snapshot;
pub mod surface;

pub use element::{BoxShape, Button, Element, ElementKind, Line, Point, Triangle};
pub use event::{Event, EventKind};
pub use geometry::{IVec2, Rgb, UVec2, Vec2, Vec3, Viewport};
pub use layout::{LayoutError, LayoutId, LayoutNode, LayoutTree};
pub use snapshot::LayoutSnapshot;
pub use surface::{Silent, SoundOutput, Surface};
