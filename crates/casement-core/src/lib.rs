//! Core systems for Casement.
//!
//! This crate provides the foundational components of the Casement event
//! routing core:
//!
//! - **Geometry**: minimal point/size/rect value types
//! - **Widget Tree**: arena-backed hierarchy with stable ids, per-widget
//!   state, hit testing, and traversal primitives
//! - **Cursor Shapes**: per-widget cursor hints mapped to the shared
//!   `cursor-icon` vocabulary
//!
//! # Widget Tree Example
//!
//! ```
//! use casement_core::{Point, Size, WidgetRole, WidgetTree};
//!
//! let mut tree = WidgetTree::new(Size::new(800.0, 600.0));
//!
//! // A window with a button inside it.
//! let window = tree.insert(tree.root(), WidgetRole::Window { modal: false })?;
//! tree.set_position(window, Point::new(100.0, 100.0))?;
//! tree.set_size(window, Size::new(300.0, 200.0))?;
//!
//! let button = tree.insert(window, WidgetRole::Plain)?;
//! tree.set_position(button, Point::new(20.0, 30.0))?;
//! tree.set_size(button, Size::new(80.0, 24.0))?;
//!
//! // Hit testing walks top to bottom and skips hidden subtrees.
//! assert_eq!(tree.find_widget(Point::new(130.0, 140.0)), Some(button));
//! assert_eq!(tree.absolute_position(button), Some(Point::new(120.0, 130.0)));
//! # Ok::<(), casement_core::TreeError>(())
//! ```

mod cursor;
mod error;
mod geometry;
pub mod logging;
mod tree;

pub use cursor::CursorShape;
pub use error::{TreeError, TreeResult};
pub use geometry::{Point, Rect, Size};
pub use tree::{WidgetId, WidgetRole, WidgetTree};

pub use cursor_icon::CursorIcon;
