//! Placing drawables on pages.
//!
//! Everything that ends up on a page is a [`Drawable`]: it can be measured
//! and drawn at a position. A [`Layout`] strategy puts the drawables of a
//! [`Document`](crate::Document) one after the other at a cursor, turning to
//! a new page (or column) whenever the space runs out. A drawable which
//! does not fit is divided: drawables implementing [`Dividable`] split
//! themselves, anything else is cut into page sized windows by a
//! [`Cutter`].
//!
//! # Example
//!
//! ```
//! use pdf_flow::{Document, Font, FontFamily, Pt};
//! use pdf_flow::layout::{Alignment, ColumnLayout, LayoutHint, Margins};
//! use pdf_flow::text::TextFlow;
//!
//! let mut doc = Document::default();
//! let courier = doc.add_font(Font::courier());
//! let family = FontFamily::single(courier);
//!
//! let title = TextFlow::from_markup("*Columns*", Pt(18.0), &family).unwrap();
//! doc.add(title, LayoutHint::new(Alignment::Center).with_margins(Margins::trbl(
//!     Pt(0.0),
//!     Pt(0.0),
//!     Pt(12.0),
//!     Pt(0.0),
//! )));
//!
//! doc.set_layout(ColumnLayout::new(2, Pt(18.0)));
//! let body = "Some text flowing down two columns. ".repeat(100);
//! doc.add(
//!     TextFlow::from_markup(&body, Pt(10.0), &family).unwrap(),
//!     LayoutHint::default(),
//! );
//!
//! let rendered = doc.render().unwrap();
//! assert!(!rendered.pages.is_empty());
//! ```

mod column;
mod context;
mod cutter;
mod drawable;
mod frame;
mod hint;
mod image;
mod margins;
mod shape;
mod spacer;
mod stack;
mod strategy;
mod vertical;

pub use column::*;
pub use context::*;
pub use cutter::*;
pub use drawable::*;
pub use frame::*;
pub use hint::*;
pub use self::image::*;
pub use margins::*;
pub use shape::*;
pub use spacer::*;
pub use stack::*;
pub use strategy::*;
pub use vertical::*;
