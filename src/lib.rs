//! Rich text flow, word wrapping and pagination for building PDF documents.
//!
//! Text is added to [text::TextFlow]s, either as styled runs or as
//! [markup], and placed on pages together with frames, images and spacers
//! by a [layout] strategy. Rendering a [Document] produces [Page]s whose
//! content streams are encoded with [pdf_writer].

mod colour;
pub use colour::*;

mod content;
pub use content::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

/// Placing drawables on pages: layout strategies, containers and dividing
pub mod layout;

/// Lightweight inline markup for styled text
pub mod markup;

mod page;
pub use page::*;

/// Standard page sizes and the page format documents are laid out on
pub mod pagesize;

mod rect;
pub use rect::*;

/// Styled text runs, word wrapping and text flows
pub mod text;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
