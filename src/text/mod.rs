//! Styled text and the flowing, wrapping containers built from it.
//!
//! A [`TextFlow`] is an ordered list of [`FlowItem`]s: runs of
//! [`StyledText`] plus line breaks and indentation. Measuring or drawing a
//! flow wraps it with [`word_wrap`] and groups the result into
//! [`TextLine`]s, which is also how a flow is divided across pages.

mod flow;
mod line;
mod run;
mod wrap;

pub use flow::*;
pub use line::*;
pub use run::*;
pub use wrap::*;
