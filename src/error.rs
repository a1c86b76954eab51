use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// Markup text could not be tokenized
    Markup(#[from] MarkupError),

    #[error("hyperlink refers to anchor `{0}` which was never defined")]
    /// A `{link[#name]}` pointed at an anchor that no page defines. Only
    /// detected once every page has been drawn.
    UnresolvedAnchor(String),

    #[error("page {0} does not exist")]
    /// A page was requested that has not been (or never will be) created
    PageMissing(usize),
}

/// Failures while tokenizing markup. Each variant carries the fragment of
/// input that could not be understood.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkupError {
    #[error("unterminated markup starting at `{fragment}`")]
    Unterminated { fragment: String },

    #[error("unknown enumerator `{key}` in `{fragment}`")]
    UnknownEnumerator { key: String, fragment: String },

    #[error("invalid colour in `{fragment}`, expected `{{color:#RRGGBB}}`")]
    InvalidColour { fragment: String },

    #[error("invalid indentation width in `{fragment}`")]
    InvalidWidth { fragment: String },
}
