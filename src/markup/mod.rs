//! Markup tokenization.
//!
//! Text is turned into a flat sequence of [`Token`]s: literal text plus
//! control tokens that toggle styling or structure. The grammar:
//!
//! | markup                         | meaning                                   |
//! |--------------------------------|-------------------------------------------|
//! | `*text*`                       | bold toggle                               |
//! | `_text_`                       | italic toggle                             |
//! | `{color:#RRGGBB}`              | switch the text colour                    |
//! | `{link[uri]}text{link}`        | hyperlink, underlined                     |
//! | `{link:ul[uri]}`, `{link:none[uri]}` | hyperlink with explicit style       |
//! | `{link[#name]}`                | link to an anchor in the same document    |
//! | `{anchor:name}text{anchor}`    | named anchor                              |
//! | `--`, `-+`, `-#`, `-!`         | at line start: indent, bullet, enumeration, reset |
//!
//! Indent markers accept a `{label:width}` suffix, e.g. `-+{*:2em}` or
//! `-#{I.:30pt}`. For enumerations the first character of the label picks
//! the enumerator and the remainder is appended to every number. Leading
//! spaces before a marker raise the indentation level by one per space.
//! Any trigger character can be escaped with a backslash.
//!
//! ```
//! use pdf_flow::markup::{tokenize, MarkupConfig, Mode, Token};
//!
//! let tokens = tokenize("Hello *bold* world", Mode::Markup, &MarkupConfig::default())
//!     .expect("valid markup");
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::Text("Hello ".into()),
//!         Token::Bold,
//!         Token::Text("bold".into()),
//!         Token::Bold,
//!         Token::Text(" world".into()),
//!     ]
//! );
//! ```

mod lexer;

use crate::colour::Colour;
use crate::error::MarkupError;
use crate::page::{LinkStyle, LinkTarget};
use crate::units::Pt;
use std::collections::BTreeMap;

/// How text handed to a text flow should be interpreted
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Only line breaks are significant
    Plain,
    /// The full markup grammar
    Markup,
}

/// One element of tokenized text
#[derive(Clone, PartialEq, Debug)]
pub enum Token {
    Text(String),
    Bold,
    Italic,
    Newline,
    Colour(Colour),
    Indent(IndentToken),
    LinkStart { target: LinkTarget, style: LinkStyle },
    LinkEnd,
    AnchorStart(String),
    AnchorEnd,
}

#[derive(Clone, PartialEq, Debug)]
pub struct IndentToken {
    /// 1-based nesting level
    pub level: usize,
    pub kind: IndentKind,
    /// Width of a single level, if the markup specified one
    pub width: Option<Width>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum IndentKind {
    /// `--`: indent without a label
    Indent,
    /// `-+`: bulleted list item, with an explicit bullet if one was given
    Bullet(Option<String>),
    /// `-#`: numbered list item
    Enumeration {
        enumerator: Enumerator,
        suffix: String,
    },
    /// `-!`: end any indentation
    Reset,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WidthUnit {
    Em,
    Pt,
}

/// A length relative to the font size (`em`) or absolute (`pt`)
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Width {
    pub value: f32,
    pub unit: WidthUnit,
}

impl Width {
    pub fn em(value: f32) -> Width {
        Width {
            value,
            unit: WidthUnit::Em,
        }
    }

    pub fn pt(value: f32) -> Width {
        Width {
            value,
            unit: WidthUnit::Pt,
        }
    }

    pub fn to_pt(&self, font_size: Pt) -> Pt {
        match self.unit {
            WidthUnit::Em => font_size * self.value,
            WidthUnit::Pt => Pt(self.value),
        }
    }
}

/// Numbering schemes for enumerated lists
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Enumerator {
    /// 1, 2, 3
    Arabic,
    /// I, II, III
    RomanUpper,
    /// i, ii, iii
    RomanLower,
    /// A, B, ..., Z, AA
    AlphaUpper,
    /// a, b, ..., z, aa
    AlphaLower,
}

impl Enumerator {
    /// The label for the `n`th (1-based) item
    pub fn label(&self, n: usize) -> String {
        match self {
            Enumerator::Arabic => n.to_string(),
            Enumerator::RomanUpper => roman(n),
            Enumerator::RomanLower => roman(n).to_lowercase(),
            Enumerator::AlphaUpper => alphabetic(n),
            Enumerator::AlphaLower => alphabetic(n).to_lowercase(),
        }
    }
}

fn roman(mut n: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

fn alphabetic(mut n: usize) -> String {
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    out.into_iter().rev().collect()
}

/// The capabilities the tokenizer and run builder work with: which
/// enumerators exist, which bullets to draw, how wide a level of
/// indentation is. Built by the caller and passed in explicitly.
#[derive(Clone, Debug)]
pub struct MarkupConfig {
    enumerators: BTreeMap<char, Enumerator>,
    /// Bullets by nesting level, cycling when the level exceeds the list
    pub bullets: Vec<String>,
    /// Width of one level of indentation when the markup does not say
    pub indent_width: Width,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        MarkupConfig {
            enumerators: BTreeMap::from([
                ('1', Enumerator::Arabic),
                ('I', Enumerator::RomanUpper),
                ('i', Enumerator::RomanLower),
                ('A', Enumerator::AlphaUpper),
                ('a', Enumerator::AlphaLower),
            ]),
            bullets: vec!["\u{2022}".to_string(), "-".to_string()],
            indent_width: Width::em(4.0),
        }
    }
}

impl MarkupConfig {
    /// Register (or replace) the enumerator selected by `key`
    pub fn with_enumerator(mut self, key: char, enumerator: Enumerator) -> Self {
        self.enumerators.insert(key, enumerator);
        self
    }

    pub fn enumerator(&self, key: char) -> Option<Enumerator> {
        self.enumerators.get(&key).copied()
    }

    /// The bullet for a 1-based nesting level
    pub fn bullet(&self, level: usize) -> &str {
        if self.bullets.is_empty() {
            return "";
        }
        &self.bullets[level.saturating_sub(1) % self.bullets.len()]
    }
}

/// Split text into tokens. In [Mode::Plain] only line breaks produce
/// control tokens; in [Mode::Markup] the full grammar applies and malformed
/// markup fails with the offending fragment.
pub fn tokenize(text: &str, mode: Mode, config: &MarkupConfig) -> Result<Vec<Token>, MarkupError> {
    match mode {
        Mode::Plain => Ok(split_lines(text)),
        Mode::Markup => lexer::lex(text, config),
    }
}

/// Split plain text at `\n` and `\r\n`. Any other carriage return
/// becomes a blank.
pub(crate) fn split_lines(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            tokens.push(Token::Newline);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            tokens.push(Token::Text(line.replace('\r', " ")));
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_only_splits_lines() {
        let tokens = tokenize("a *b*\r\nc\n\nd", Mode::Plain, &MarkupConfig::default()).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Text("a *b*".into()),
                Token::Newline,
                Token::Text("c".into()),
                Token::Newline,
                Token::Newline,
                Token::Text("d".into()),
            ]
        );
    }

    #[test]
    fn lone_carriage_return_is_a_blank() {
        assert_eq!(
            split_lines("a\rb\r\nc\r"),
            vec![
                Token::Text("a b".into()),
                Token::Newline,
                Token::Text("c".into()),
            ]
        );
    }

    #[test]
    fn enumerator_labels() {
        assert_eq!(Enumerator::Arabic.label(12), "12");
        assert_eq!(Enumerator::RomanUpper.label(14), "XIV");
        assert_eq!(Enumerator::RomanLower.label(9), "ix");
        assert_eq!(Enumerator::AlphaUpper.label(1), "A");
        assert_eq!(Enumerator::AlphaUpper.label(27), "AA");
        assert_eq!(Enumerator::AlphaLower.label(26), "z");
    }

    #[test]
    fn bullets_cycle_by_level() {
        let config = MarkupConfig::default();
        assert_eq!(config.bullet(1), "\u{2022}");
        assert_eq!(config.bullet(2), "-");
        assert_eq!(config.bullet(3), "\u{2022}");
    }

    #[test]
    fn widths_convert() {
        assert_eq!(Width::em(2.0).to_pt(Pt(10.0)), Pt(20.0));
        assert_eq!(Width::pt(7.0).to_pt(Pt(10.0)), Pt(7.0));
    }
}
