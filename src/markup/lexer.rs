//! Single-pass markup lexer driven by a prioritized rule table.
//!
//! At every position the rules whose trigger matches the next character are
//! tried in table order; the first anchored match wins and produces either
//! literal text or a control token. Anything no rule claims is literal.

use super::{IndentKind, IndentToken, MarkupConfig, Token, Width, WidthUnit};
use crate::colour::Colour;
use crate::error::MarkupError;
use crate::page::{LinkStyle, LinkTarget};
use regex::{Captures, Regex};
use std::sync::OnceLock;

enum Lexeme {
    Literal(String),
    Token(Token),
}

struct Rule {
    name: &'static str,
    /// Characters this rule can start with
    triggers: &'static [char],
    /// Only applies at the start of a line
    line_start: bool,
    pattern: &'static str,
    lex: fn(&Captures<'_>, &MarkupConfig) -> Result<Lexeme, MarkupError>,
}

const RULES: &[Rule] = &[
    Rule {
        name: "escape",
        triggers: &['\\'],
        line_start: false,
        pattern: r"^\\([*_{}\\\-])",
        lex: lex_escape,
    },
    Rule {
        name: "indent",
        triggers: &[' ', '-'],
        line_start: true,
        pattern: r"^( *)(--|-\+|-#|-!)(\{[^}\n]*\}?)? ?",
        lex: lex_indent,
    },
    Rule {
        name: "color",
        triggers: &['{'],
        line_start: false,
        pattern: r"^\{color:#([0-9a-fA-F]{6})\}",
        lex: lex_colour,
    },
    Rule {
        name: "link end",
        triggers: &['{'],
        line_start: false,
        pattern: r"^\{link\}",
        lex: lex_link_end,
    },
    Rule {
        name: "link",
        triggers: &['{'],
        line_start: false,
        pattern: r"^\{link(?::(ul|none))?\[([^\]]*)\]\}",
        lex: lex_link,
    },
    Rule {
        name: "anchor end",
        triggers: &['{'],
        line_start: false,
        pattern: r"^\{anchor\}",
        lex: lex_anchor_end,
    },
    Rule {
        name: "anchor",
        triggers: &['{'],
        line_start: false,
        pattern: r"^\{anchor:([^{}]+)\}",
        lex: lex_anchor,
    },
    Rule {
        name: "bold",
        triggers: &['*'],
        line_start: false,
        pattern: r"^\*",
        lex: lex_bold,
    },
    Rule {
        name: "italic",
        triggers: &['_'],
        line_start: false,
        pattern: r"^_",
        lex: lex_italic,
    },
    Rule {
        name: "newline",
        triggers: &['\r', '\n'],
        line_start: false,
        pattern: r"^(\r\n|\n)",
        lex: lex_newline,
    },
];

/// Tags which must be well formed once they have been opened
const KEYWORD_TAGS: &[&str] = &["{color", "{link", "{anchor"];

fn compiled() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| Regex::new(rule.pattern).expect("markup rule patterns are valid"))
            .collect()
    })
}

fn lex_bold(_: &Captures<'_>, _: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    Ok(Lexeme::Token(Token::Bold))
}

fn lex_italic(_: &Captures<'_>, _: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    Ok(Lexeme::Token(Token::Italic))
}

fn lex_newline(_: &Captures<'_>, _: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    Ok(Lexeme::Token(Token::Newline))
}

fn lex_link_end(_: &Captures<'_>, _: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    Ok(Lexeme::Token(Token::LinkEnd))
}

fn lex_anchor_end(_: &Captures<'_>, _: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    Ok(Lexeme::Token(Token::AnchorEnd))
}

fn lex_escape(caps: &Captures<'_>, _: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    Ok(Lexeme::Literal(caps[1].to_string()))
}

fn lex_colour(caps: &Captures<'_>, _: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    Colour::from_hex(&caps[1])
        .map(|colour| Lexeme::Token(Token::Colour(colour)))
        .ok_or_else(|| MarkupError::InvalidColour {
            fragment: caps[0].to_string(),
        })
}

fn lex_link(caps: &Captures<'_>, _: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    let style = match caps.get(1).map(|m| m.as_str()) {
        Some("none") => LinkStyle::None,
        _ => LinkStyle::Underline,
    };
    let uri = &caps[2];
    let target = match uri.strip_prefix('#') {
        Some(anchor) => LinkTarget::Anchor(anchor.to_string()),
        None => LinkTarget::Uri(uri.to_string()),
    };
    Ok(Lexeme::Token(Token::LinkStart { target, style }))
}

fn lex_anchor(caps: &Captures<'_>, _: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    Ok(Lexeme::Token(Token::AnchorStart(caps[1].to_string())))
}

/// Parse `12`, `1.5em` or `30pt`
fn parse_width(text: &str) -> Option<Width> {
    let (number, unit) = if let Some(number) = text.strip_suffix("em") {
        (number, WidthUnit::Em)
    } else if let Some(number) = text.strip_suffix("pt") {
        (number, WidthUnit::Pt)
    } else {
        (text, WidthUnit::Em)
    };
    if number.is_empty() || !number.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return None;
    }
    let value = number.parse().ok()?;
    Some(Width { value, unit })
}

fn lex_indent(caps: &Captures<'_>, config: &MarkupConfig) -> Result<Lexeme, MarkupError> {
    let fragment = caps[0].to_string();
    let level = caps[1].len() + 1;

    let (label, width) = match caps.get(3).map(|m| m.as_str()) {
        None => (None, None),
        Some(suffix) => {
            let inner = suffix
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .ok_or_else(|| MarkupError::Unterminated {
                    fragment: fragment.clone(),
                })?;
            let (label, width) =
                inner
                    .rsplit_once(':')
                    .ok_or_else(|| MarkupError::InvalidWidth {
                        fragment: fragment.clone(),
                    })?;
            let width = match width {
                "" => None,
                width => Some(parse_width(width).ok_or_else(|| MarkupError::InvalidWidth {
                    fragment: fragment.clone(),
                })?),
            };
            (Some(label).filter(|l| !l.is_empty()), width)
        }
    };

    let kind = match &caps[2] {
        "--" => IndentKind::Indent,
        "-+" => IndentKind::Bullet(label.map(str::to_string)),
        "-#" => {
            let label = label.unwrap_or("1.");
            let mut chars = label.chars();
            let key = chars.next().unwrap_or('1');
            let enumerator =
                config
                    .enumerator(key)
                    .ok_or_else(|| MarkupError::UnknownEnumerator {
                        key: key.to_string(),
                        fragment: fragment.clone(),
                    })?;
            IndentKind::Enumeration {
                enumerator,
                suffix: chars.as_str().to_string(),
            }
        }
        _ => IndentKind::Reset,
    };

    Ok(Lexeme::Token(Token::Indent(IndentToken {
        level,
        kind,
        width,
    })))
}

/// Explain why a `{` that no rule accepted is malformed, if it opens one of
/// the keyword tags. Other braces are plain text.
fn malformed_tag(rest: &str) -> Option<MarkupError> {
    let line = rest.lines().next().unwrap_or(rest);
    if !KEYWORD_TAGS.iter().any(|tag| line.starts_with(tag)) {
        return None;
    }
    match line.find('}') {
        Some(end) if line.starts_with("{color") => Some(MarkupError::InvalidColour {
            fragment: line[..=end].to_string(),
        }),
        Some(end) => Some(MarkupError::Unterminated {
            fragment: line[..=end].to_string(),
        }),
        None => Some(MarkupError::Unterminated {
            fragment: line.to_string(),
        }),
    }
}

#[derive(Default)]
struct Output {
    tokens: Vec<Token>,
    literal: String,
}

impl Output {
    /// A carriage return which is not part of a `\r\n` break is a blank
    fn flush(&mut self) {
        if !self.literal.is_empty() {
            let literal = std::mem::take(&mut self.literal);
            let literal = if literal.contains('\r') {
                literal.replace('\r', " ")
            } else {
                literal
            };
            self.tokens.push(Token::Text(literal));
        }
    }

    fn push(&mut self, token: Token) {
        self.flush();
        self.tokens.push(token);
    }
}

pub(super) fn lex(text: &str, config: &MarkupConfig) -> Result<Vec<Token>, MarkupError> {
    let regexes = compiled();
    let mut out = Output::default();
    let mut pos = 0;
    let mut line_start = true;

    'scan: while let Some(ch) = text[pos..].chars().next() {
        let rest = &text[pos..];

        for (rule, regex) in RULES.iter().zip(regexes) {
            if !rule.triggers.contains(&ch) || (rule.line_start && !line_start) {
                continue;
            }
            let Some(caps) = regex.captures(rest) else {
                continue;
            };

            let matched = caps[0].len();
            let lexeme = (rule.lex)(&caps, config)?;
            log::trace!("markup rule `{}` matched {:?}", rule.name, &caps[0]);
            line_start = false;
            match lexeme {
                Lexeme::Literal(literal) => out.literal.push_str(&literal),
                Lexeme::Token(token) => {
                    line_start = token == Token::Newline;
                    out.push(token);
                }
            }
            pos += matched;
            continue 'scan;
        }

        if ch == '{' {
            if let Some(err) = malformed_tag(rest) {
                return Err(err);
            }
        }

        out.literal.push(ch);
        line_start = false;
        pos += ch.len_utf8();
    }

    out.flush();
    Ok(out.tokens)
}
