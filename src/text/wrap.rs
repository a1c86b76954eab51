//! Word wrapping and its inverse.
//!
//! [`word_wrap`] inserts wrapping line breaks into a sequence of flow items
//! so that no line exceeds a maximum width, repeating the active
//! indentation on every new line. Words that cannot fit are first split at
//! a soft break (after a letter followed by one of the
//! [`BreakRules::soft_break_chars`]) and, if that fails and even an empty
//! line could not hold them, at an arbitrary character. [`de_wrap`] removes
//! everything wrapping added.
//!
//! Wrapping is idempotent: wrapped breaks and indentation placeholders in
//! the input are treated like authored ones, so wrapping an already
//! wrapped sequence at the same width changes nothing.

use super::run::{FlowItem, Indent, NewLine, ReplacedWhitespace, StyledText};
use crate::font::{Font, Fonts, SpanFont};
use crate::units::Pt;
use log::{trace, warn};
use std::collections::VecDeque;

/// How words may be broken when they do not fit on a line
#[derive(Clone, PartialEq, Debug)]
pub struct BreakRules {
    /// A word may be broken after one of these when it directly follows a
    /// letter
    pub soft_break_chars: Vec<char>,
    /// Whether a word that does not even fit an empty line may be broken at
    /// any character
    pub hard_break: bool,
}

impl Default for BreakRules {
    fn default() -> Self {
        BreakRules {
            soft_break_chars: vec!['-', '.', ',', '/'],
            hard_break: true,
        }
    }
}

/// Insert wrapping line breaks so that every line fits `max_width`. With no
/// maximum width (or a non-positive one) only indentation is processed.
pub fn word_wrap(
    items: &[FlowItem],
    max_width: Option<Pt>,
    fonts: &Fonts,
    rules: &BreakRules,
) -> Vec<FlowItem> {
    let mut wrapper = Wrapper {
        fonts,
        rules,
        max_width: max_width.filter(|w| *w > Pt::ZERO),
        out: Vec::with_capacity(items.len()),
        line_length: Pt::ZERO,
        indentation: None,
        line_empty: true,
        wrapped_line: false,
    };

    for item in items {
        match item {
            FlowItem::NewLine(newline) => wrapper.newline(*newline),
            FlowItem::Indent(indent) => wrapper.indent(indent),
            FlowItem::Text(run) => wrapper.text(run),
            FlowItem::ReplacedWhitespace(ws) => {
                wrapper.out.push(FlowItem::ReplacedWhitespace(ws.clone()))
            }
        }
    }
    wrapper.out
}

/// Undo wrapping: drop wrapping line breaks and indentation placeholders,
/// restore the whitespace stripped from wrapped lines, and merge adjacent
/// runs which look the same.
pub fn de_wrap(items: &[FlowItem]) -> Vec<FlowItem> {
    let mut out: Vec<FlowItem> = Vec::with_capacity(items.len());
    for item in items {
        let run = match item {
            FlowItem::NewLine(newline) if newline.wrapped => continue,
            FlowItem::Indent(indent) if indent.is_continuation() => continue,
            FlowItem::ReplacedWhitespace(ws) => &ws.run,
            FlowItem::Text(run) => run,
            other => {
                out.push(other.clone());
                continue;
            }
        };

        if let Some(FlowItem::Text(last)) = out.last_mut() {
            if last.can_merge(run) {
                let merged = last
                    .inherit(format!("{}{}", last.text(), run.text()))
                    .with_margins(last.left_margin(), run.right_margin());
                *last = merged;
                continue;
            }
        }
        out.push(FlowItem::Text(run.clone()));
    }
    out
}

struct Wrapper<'a> {
    fonts: &'a Fonts,
    rules: &'a BreakRules,
    max_width: Option<Pt>,
    out: Vec<FlowItem>,
    line_length: Pt,
    indentation: Option<Indent>,
    /// Nothing but indentation has been placed on the current line
    line_empty: bool,
    /// The current line was started by wrapping rather than by the author
    wrapped_line: bool,
}

impl Wrapper<'_> {
    fn indent_width(&self) -> Pt {
        self.indentation
            .as_ref()
            .map(Indent::width)
            .unwrap_or_default()
    }

    fn newline(&mut self, newline: NewLine) {
        self.out.push(FlowItem::NewLine(newline));
        self.start_line(newline.wrapped);
    }

    fn wrap(&mut self, font: SpanFont) {
        self.newline(NewLine::wrapping(font));
    }

    fn start_line(&mut self, wrapped: bool) {
        self.line_length = self.indent_width();
        self.line_empty = true;
        self.wrapped_line = wrapped;
        if let Some(indent) = &self.indentation {
            self.out.push(FlowItem::Indent(indent.continuation()));
        }
    }

    fn indent(&mut self, indent: &Indent) {
        if self.line_empty {
            if let Some(FlowItem::Indent(last)) = self.out.last() {
                if last.is_continuation() {
                    self.out.pop();
                }
            }
        }

        self.indentation = if indent.width() > Pt::ZERO {
            Some(indent.clone())
        } else {
            None
        };
        if self.line_empty {
            self.line_length = indent.width();
        } else {
            self.line_length += indent.width();
        }
        self.out.push(FlowItem::Indent(indent.clone()));
    }

    fn place(&mut self, word: StyledText) {
        self.line_length += word.width(self.fonts);
        self.line_empty = false;
        self.out.push(FlowItem::Text(word));
    }

    fn text(&mut self, run: &StyledText) {
        if run.text().is_empty() {
            self.out.push(FlowItem::Text(run.clone()));
            return;
        }

        let words = split_words(run.text());
        let last = words.len() - 1;
        let mut queue: VecDeque<StyledText> = words
            .into_iter()
            .enumerate()
            .map(|(i, word)| {
                let left = if i == 0 { run.left_margin() } else { Pt::ZERO };
                let right = if i == last { run.right_margin() } else { Pt::ZERO };
                run.inherit(word).with_margins(left, right)
            })
            .collect();

        while let Some(mut word) = queue.pop_front() {
            if self.line_empty && self.wrapped_line {
                let trimmed = word.text().trim_start_matches(' ');
                let stripped = word.text().len() - trimmed.len();
                if stripped > 0 {
                    let blanks = word.inherit(&word.text()[..stripped]);
                    let rest = word.with_text(trimmed);
                    self.out
                        .push(FlowItem::ReplacedWhitespace(ReplacedWhitespace { run: blanks }));
                    if rest.text().is_empty() {
                        continue;
                    }
                    word = rest;
                }
            }

            let Some(max_width) = self.max_width else {
                self.place(word);
                continue;
            };

            let width = word.visible_width(self.fonts);
            if self.line_length + width <= max_width {
                self.place(word);
                continue;
            }

            let (fonts, rules) = (self.fonts, self.rules);
            let font = &fonts[word.font().id];
            let break_hard = rules.hard_break && self.indent_width() + width > max_width;
            let available = max_width - self.line_length;
            let line_empty = self.line_empty;

            let split = soft_break(&word, available, font, rules).or_else(|| {
                if break_hard && line_empty {
                    hard_break(&word, available, font)
                } else {
                    None
                }
            });

            if let Some((head, tail)) = split {
                trace!("breaking {:?} into {:?} and {:?}", word.text(), head.text(), tail.text());
                let next_font = tail.font();
                self.place(head);
                self.wrap(next_font);
                queue.push_front(tail);
            } else if !self.line_empty {
                trace!("moving {:?} to a new line", word.text());
                self.wrap(word.font());
                queue.push_front(word);
            } else {
                warn!("{:?} cannot fit {}, placing it anyway", word.text(), max_width);
                self.place(word);
            }
        }
    }
}

/// Split after every run of blanks, keeping the blanks with the word
/// before them: `"  a  b c"` becomes `["  a  ", "b ", "c"]`.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut seen_word = false;
    let mut previous_blank = false;
    for (i, ch) in text.char_indices() {
        let blank = ch == ' ';
        if !blank && previous_blank && seen_word {
            words.push(&text[start..i]);
            start = i;
        }
        if !blank {
            seen_word = true;
        }
        previous_blank = blank;
    }
    words.push(&text[start..]);
    words
}

/// The last break after a letter and a soft break character whose head
/// still fits `available`
fn soft_break(
    word: &StyledText,
    available: Pt,
    font: &Font,
    rules: &BreakRules,
) -> Option<(StyledText, StyledText)> {
    let text = word.text();
    let size = word.font().size;
    let mut best = None;
    let mut previous: Option<char> = None;
    for (i, ch) in text.char_indices() {
        let after_letter = previous.is_some_and(char::is_alphabetic);
        previous = Some(ch);
        if !after_letter || !rules.soft_break_chars.contains(&ch) {
            continue;
        }
        let split = i + ch.len_utf8();
        if split >= text.len() {
            continue;
        }
        if word.left_margin() + font.text_width(&text[..split], size) <= available {
            best = Some(split);
        }
    }
    best.map(|split| word.split_at(split))
}

/// The longest prefix of whole characters that fits `available`. Starts
/// from an estimate based on the width of `M` and corrects it in either
/// direction, since proportional glyphs may be narrower or wider.
fn hard_break(word: &StyledText, available: Pt, font: &Font) -> Option<(StyledText, StyledText)> {
    let text = word.text();
    let size = word.font().size;
    // byte offset just past the nth character, for n in 1..=count
    let ends: Vec<usize> = text
        .char_indices()
        .skip(1)
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let count = ends.len();
    let fits = |n: usize| word.left_margin() + font.text_width(&text[..ends[n - 1]], size) <= available;

    let em = font.text_width("M", size);
    let estimate = if em > Pt::ZERO {
        (available / em).max(0.0) as usize
    } else {
        count
    };
    let mut n = estimate.clamp(1, count);
    while n < count && fits(n + 1) {
        n += 1;
    }
    while n > 1 && !fits(n) {
        n -= 1;
    }

    if !fits(n) || n >= count {
        return None;
    }
    Some(word.split_at(ends[n - 1]))
}
