use super::line::{join_lines, split_lines, TextLine};
use super::run::{FlowItem, Indent, NewLine, StyledText};
use super::wrap::{de_wrap, word_wrap, BreakRules};
use crate::colour::Colour;
use crate::content::Surface;
use crate::error::PDFError;
use crate::font::{FontFamily, FontId, Fonts, SpanFont};
use crate::layout::{Alignment, Dividable, Divided, Drawable, LayoutRequest};
use crate::markup::{self, IndentKind, MarkupConfig, Mode, Token};
use crate::page::Annotation;
use crate::rect::Position;
use crate::units::Pt;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
struct LineCache {
    max_width: Option<Pt>,
    rules: BreakRules,
    lines: Rc<Vec<TextLine>>,
}

/// A block of flowing text, such as a paragraph.
///
/// Items are appended with [TextFlow::add], [TextFlow::add_text] and
/// [TextFlow::add_markup]. When measured or drawn the flow is wrapped to
/// its maximum width (its own, or the one layout offers) and split into
/// lines; the lines are cached per width.
///
/// ```
/// use pdf_flow::{Font, Fonts, FontFamily, Pt};
/// use pdf_flow::layout::{Drawable, LayoutRequest};
/// use pdf_flow::text::{BreakRules, TextFlow};
///
/// let mut fonts = Fonts::new();
/// let courier = fonts.alloc(Font::courier());
///
/// let mut flow = TextFlow::new().with_max_width(Pt(60.0));
/// flow.add_markup("the *quick* brown fox", Pt(10.0), &FontFamily::single(courier))
///     .expect("valid markup");
///
/// let rules = BreakRules::default();
/// let request = LayoutRequest::new(&fonts, &rules);
/// assert_eq!(flow.lines(&request).len(), 2);
/// assert_eq!(flow.height(&request), Pt(20.0));
/// ```
#[derive(Debug, Clone)]
pub struct TextFlow {
    items: Vec<FlowItem>,
    max_width: Option<Pt>,
    line_spacing: f32,
    apply_line_spacing_to_first_line: bool,
    alignment: Alignment,
    absolute_position: Option<Position>,
    cache: RefCell<Option<LineCache>>,
}

impl Default for TextFlow {
    fn default() -> Self {
        TextFlow {
            items: Vec::new(),
            max_width: None,
            line_spacing: 1.0,
            apply_line_spacing_to_first_line: true,
            alignment: Alignment::Left,
            absolute_position: None,
            cache: RefCell::new(None),
        }
    }
}

impl TextFlow {
    pub fn new() -> TextFlow {
        TextFlow::default()
    }

    /// Parse markup into a new flow
    pub fn from_markup(text: &str, size: Pt, family: &FontFamily) -> Result<TextFlow, PDFError> {
        let mut flow = TextFlow::new();
        flow.add_markup(text, size, family)?;
        Ok(flow)
    }

    pub fn with_max_width(mut self, max_width: Pt) -> TextFlow {
        self.set_max_width(Some(max_width));
        self
    }

    /// Constrain the width of the flow. [None] wraps to whatever width
    /// layout offers.
    pub fn set_max_width(&mut self, max_width: Option<Pt>) {
        self.max_width = max_width.filter(|w| *w >= Pt::ZERO);
        self.invalidate();
    }

    /// Lines are `line_spacing` times as tall as their tallest run
    pub fn with_line_spacing(mut self, line_spacing: f32) -> TextFlow {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_line_spacing_on_first_line(mut self, apply: bool) -> TextFlow {
        self.apply_line_spacing_to_first_line = apply;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> TextFlow {
        self.alignment = alignment;
        self
    }

    pub fn with_absolute_position(mut self, position: Position) -> TextFlow {
        self.absolute_position = Some(position);
        self
    }

    pub fn items(&self) -> &[FlowItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn add<I: Into<FlowItem>>(&mut self, item: I) {
        self.items.push(item.into());
        self.invalidate();
    }

    pub fn remove_last(&mut self) -> Option<FlowItem> {
        let last = self.items.pop();
        self.invalidate();
        last
    }

    /// Append plain text, in which only line breaks are significant
    pub fn add_text(&mut self, text: &str, size: Pt, font: FontId, colour: Colour) {
        let font = SpanFont::new(font, size);
        for token in markup::split_lines(text) {
            match token {
                Token::Text(text) => self.items.push(StyledText::new(text, font, colour).into()),
                Token::Newline => self.items.push(NewLine::new(font).into()),
                _ => {}
            }
        }
        self.invalidate();
    }

    /// Append markup using the default [MarkupConfig]
    pub fn add_markup(&mut self, text: &str, size: Pt, family: &FontFamily) -> Result<(), PDFError> {
        self.add_markup_with(text, size, family, &MarkupConfig::default())
    }

    /// Append markup. Bold and italic toggles pick the variant of `family`
    /// each run is set in. Nothing is appended if the markup is malformed.
    pub fn add_markup_with(
        &mut self,
        text: &str,
        size: Pt,
        family: &FontFamily,
        config: &MarkupConfig,
    ) -> Result<(), PDFError> {
        let tokens = markup::tokenize(text, Mode::Markup, config)?;
        let mut builder = RunBuilder::new(size, family, config);
        for token in tokens {
            if let Some(item) = builder.item(token) {
                self.items.push(item);
            }
        }
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.cache.replace(None);
    }

    fn with_items(&self, items: Vec<FlowItem>) -> TextFlow {
        TextFlow {
            items,
            cache: RefCell::new(None),
            ..self.clone()
        }
    }

    /// A copy of this flow with wrapping line breaks inserted for
    /// `max_width`
    pub fn word_wrap(&self, max_width: Option<Pt>, fonts: &Fonts, rules: &BreakRules) -> TextFlow {
        self.with_items(word_wrap(&self.items, max_width, fonts, rules))
    }

    /// A copy of this flow with everything wrapping added removed
    pub fn de_wrap(&self) -> TextFlow {
        self.with_items(de_wrap(&self.items))
    }

    /// The lines this flow is drawn as under `request`
    pub fn lines(&self, request: &LayoutRequest) -> Rc<Vec<TextLine>> {
        let max_width = request.width_for(self.max_width);
        if let Some(cache) = self.cache.borrow().as_ref() {
            if cache.max_width == max_width && &cache.rules == request.break_rules {
                return cache.lines.clone();
            }
        }

        let wrapped = word_wrap(&self.items, max_width, request.fonts, request.break_rules);
        let lines = Rc::new(split_lines(&wrapped));
        self.cache.replace(Some(LineCache {
            max_width,
            rules: request.break_rules.clone(),
            lines: lines.clone(),
        }));
        lines
    }

    /// Height of a line including line spacing
    fn spaced_height(&self, index: usize, line: &TextLine, fonts: &Fonts) -> Pt {
        let height = line.height(fonts);
        if index == 0 && !self.apply_line_spacing_to_first_line {
            height
        } else {
            height * self.line_spacing
        }
    }
}

impl Drawable for TextFlow {
    fn width(&self, request: &LayoutRequest) -> Pt {
        self.lines(request)
            .iter()
            .map(|line| line.width(request.fonts))
            .reduce(Pt::max)
            .unwrap_or_default()
    }

    fn height(&self, request: &LayoutRequest) -> Pt {
        self.lines(request)
            .iter()
            .enumerate()
            .map(|(i, line)| self.spaced_height(i, line, request.fonts))
            .sum()
    }

    fn absolute_position(&self) -> Option<Position> {
        self.absolute_position
    }

    fn max_width(&self) -> Option<Pt> {
        self.max_width
    }

    fn draw(
        &self,
        surface: &mut Surface,
        upper_left: Position,
        request: &LayoutRequest,
    ) -> Result<(), PDFError> {
        let lines = self.lines(request);
        let available = request
            .width_for(self.max_width)
            .unwrap_or_else(|| self.width(request));

        let mut y = upper_left.y;
        for (i, line) in lines.iter().enumerate() {
            let height = line.height(request.fonts);
            let spaced = self.spaced_height(i, line, request.fonts);
            let x = upper_left.x
                + self
                    .alignment
                    .offset(available, line.width(request.fonts));
            line.draw(surface, request.fonts, Position::new(x, y - (spaced - height)));
            y -= spaced;
        }
        Ok(())
    }

    fn as_dividable(&self) -> Option<&dyn Dividable> {
        Some(self)
    }
}

impl Dividable for TextFlow {
    fn divide(&self, remaining: Pt, next_page_height: Pt, request: &LayoutRequest) -> Divided {
        let lines = self.lines(request);
        let mut height = Pt::ZERO;
        let mut count = 0;
        for (i, line) in lines.iter().enumerate() {
            let line_height = self.spaced_height(i, line, request.fonts);
            if height + line_height > remaining {
                break;
            }
            height += line_height;
            count += 1;
        }

        if count == 0 && !lines.is_empty() && remaining >= next_page_height {
            warn!("a line is taller than a whole page and will overflow it");
            count = 1;
        }
        debug!(
            "dividing text flow after {} of {} lines at {}",
            count,
            lines.len(),
            remaining
        );

        Divided {
            head: Rc::new(self.with_items(join_lines(&lines[..count]))),
            tail: Rc::new(self.with_items(join_lines(&lines[count..]))),
        }
    }
}

/// Turns markup tokens into flow items, tracking the style toggles, the
/// active link and the numbering of enumerations per nesting level
struct RunBuilder<'a> {
    size: Pt,
    family: &'a FontFamily,
    config: &'a MarkupConfig,
    bold: bool,
    italic: bool,
    colour: Colour,
    link: Option<Annotation>,
    counters: Vec<usize>,
}

impl<'a> RunBuilder<'a> {
    fn new(size: Pt, family: &'a FontFamily, config: &'a MarkupConfig) -> RunBuilder<'a> {
        RunBuilder {
            size,
            family,
            config,
            bold: false,
            italic: false,
            colour: Colour::default(),
            link: None,
            counters: Vec::new(),
        }
    }

    fn font(&self) -> SpanFont {
        SpanFont::new(self.family.select(self.bold, self.italic), self.size)
    }

    fn regular(&self) -> SpanFont {
        SpanFont::new(self.family.regular, self.size)
    }

    fn item(&mut self, token: Token) -> Option<FlowItem> {
        match token {
            Token::Text(text) => {
                let run = StyledText::new(text, self.font(), self.colour)
                    .with_annotations(self.link.iter().cloned().collect());
                Some(run.into())
            }
            Token::Bold => {
                self.bold = !self.bold;
                None
            }
            Token::Italic => {
                self.italic = !self.italic;
                None
            }
            Token::Newline => Some(NewLine::new(self.regular()).into()),
            Token::Colour(colour) => {
                self.colour = colour;
                None
            }
            Token::LinkStart { target, style } => {
                self.link = Some(Annotation::Link { target, style });
                None
            }
            Token::LinkEnd => {
                self.link = None;
                None
            }
            Token::AnchorStart(name) => {
                let marker = StyledText::new("", self.regular(), self.colour)
                    .with_annotations(vec![Annotation::Anchor { name }]);
                Some(marker.into())
            }
            Token::AnchorEnd => None,
            Token::Indent(indent) => {
                let level = indent.level.max(1);
                let per_level = indent.width.unwrap_or(self.config.indent_width);
                let width = per_level.to_pt(self.size) * level as f32;
                let label = match indent.kind {
                    IndentKind::Reset => {
                        self.counters.clear();
                        return Some(Indent::none(self.regular()).into());
                    }
                    IndentKind::Indent => {
                        self.counters.truncate(level - 1);
                        String::new()
                    }
                    IndentKind::Bullet(bullet) => {
                        self.counters.truncate(level - 1);
                        bullet.unwrap_or_else(|| self.config.bullet(level).to_string())
                    }
                    IndentKind::Enumeration { enumerator, suffix } => {
                        self.counters.resize(level, 0);
                        self.counters[level - 1] += 1;
                        format!("{}{}", enumerator.label(self.counters[level - 1]), suffix)
                    }
                };
                Some(Indent::new(label, width, self.regular(), self.colour).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::font::Font;
    use crate::page::{LinkStyle, LinkTarget};

    struct Fixture {
        fonts: Fonts,
        rules: BreakRules,
        family: FontFamily,
    }

    impl Fixture {
        fn new() -> Fixture {
            let mut fonts = Fonts::new();
            let regular = fonts.alloc(Font::courier());
            let bold = fonts.alloc(Font::courier_bold());
            Fixture {
                fonts,
                rules: BreakRules::default(),
                family: FontFamily::new(regular, bold, regular, bold),
            }
        }

        fn request(&self) -> LayoutRequest<'_> {
            LayoutRequest::new(&self.fonts, &self.rules)
        }
    }

    fn runs(flow: &TextFlow) -> Vec<&StyledText> {
        flow.items()
            .iter()
            .filter_map(|item| match item {
                FlowItem::Text(run) => Some(run),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bold_toggles_select_font_variant() {
        let fx = Fixture::new();
        let flow = TextFlow::from_markup("Hello *bold* world", Pt(10.0), &fx.family).unwrap();
        let runs = runs(&flow);
        let bold: Vec<bool> = runs
            .iter()
            .map(|run| run.font().id == fx.family.bold)
            .collect();
        assert_eq!(bold, vec![false, true, false]);
        assert_eq!(runs[1].text(), "bold");
    }

    #[test]
    fn colour_changes_apply_to_following_runs() {
        let fx = Fixture::new();
        let flow = TextFlow::from_markup(
            "{color:#ff0000}red{color:#00ff00}green",
            Pt(10.0),
            &fx.family,
        )
        .unwrap();
        let runs = runs(&flow);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text(), "red");
        assert_eq!(runs[0].colour(), Colour::new_rgb_bytes(255, 0, 0));
        assert_eq!(runs[1].text(), "green");
        assert_eq!(runs[1].colour(), Colour::new_rgb_bytes(0, 255, 0));
    }

    #[test]
    fn malformed_markup_appends_nothing() {
        let fx = Fixture::new();
        let mut flow = TextFlow::new();
        let err = flow.add_markup("{color:#zz0000}x", Pt(10.0), &fx.family);
        assert!(matches!(err, Err(PDFError::Markup(_))));
        assert!(flow.is_empty());
    }

    #[test]
    fn links_annotate_their_runs() {
        let fx = Fixture::new();
        let flow = TextFlow::from_markup(
            "see {link[https://example.com]}here{link} now",
            Pt(10.0),
            &fx.family,
        )
        .unwrap();
        let runs = runs(&flow);
        assert!(runs[0].annotations().is_empty());
        assert_eq!(
            runs[1].annotations(),
            &[Annotation::Link {
                target: LinkTarget::Uri("https://example.com".into()),
                style: LinkStyle::Underline,
            }]
        );
        assert!(runs[2].annotations().is_empty());
    }

    #[test]
    fn enumerations_count_per_level() {
        let fx = Fixture::new();
        let flow = TextFlow::from_markup(
            "-#{1.:2em}one\n -#{a):2em}sub\n -#{a):2em}sub\n-#{1.:2em}two\n-+ bullet",
            Pt(10.0),
            &fx.family,
        )
        .unwrap();
        let labels: Vec<(String, Pt)> = flow
            .items()
            .iter()
            .filter_map(|item| match item {
                FlowItem::Indent(indent) => Some((indent.label().to_string(), indent.width())),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                ("1.".to_string(), Pt(20.0)),
                ("a)".to_string(), Pt(40.0)),
                ("b)".to_string(), Pt(40.0)),
                ("2.".to_string(), Pt(20.0)),
                ("\u{2022}".to_string(), Pt(40.0)),
            ]
        );
    }

    #[test]
    fn measurement_is_idempotent() {
        let fx = Fixture::new();
        let request = fx.request();
        let mut flow = TextFlow::new().with_max_width(Pt(100.0));
        flow.add_text(&lipsum::lipsum(60), Pt(10.0), fx.family.regular, colours::BLACK);

        let (w1, h1) = (flow.width(&request), flow.height(&request));
        let (w2, h2) = (flow.width(&request), flow.height(&request));
        assert_eq!(w1, w2);
        assert_eq!(h1, h2);
        assert!(w1 <= Pt(100.0) + Pt(6.0));
    }

    #[test]
    fn width_follows_the_offered_width() {
        let fx = Fixture::new();
        let mut flow = TextFlow::new();
        flow.add_text("aaaa bbbb cccc", Pt(10.0), fx.family.regular, colours::BLACK);

        let unconstrained = fx.request();
        assert_eq!(flow.lines(&unconstrained).len(), 1);
        assert_eq!(flow.width(&unconstrained), Pt(84.0));

        let narrow = fx.request().with_max_width(Some(Pt(60.0)));
        assert_eq!(flow.lines(&narrow).len(), 2);
        assert_eq!(flow.height(&narrow), Pt(20.0));
    }

    #[test]
    fn line_spacing_can_skip_first_line() {
        let fx = Fixture::new();
        let mut flow = TextFlow::new().with_line_spacing(1.5);
        flow.add_text("a\nb", Pt(10.0), fx.family.regular, colours::BLACK);
        assert_eq!(flow.height(&fx.request()), Pt(30.0));

        let flow = flow.with_line_spacing_on_first_line(false);
        assert_eq!(flow.height(&fx.request()), Pt(25.0));
    }

    #[test]
    fn divides_by_whole_lines() {
        let fx = Fixture::new();
        let request = fx.request();
        let mut flow = TextFlow::new();
        flow.add_text("one\ntwo\nthree\nfour\nfive", Pt(60.0), fx.family.regular, colours::BLACK);
        assert_eq!(flow.height(&request), Pt(300.0));

        let Divided { head, tail } = flow.divide(Pt(100.0), Pt(700.0), &request);
        assert_eq!(head.height(&request), Pt(60.0));
        assert_eq!(tail.height(&request), Pt(240.0));
    }

    #[test]
    fn division_keeps_every_run() {
        let fx = Fixture::new();
        let request = fx.request().with_max_width(Some(Pt(120.0)));
        let mut flow = TextFlow::new();
        flow.add_text(&lipsum::lipsum(40), Pt(10.0), fx.family.regular, colours::BLACK);
        let before: String = flow
            .lines(&request)
            .iter()
            .map(|line| line.text())
            .collect();

        let Divided { head, tail } = flow.divide(Pt(55.0), Pt(700.0), &request);
        assert!(head.height(&request) <= Pt(55.0));
        assert_eq!(head.height(&request) + tail.height(&request), flow.height(&request));

        let mut surface = Surface::new();
        head.draw(&mut surface, Position::new(Pt(0.0), Pt(800.0)), &request)
            .unwrap();
        tail.draw(&mut surface, Position::new(Pt(0.0), Pt(700.0)), &request)
            .unwrap();
        let drawn: String = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                crate::content::DrawOp::ShowText(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(drawn, before);
    }

    #[test]
    fn oversized_line_is_forced_onto_a_fresh_page() {
        let fx = Fixture::new();
        let request = fx.request();
        let mut flow = TextFlow::new();
        flow.add_text("huge\nrest", Pt(200.0), fx.family.regular, colours::BLACK);

        let divided = flow.divide(Pt(150.0), Pt(150.0), &request);
        assert_eq!(divided.head.height(&request), Pt(200.0));
        assert_eq!(divided.tail.height(&request), Pt(200.0));
    }

    #[test]
    fn wrap_round_trips() {
        let fx = Fixture::new();
        let mut flow = TextFlow::new();
        flow.add_text("It was the best   of times, it was the worst-of-times", Pt(10.0), fx.family.regular, colours::BLACK);
        let wrapped = flow.word_wrap(Some(Pt(40.0)), &fx.fonts, &fx.rules);
        assert_ne!(wrapped.items(), flow.items());
        assert_eq!(wrapped.de_wrap().items(), flow.items());
    }

    #[test]
    fn alignment_offsets_each_line() {
        let fx = Fixture::new();
        let request = fx.request().with_max_width(Some(Pt(100.0)));
        let mut flow = TextFlow::new().with_alignment(Alignment::Right);
        flow.add_text("ab", Pt(10.0), fx.family.regular, colours::BLACK);

        let mut surface = Surface::new();
        flow.draw(&mut surface, Position::new(Pt(0.0), Pt(100.0)), &request)
            .unwrap();
        let x = surface.ops().iter().find_map(|op| match op {
            crate::content::DrawOp::TextPosition(p) => Some(p.x),
            _ => None,
        });
        assert_eq!(x, Some(Pt(88.0)));
    }

    #[test]
    fn remove_last_takes_items_off_the_end() {
        let fx = Fixture::new();
        let request = fx.request();
        let mut flow = TextFlow::new();
        flow.add_text("a\nb", Pt(10.0), fx.family.regular, colours::BLACK);
        assert_eq!(flow.height(&request), Pt(20.0));

        assert!(matches!(flow.remove_last(), Some(FlowItem::Text(run)) if run.text() == "b"));
        assert!(matches!(flow.remove_last(), Some(FlowItem::NewLine(_))));
        assert_eq!(flow.height(&request), Pt(10.0));

        assert!(flow.remove_last().is_some());
        assert!(flow.remove_last().is_none());
        assert!(flow.is_empty());
    }

    #[test]
    fn lone_carriage_return_stays_on_the_line() {
        let fx = Fixture::new();
        let mut flow = TextFlow::new();
        flow.add_text("a\rb", Pt(10.0), fx.family.regular, colours::BLACK);
        assert_eq!(runs(&flow).iter().map(|run| run.text()).collect::<Vec<_>>(), vec!["a b"]);
        assert_eq!(flow.lines(&fx.request()).len(), 1);
    }
}
