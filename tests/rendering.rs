use pdf_flow::layout::{Alignment, ColumnLayout, ControlElement, LayoutHint, RenderContext, RenderListener};
use pdf_flow::text::TextFlow;
use pdf_flow::{
    colours, Document, DrawOp, Font, FontFamily, FontId, PDFError, Position, Pt, ResolvedTarget,
    SpanFont,
};

fn document() -> (Document, FontFamily) {
    let mut doc = Document::default();
    let regular = doc.add_font(Font::courier());
    let bold = doc.add_font(Font::courier_bold());
    (doc, FontFamily::new(regular, bold, regular, bold))
}

/// The text without any whitespace, which wrapping may add or remove
fn glyphs(text: &str) -> String {
    text.split_whitespace().collect()
}

#[test]
fn long_text_continues_over_pages() {
    let (mut doc, family) = document();
    let text = lipsum::lipsum(3000);
    let mut flow = TextFlow::new();
    flow.add_text(&text, Pt(10.0), family.regular, colours::BLACK);
    doc.add(flow, LayoutHint::default());

    let rendered = doc.render().expect("can render");
    assert!(rendered.pages.len() >= 3);

    let drawn: String = rendered
        .pages
        .iter()
        .flat_map(|page| page.text())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(glyphs(&drawn), glyphs(&text));

    for page in &rendered.pages {
        let content = page.content_box;
        for op in &page.ops {
            if let DrawOp::TextPosition(position) = op {
                assert!(position.y >= content.y1 && position.y <= content.y2);
                assert!(position.x >= content.x1 && position.x < content.x2);
            }
        }
    }
}

#[test]
fn columns_share_the_page() {
    let (mut doc, family) = document();
    doc.set_layout(ColumnLayout::new(2, Pt(20.0)));
    let mut flow = TextFlow::new();
    flow.add_text(&lipsum::lipsum(1200), Pt(10.0), family.regular, colours::BLACK);
    doc.add(flow, LayoutHint::default());

    let rendered = doc.render().expect("can render");
    let first = &rendered.pages[0];
    let middle = (first.content_box.x1 + first.content_box.x2) / 2.0;
    let xs: Vec<Pt> = first
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::TextPosition(position) => Some(position.x),
            _ => None,
        })
        .collect();
    assert!(xs.iter().any(|x| *x < middle));
    assert!(xs.iter().any(|x| *x > middle));
}

#[test]
fn links_resolve_to_anchors_on_later_pages() {
    let (mut doc, family) = document();
    let intro = TextFlow::from_markup("See {link[#end]}the end{link}.", Pt(10.0), &family)
        .expect("valid markup");
    doc.add(intro, LayoutHint::default());
    doc.add_control(ControlElement::NewPage);
    let end = TextFlow::from_markup("{anchor:end}The end{anchor}", Pt(10.0), &family)
        .expect("valid markup");
    doc.add(end, LayoutHint::default());

    let rendered = doc.render().expect("can render");
    assert_eq!(rendered.pages.len(), 2);

    // one link rectangle per wrapped word of the link text
    let links = &rendered.pages[0].links;
    assert_eq!(links.len(), 2);
    // "See " is four 6pt glyphs
    assert_eq!(links[0].rect.x1, Pt(96.0));
    for link in links {
        match &link.target {
            ResolvedTarget::Destination { page, position } => {
                assert_eq!(*page, 1);
                assert_eq!(position.x, Pt(72.0));
            }
            other => panic!("expected a destination, got {:?}", other),
        }
    }
}

#[test]
fn unknown_anchor_fails_the_render() {
    let (mut doc, family) = document();
    let flow = TextFlow::from_markup("{link[#nowhere]}dangling{link}", Pt(10.0), &family)
        .expect("valid markup");
    doc.add(flow, LayoutHint::default());

    match doc.render() {
        Err(PDFError::UnresolvedAnchor(name)) => assert_eq!(name, "nowhere"),
        other => panic!("expected an unresolved anchor, got {:?}", other.map(|r| r.pages.len())),
    }
}

struct PageNumbers {
    font: FontId,
}

impl RenderListener for PageNumbers {
    fn after_page(&self, context: &mut RenderContext) -> Result<(), PDFError> {
        let label = format!("Page {}", context.page_index() + 1);
        let bottom = context.content_box().y1;
        let surface = context.surface()?;
        surface.begin_text();
        surface.set_font(SpanFont::new(self.font, Pt(8.0)));
        surface.show_text_at(Position::new(Pt(72.0), bottom - Pt(20.0)), &label);
        surface.end_text();
        Ok(())
    }
}

#[test]
fn listeners_decorate_every_page() {
    let (mut doc, family) = document();
    doc.add_listener(PageNumbers {
        font: family.regular,
    });
    let mut flow = TextFlow::new();
    flow.add_text(&lipsum::lipsum(3000), Pt(10.0), family.regular, colours::BLACK);
    doc.add(flow, LayoutHint::new(Alignment::Left));

    let rendered = doc.render().expect("can render");
    for (index, page) in rendered.pages.iter().enumerate() {
        let label = format!("Page {}", index + 1);
        assert_eq!(page.text().last().copied(), Some(label.as_str()));
    }
}
