//! Parsed view of the events page.
//!
//! The page is parsed once; the section and the cards are views over that
//! single tree. Cards are spans in document order rather than subtrees: every
//! card marker opens a card and each following element belongs to it until
//! the next marker. Unclosed card markup therefore cannot leak the fields of
//! one event into another.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static SECTION: LazyLock<Selector> = LazyLock::new(|| selector("section#upcoming-events"));
static CARD_MARKER: LazyLock<Selector> = LazyLock::new(|| selector("div.bg-white.snap-center"));
static SCRIPT: LazyLock<Selector> = LazyLock::new(|| selector("script"));

/// A parsed HTML document.
pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The "upcoming events" region, if the page has one.
    pub fn upcoming_section(&self) -> Option<Section<'_>> {
        self.html
            .select(&SECTION)
            .next()
            .map(|root| Section { root })
    }

    /// Text of every inline `<script>` block, in document order.
    pub fn scripts(&self) -> impl Iterator<Item = String> + '_ {
        self.html
            .select(&SCRIPT)
            .map(|el| el.text().collect::<String>())
    }
}

/// The region holding the event slider.
#[derive(Clone, Copy)]
pub struct Section<'a> {
    root: ElementRef<'a>,
}

impl<'a> Section<'a> {
    pub fn inner_html(&self) -> String {
        self.root.inner_html()
    }

    /// Split the section into cards, one per marker, in source order.
    pub fn cards(&self) -> Vec<Card<'a>> {
        let mut cards: Vec<Card<'a>> = Vec::new();
        for node in self.root.descendants().skip(1) {
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };
            if CARD_MARKER.matches(&el) {
                cards.push(Card { elements: vec![el] });
            } else if let Some(card) = cards.last_mut() {
                card.elements.push(el);
            }
        }
        cards
    }
}

/// The elements of one event card, marker first.
pub struct Card<'a> {
    elements: Vec<ElementRef<'a>>,
}

impl<'a> Card<'a> {
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'a>> + '_ {
        self.elements.iter().copied()
    }

    /// Elements of this card matching `sel`, in source order.
    pub fn matching<'s>(&'s self, sel: &'s Selector) -> impl Iterator<Item = ElementRef<'a>> + 's {
        self.elements().filter(move |el| sel.matches(el))
    }

    /// First non-empty attribute value among elements matching `sel`.
    pub fn attr(&self, sel: &Selector, name: &str) -> Option<String> {
        self.matching(sel)
            .filter_map(|el| el.value().attr(name))
            .map(str::trim)
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// First non-empty cleaned text among elements matching `sel`.
    pub fn text(&self, sel: &Selector) -> Option<String> {
        self.matching(sel).map(text_of).find(|t| !t.is_empty())
    }
}

/// Whitespace-collapsed text content of an element (markup stripped).
pub fn text_of(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<Vec<_>>().join(" "))
}

/// True when the element contains text only, no child elements.
pub fn is_text_only(el: ElementRef<'_>) -> bool {
    !el.children().any(|child| child.value().is_element())
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDER: &str = r#"
        <html><body>
          <section id="past-events"><div class="bg-white snap-center"><span>old</span></div></section>
          <section id="upcoming-events">
            <h2>Upcoming</h2>
            <div class="flex">
              <div class="rounded bg-white shadow snap-center"><span class="a">one</span></div>
              <div class="rounded bg-white shadow snap-center"><span class="a">two</span>
              <div class="rounded bg-white snap-center"><span class="a">three</span></div>
            </div>
          </section>
        </body></html>
    "#;

    fn texts(card: &Card<'_>) -> Vec<String> {
        let sel = Selector::parse("span.a").unwrap();
        card.matching(&sel).map(text_of).collect()
    }

    #[test]
    fn locates_only_the_upcoming_section() {
        let page = Page::parse(SLIDER);
        let section = page.upcoming_section().expect("section");
        assert!(section.inner_html().contains("Upcoming"));
        assert!(!section.inner_html().contains("old"));
    }

    #[test]
    fn missing_section_is_none() {
        let page = Page::parse("<html><body><section id=\"hero\"></section></body></html>");
        assert!(page.upcoming_section().is_none());
    }

    #[test]
    fn cards_split_at_markers_even_when_unclosed() {
        let page = Page::parse(SLIDER);
        let cards = page.upcoming_section().unwrap().cards();
        assert_eq!(cards.len(), 3);
        assert_eq!(texts(&cards[0]), vec!["one"]);
        assert_eq!(texts(&cards[1]), vec!["two"]);
        assert_eq!(texts(&cards[2]), vec!["three"]);
    }

    #[test]
    fn content_before_first_marker_is_ignored() {
        let page = Page::parse(SLIDER);
        let cards = page.upcoming_section().unwrap().cards();
        assert!(cards.iter().all(|c| c.elements().all(|el| el.value().name() != "h2")));
    }

    #[test]
    fn no_markers_means_no_cards() {
        let page = Page::parse(r#"<section id="upcoming-events"><div class="bg-white">x</div></section>"#);
        assert!(page.upcoming_section().unwrap().cards().is_empty());
    }

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Demo \n\t Event  "), "Demo Event");
    }

    #[test]
    fn scripts_are_exposed_in_order() {
        let page = Page::parse("<script>var a = 1;</script><p>x</p><script>var b = 2;</script>");
        let scripts: Vec<String> = page.scripts().collect();
        assert_eq!(scripts, vec!["var a = 1;", "var b = 2;"]);
    }
}
