use scraper::{ElementRef, Html, Selector};

const BLOCKS: &str = "h1, h2, h3, h4, h5, h6, p, li";

/// One line of a rendered HTML fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentLine {
    pub text: String,
    pub heading: bool,
}

/// Flatten an HTML fragment into text lines for the modal.
///
/// Block elements become one line each, headings flagged. A fragment with no
/// block elements renders as its bare text.
pub fn fragment_lines(html: &str) -> Vec<FragmentLine> {
    let fragment = Html::parse_fragment(html);

    let mut lines = Vec::new();
    if let Ok(selector) = Selector::parse(BLOCKS) {
        for element in fragment.select(&selector) {
            let text = collapse(element);
            if text.is_empty() {
                continue;
            }
            lines.push(FragmentLine {
                heading: element.value().name().starts_with('h'),
                text,
            });
        }
    }

    if lines.is_empty() {
        let text = collapse(fragment.root_element());
        if !text.is_empty() {
            lines.push(FragmentLine {
                text,
                heading: false,
            });
        }
    }

    lines
}

fn collapse(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
