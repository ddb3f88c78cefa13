//! HTML to plain text, for language-model consumption.

use scraper::{Html, Node};

/// Strip a page down to its visible text.
///
/// Script and style blocks are dropped entirely, including their content;
/// all other markup is removed and consecutive whitespace collapses to
/// single spaces. Total function: any input yields some (possibly empty)
/// string.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut out = String::new();
    let mut stack = vec![document.tree.root()];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) if matches!(el.name(), "script" | "style") => continue,
            _ => {}
        }
        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
