/*!
 * Tooltip subtree built for each resolved term.
 *
 * The injected markup is always a container carrying the tooltip class with
 * a title element followed by a body element. Inline markup
 * (`span > strong + span`) survives being serialized inside a paragraph and
 * parsed again; block markup (`div > h5 + p`) is only safe for trees that are
 * never re-parsed.
 */

use serde::{Deserialize, Serialize};

/// Element names used for the tooltip subtree
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TooltipMarkup {
    /// `<span class=..><strong>title</strong><span>body</span></span>`
    #[default]
    Inline,
    /// `<div class=..><h5>title</h5><p>body</p></div>`
    Block,
}

impl TooltipMarkup {
    // @returns: Container, title and body tag names
    pub fn tags(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Inline => ("span", "strong", "span"),
            Self::Block => ("div", "h5", "p"),
        }
    }
}

/// Title and body of a single term tooltip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Term name
    pub title: String,
    /// Definition text
    pub body: String,
}

impl Tooltip {
    /// Create a tooltip from a term name and its definition
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Render the tooltip as an HTML fragment
    pub fn to_html(&self, class: &str, markup: TooltipMarkup) -> String {
        let (container, title, body) = markup.tags();
        format!(
            "<{container} class=\"{}\"><{title}>{}</{title}><{body}>{}</{body}></{container}>",
            escape(class),
            escape(&self.title),
            escape(&self.body),
        )
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
