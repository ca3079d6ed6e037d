/*!
 * The page being augmented.
 *
 * `Page` owns the parsed HTML tree of one rendered documentation page and
 * the URL it is served at. Term markers are discovered in document order and
 * tooltips are grafted under their enclosing anchors.
 */

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::{Html, Node};
use url::Url;

use crate::errors::LookupError;
use crate::glossary::text_content;
use crate::tooltip::{Tooltip, TooltipMarkup};

/// A glossary term marker found in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMarker {
    /// Position of the marker in document order
    pub index: usize,
    /// Node of the marker element
    pub node: NodeId,
    /// Enclosing `<a>` element, if the marker's parent is one
    pub anchor: Option<NodeId>,
    /// Raw href attribute of the enclosing anchor
    pub href: Option<String>,
    /// Visible marker text
    pub text: String,
}

/// A rendered documentation page
pub struct Page {
    html: Html,
    url: Url,
}

impl Page {
    /// Parse a page served at `url`
    pub fn parse(source: &str, url: Url) -> Self {
        Self {
            html: Html::parse_document(source),
            url,
        }
    }

    /// URL the page is served at
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// All elements carrying `marker_class`, in document order
    pub fn markers(&self, marker_class: &str) -> Vec<TermMarker> {
        self.html
            .tree
            .root()
            .descendants()
            .filter(|node| has_class(*node, marker_class))
            .enumerate()
            .map(|(index, node)| {
                let parent = node.parent().filter(|parent| {
                    parent
                        .value()
                        .as_element()
                        .is_some_and(|element| element.name() == "a")
                });
                TermMarker {
                    index,
                    node: node.id(),
                    anchor: parent.map(|parent| parent.id()),
                    href: parent
                        .and_then(|parent| parent.value().as_element())
                        .and_then(|element| element.attr("href"))
                        .map(str::to_string),
                    text: text_content(node),
                }
            })
            .collect()
    }

    /// Append a tooltip subtree as the last child of `anchor`
    pub fn append_tooltip(
        &mut self,
        anchor: NodeId,
        tooltip: &Tooltip,
        tooltip_class: &str,
        markup: TooltipMarkup,
    ) -> Result<(), LookupError> {
        let fragment = Html::parse_fragment(&tooltip.to_html(tooltip_class, markup));
        let container = fragment
            .tree
            .root()
            .descendants()
            .find(|node| has_class(*node, tooltip_class))
            .ok_or(LookupError::MissingAnchor)?;

        graft(&mut self.html.tree, anchor, container).ok_or(LookupError::MissingAnchor)
    }

    /// Tooltips currently attached to `anchor`, in child order
    pub fn tooltips(&self, anchor: NodeId, tooltip_class: &str) -> Vec<Tooltip> {
        let Some(anchor) = self.html.tree.get(anchor) else {
            return Vec::new();
        };

        anchor
            .children()
            .filter(|child| has_class(*child, tooltip_class))
            .map(|container| {
                let mut parts = container
                    .children()
                    .filter(|child| child.value().is_element())
                    .map(text_content);
                let title = parts.next().unwrap_or_default();
                let body = parts.next().unwrap_or_default();
                Tooltip::new(title, body)
            })
            .collect()
    }

    /// Serialize the page back to HTML
    pub fn to_html(&self) -> String {
        self.html.html()
    }
}

// Copies `source` and its descendants under `parent`.
fn graft(tree: &mut Tree<Node>, parent: NodeId, source: NodeRef<'_, Node>) -> Option<()> {
    let id = tree.get_mut(parent)?.append(source.value().clone()).id();
    for child in source.children() {
        graft(tree, id, child)?;
    }
    Some(())
}

fn has_class(node: NodeRef<'_, Node>, class: &str) -> bool {
    node.value()
        .as_element()
        .is_some_and(|element| element.classes().any(|c| c == class))
}
