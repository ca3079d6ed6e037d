/*!
 * Parsed glossary pages.
 *
 * A glossary page is fetched once per marker, parsed, queried for a single
 * definition and dropped.
 */

use ego_tree::NodeRef;
use scraper::{Html, Node};

use crate::errors::LookupError;

/// A fetched glossary page
pub struct GlossaryPage {
    html: Html,
}

impl GlossaryPage {
    /// Parse a glossary page from its HTML source
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Definition of the term whose anchor target has the given id.
    ///
    /// The definition is the text content of the node immediately after the
    /// target element, whatever kind of node that is.
    pub fn definition(&self, fragment: &str) -> Result<String, LookupError> {
        let target = self
            .html
            .tree
            .root()
            .descendants()
            .find(|node| {
                node.value()
                    .as_element()
                    .and_then(|element| element.id())
                    == Some(fragment)
            })
            .ok_or_else(|| LookupError::MissingTarget {
                fragment: fragment.to_string(),
            })?;

        let sibling = target
            .next_sibling()
            .ok_or_else(|| LookupError::MissingSibling {
                fragment: fragment.to_string(),
            })?;

        Ok(text_content(sibling))
    }
}

/// DOM `textContent` of a node
pub(crate) fn text_content(node: NodeRef<'_, Node>) -> String {
    match node.value() {
        Node::Text(text) => (**text).to_string(),
        Node::Comment(comment) => (**comment).to_string(),
        Node::Element(_) | Node::Fragment | Node::Document => node
            .descendants()
            .filter_map(|descendant| descendant.value().as_text())
            .map(|text| &**text)
            .collect(),
        _ => String::new(),
    }
}
