/*!
 * Glossary term links.
 *
 * A term marker's enclosing anchor points at a glossary page plus a fragment
 * naming the term entry, e.g. `glossary.html#term-latency`. The href is
 * resolved against the URL of the page holding the anchor, the same way a
 * browser computes `anchor.href`.
 */

use url::Url;

use crate::errors::LookupError;

/// A resolved link to a single glossary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermLink {
    /// Absolute URL of the glossary entry
    pub url: Url,
    /// Fragment identifier, including the term prefix
    pub fragment: String,
    /// Term name, the fragment with the prefix stripped
    pub name: String,
}

impl TermLink {
    /// Resolve an anchor href against the page it appears on
    pub fn resolve(page_url: &Url, href: &str, prefix: &str) -> Result<Self, LookupError> {
        let url = page_url.join(href).map_err(|e| LookupError::MalformedHref {
            href: href.to_string(),
            message: e.to_string(),
        })?;

        let fragment = match url.fragment() {
            Some(fragment) if !fragment.is_empty() => fragment.to_string(),
            _ => {
                return Err(LookupError::NotATermLink {
                    href: href.to_string(),
                });
            }
        };

        let name = match fragment.strip_prefix(prefix) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(LookupError::NotATermLink {
                    href: href.to_string(),
                });
            }
        };

        Ok(Self {
            url,
            fragment,
            name,
        })
    }

    /// Path component of the glossary page, the only part that is fetched
    pub fn path(&self) -> &str {
        self.url.path()
    }
}
