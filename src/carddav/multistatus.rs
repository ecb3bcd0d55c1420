//! Parsing of WebDAV `207 Multi-Status` bodies.

use crate::error::CardDavResult;

const DAV_NS: &str = "DAV:";

/// Extract every `D:response/D:href` from a multistatus document.
///
/// Only `response` elements directly below the root are considered, and only
/// their direct `href` children. Elements must be in the `DAV:` namespace,
/// whatever prefix the server chose for it.
///
/// # Errors
///
/// Returns `CardDavError::XmlError` if the body is not well-formed XML.
pub fn parse_hrefs(body: &str) -> CardDavResult<Vec<String>> {
    let doc = roxmltree::Document::parse(body)?;
    let root = doc.root_element();

    let hrefs = root
        .children()
        .filter(|n| is_dav_element(n, "response"))
        .filter_map(|response| response.children().find(|n| is_dav_element(n, "href")))
        .filter_map(|href| href.text())
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect();

    Ok(hrefs)
}

fn is_dav_element(node: &roxmltree::Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(DAV_NS)
}
