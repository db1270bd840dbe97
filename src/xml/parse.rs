//! Parsing serialized XML into the owned element tree.

use crate::xml::{Element, Node};
use crate::{AttachError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses a complete XML document into its root element.
///
/// Comments, processing instructions and the XML declaration are dropped;
/// whitespace-only text between elements is trimmed away.
pub(crate) fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(element_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e)?;
                place(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    AttachError::Xml("closing tag without a matching opening tag".to_string())
                })?;
                place(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| AttachError::Xml(err.to_string()))?;
                if !text.is_empty()
                    && let Some(parent) = stack.last_mut()
                {
                    parent.push_node(Node::Text(text.into_owned()));
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.push_node(Node::Text(text));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => (),
            Err(e) => return Err(AttachError::from(e)),
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(AttachError::Xml(
            "unexpected end of document inside an element".to_string(),
        ));
    }
    root.ok_or_else(|| AttachError::Xml("document has no root element".to_string()))
}

/// Attaches a finished element to its parent, or installs it as the root.
fn place(element: Element, stack: &mut Vec<Element>, root: &mut Option<Element>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(AttachError::Xml(
                "document has more than one root element".to_string(),
            ));
        }
    }
    Ok(())
}

fn element_from_start(start: &BytesStart) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| AttachError::Xml(err.to_string()))?
            .into_owned();
        element.push_attribute(name, value);
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested_structure() {
        let root = parse_document(
            r#"<rdf:RDF xmlns:bib="http://purl.org/net/biblio#">
                 <bib:Book>
                   <dc:title>Relativity</dc:title>
                 </bib:Book>
               </rdf:RDF>"#,
        )
        .unwrap();

        assert_eq!(root.name(), "rdf:RDF");
        let book = root.child_elements().next().unwrap();
        assert_eq!(book.name(), "bib:Book");
        let title = book.child_elements().next().unwrap();
        assert_eq!(title.text(), "Relativity");
    }

    #[test]
    fn test_parse_unescapes_attributes_and_text() {
        let root =
            parse_document(r#"<note title="Tom &amp; Jerry">&lt;draft&gt;</note>"#).unwrap();

        assert_eq!(root.attributes(), &[("title".to_string(), "Tom & Jerry".to_string())]);
        assert_eq!(root.text(), "<draft>");
    }

    #[test]
    fn test_parse_self_closing_element() {
        let root = parse_document(r#"<a><b width="3"/></a>"#).unwrap();

        let b = root.child_elements().next().unwrap();
        assert_eq!(b.name(), "b");
        assert_eq!(b.attributes(), &[("width".to_string(), "3".to_string())]);
        assert!(b.children().is_empty());
    }

    #[test]
    fn test_parse_trims_interelement_whitespace() {
        let root = parse_document("<a>\n  <b/>\n</a>").unwrap();
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_parse_rejects_empty_document() {
        let result = parse_document("   ");
        assert!(matches!(result, Err(AttachError::Xml(_))));
    }

    #[test]
    fn test_parse_rejects_multiple_roots() {
        let result = parse_document("<a/><b/>");
        assert!(matches!(result, Err(AttachError::Xml(_))));
    }

    #[test]
    fn test_parse_rejects_unclosed_element() {
        let result = parse_document("<a><b></b>");
        assert!(matches!(result, Err(AttachError::Xml(_))));
    }
}
