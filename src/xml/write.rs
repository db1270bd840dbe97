//! Serializing the owned element tree back to indented XML.

use crate::Result;
use crate::xml::{Element, Node};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Serializes a document to a string, indented two spaces per level.
///
/// Childless elements use the self-closing form; text content stays inline
/// with its element's tags. A trailing newline terminates the document.
pub(crate) fn document_to_string(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_element(&mut writer, root)?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name());
    for (name, value) in element.attributes() {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for node in element.children() {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}
