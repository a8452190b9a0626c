//! Element tree to wire text.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::element::Element;
use crate::error::XmlResult;

pub(crate) fn write_fragment(root: &Element) -> XmlResult<String> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, root)?;
    Ok(into_string(writer))
}

pub(crate) fn write_document(root: &Element) -> XmlResult<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;
    Ok(into_string(writer))
}

fn write_element(writer: &mut Writer<Vec<u8>>, elem: &Element) -> XmlResult<()> {
    let mut start = BytesStart::new(elem.tag());
    for (name, value) in elem.attrs() {
        start.push_attribute((name, value));
    }

    if elem.text().is_none() && elem.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = elem.text() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in elem.children() {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(elem.tag())))?;
    Ok(())
}

fn into_string(writer: Writer<Vec<u8>>) -> String {
    // The writer only ever receives &str input, so its buffer is UTF-8.
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}
