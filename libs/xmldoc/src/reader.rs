//! Wire text to element tree.
//!
//! Event-driven parse on top of quick-xml. Whitespace-only text nodes are
//! dropped; all other text is kept verbatim. A declared default namespace
//! arrives as an ordinary `xmlns` attribute and is not interpreted.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::element::Element;
use crate::error::{XmlError, XmlResult};

pub(crate) fn read_document(input: &str) -> XmlResult<Element> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let elem = element_from_start(&start, &reader)?;
                stack.push(elem);
            }
            Event::Empty(start) => {
                let elem = element_from_start(&start, &reader)?;
                close_element(&mut stack, &mut root, elem);
            }
            Event::End(end) => {
                let elem = match stack.pop() {
                    Some(elem) => elem,
                    None => {
                        return Err(XmlError::MismatchedTag {
                            expected: String::new(),
                            found: name_to_str(end.name().as_ref(), &reader)?.to_string(),
                        })
                    }
                };
                let end_name = end.name();
                let found = name_to_str(end_name.as_ref(), &reader)?;
                if elem.tag() != found {
                    return Err(XmlError::MismatchedTag {
                        expected: elem.tag().to_string(),
                        found: found.to_string(),
                    });
                }
                close_element(&mut stack, &mut root, elem);
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if !text.trim().is_empty() {
                    if let Some(open) = stack.last_mut() {
                        append_text(open, &text);
                    }
                }
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(cdata.as_ref()).into_owned();
                if let Some(open) = stack.last_mut() {
                    append_text(open, &text);
                }
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnexpectedEof {
            open_tag: open.tag().to_string(),
        });
    }
    root.ok_or(XmlError::NoRootElement)
}

/// Pop-side bookkeeping: a finished element either becomes a child of the
/// element still open below it, or the document root.
fn close_element(stack: &mut Vec<Element>, root: &mut Option<Element>, elem: Element) {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(elem);
        }
        None => {
            if root.is_none() {
                *root = Some(elem);
            }
        }
    }
}

fn element_from_start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> XmlResult<Element> {
    let tag = name_to_str(start.name().as_ref(), reader)?.to_string();
    let mut elem = Element::new(tag);
    for attr in start.attributes() {
        let attr = attr?;
        let key = name_to_str(attr.key.as_ref(), reader)?.to_string();
        let value = attr.unescape_value()?;
        elem.set_attr(key, value.into_owned());
    }
    Ok(elem)
}

fn name_to_str<'a>(bytes: &'a [u8], reader: &Reader<&[u8]>) -> XmlResult<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| XmlError::InvalidName {
        position: reader.buffer_position() as u64,
    })
}

fn append_text(elem: &mut Element, text: &str) {
    match elem.text() {
        Some(prev) => {
            let mut merged = prev.to_string();
            merged.push_str(text);
            elem.set_text(merged);
        }
        None => elem.set_text(text),
    }
}
