//! One-pass XML element tree.
//!
//! The whole document is pulled through a `quick_xml` reader and folded into a
//! small owned tree.  The tree only keeps what the schema mapping needs:
//! element names, attributes, direct text, and child elements.  Comments,
//! processing instructions and the XML declaration are skipped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::DocumentError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA directly inside this element.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text of the first child called `name`, or `""` when there is no such child.
    pub fn child_text(&self, name: &str) -> &str {
        self.child(name).map(|c| c.text.as_str()).unwrap_or("")
    }
}

/// Parses `input` into its document element.
///
/// # Errors
///
/// Returns [`DocumentError`] with the line/column of the first problem when the
/// input is not well-formed: mismatched or missing end tags, bad escapes,
/// duplicate attributes, text or a second element outside the document
/// element, or no document element at all.
pub(crate) fn parse(input: &str) -> Result<Element, DocumentError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut reader = Reader::from_str(input);

    // Open elements, innermost last.
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(DocumentError::at(
                    input,
                    position(reader.error_position()),
                    e.to_string(),
                ))
            }
        };
        let here = position(reader.buffer_position());

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(DocumentError::at(input, here, "extra content after document element"));
                }
                stack.push(open_element(&start).map_err(|msg| DocumentError::at(input, here, msg))?);
            }
            Event::Empty(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(DocumentError::at(input, here, "extra content after document element"));
                }
                let element = open_element(&start).map_err(|msg| DocumentError::at(input, here, msg))?;
                close_element(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                // The reader has already verified the end name against the open tag.
                match stack.pop() {
                    Some(element) => close_element(&mut stack, &mut root, element),
                    None => {
                        return Err(DocumentError::at(input, here, "unexpected end tag"));
                    }
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| DocumentError::at(input, here, e.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(DocumentError::at(input, here, "text outside document element"));
                    }
                }
            }
            Event::CData(cdata) => {
                let text = std::str::from_utf8(&cdata)
                    .map_err(|e| DocumentError::at(input, here, e.to_string()))?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(text),
                    None => {
                        return Err(DocumentError::at(input, here, "CDATA outside document element"));
                    }
                }
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DocumentError::at(
            input,
            input.len(),
            format!("unexpected end of document: <{}> is not closed", open.name),
        ));
    }

    root.ok_or_else(|| DocumentError::at(input, input.len(), "document has no root element"))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, String> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| e.to_string())?
        .to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| e.to_string())?
            .to_string();
        let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

fn close_element(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn position<P>(pos: P) -> usize
where
    usize: TryFrom<P>,
{
    usize::try_from(pos).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_nested_elements_in_document_order() {
        let root = parse("<a><b>one</b><c x=\"1\"/><b>two</b></a>").unwrap();

        assert_eq!(root.name, "a");
        let texts: Vec<_> = root.children_named("b").map(|b| b.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
        assert_eq!(root.child("c").unwrap().attribute("x"), Some("1"));
    }

    #[test]
    fn test_parse_unescapes_text_and_attributes() {
        let root = parse("<a n=\"x &amp; y\">&lt;tag&gt; &#65;</a>").unwrap();

        assert_eq!(root.attribute("n"), Some("x & y"));
        assert_eq!(root.text, "<tag> A");
    }

    #[test]
    fn test_parse_keeps_whitespace_in_leaf_text() {
        let root = parse("<a><b>  padded  </b></a>").unwrap();
        assert_eq!(root.child_text("b"), "  padded  ");
    }

    #[test]
    fn test_parse_accepts_declaration_comments_and_cdata() {
        let root = parse("<?xml version=\"1.0\"?>\n<!-- hi --><a><![CDATA[<raw>]]></a>\n").unwrap();
        assert_eq!(root.text, "<raw>");
    }

    #[test]
    fn test_parse_rejects_unclosed_root() {
        let err = parse("<a>\n <b>x</b>\n").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_parse_rejects_mismatched_end_tag() {
        let err = parse("<a>\n<b></c>\n</a>").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_parse_rejects_empty_document() {
        assert!(parse("").is_err());
        assert!(parse("   \n").is_err());
    }

    #[test]
    fn test_parse_rejects_second_root() {
        assert!(parse("<a/><b/>").is_err());
    }

    #[test]
    fn test_parse_rejects_text_outside_root() {
        assert!(parse("junk<a/>").is_err());
    }

    #[test]
    fn test_child_text_defaults_to_empty() {
        let root = parse("<a/>").unwrap();
        assert_eq!(root.child_text("missing"), "");
    }
}
