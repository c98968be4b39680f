//! Serialization of the markup tree back to text.
//!
//! Attributes are written double-quoted, separated by a single space, and
//! elements without children are written as `<name/>`. Text, comments and
//! declarations come out exactly as they were read.

use std::fmt::{self, Display, Write as _};

use crate::{
    escape::escape_attribute,
    tree::{Document, Element, Node},
};

impl Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.prolog() {
            write!(f, "{node}")?;
        }
        write!(f, "{}", self.root())?;
        for node in self.epilog() {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => write!(f, "{element}"),
            Node::Text(text) => f.write_str(text),
            Node::Comment(body) => write!(f, "<!--{body}-->"),
            Node::CData(body) => write!(f, "<![CDATA[{body}]]>"),
            Node::ProcessingInstruction(body) => write!(f, "<?{body}?>"),
            Node::Doctype(body) => write!(f, "<!DOCTYPE{body}>"),
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name())?;
        for (name, value) in self.attributes() {
            write!(f, " {name}=\"{}\"", escape_attribute(value))?;
        }

        if self.children().is_empty() {
            return f.write_str("/>");
        }

        f.write_char('>')?;
        for child in self.children() {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_serialization() {
        let element = Element::new("g")
            .attr("id", "kvg:StrokePaths_05b57")
            .attr("style", "fill:none;stroke:#000000;")
            .child(Node::Text("\n\t".to_string()))
            .child(Element::new("path").attr("d", "M1,2"))
            .child(Node::Text("\n".to_string()));
        assert_eq!(
            element.to_string(),
            "<g id=\"kvg:StrokePaths_05b57\" style=\"fill:none;stroke:#000000;\">\n\t<path d=\"M1,2\"/>\n</g>"
        );
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let element = Element::new("text").attr("title", "\"a\" & <b>");
        assert_eq!(element.to_string(), "<text title=\"&quot;a&quot; &amp; &lt;b>\"/>");
    }

    #[test]
    fn test_node_serialization() {
        assert_eq!(Node::Comment(" c ".into()).to_string(), "<!-- c -->");
        assert_eq!(
            Node::ProcessingInstruction("xml-stylesheet href=\"a.css\"".into()).to_string(),
            "<?xml-stylesheet href=\"a.css\"?>"
        );
        assert_eq!(Node::CData("x<y".into()).to_string(), "<![CDATA[x<y]]>");
        assert_eq!(Node::Doctype(" svg".into()).to_string(), "<!DOCTYPE svg>");
    }
}
