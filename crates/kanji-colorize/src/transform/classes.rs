//! Class annotation for script-driven styling.
//!
//! Instead of fixed colors, strokes, stroke numbers and structural groups
//! get classes, and the document loads a script that styles them when it is
//! displayed:
//!
//! | Element                  | Classes                          |
//! |--------------------------|----------------------------------|
//! | stroke `i`               | `kc-stroke kc-stroke-<i>`        |
//! | stroke number `i`        | `kc-number kc-number-<i>`        |
//! | group `g` of the anchor  | `kc-group kc-group-<g>`          |
//! | subgroup `s` of group `g`| `kc-subgroup kc-group-<g>-<s>`   |
//!
//! All ordinals start at 1.

use log::{debug, warn};

use kanji_colorize_markup::{Document, Element, Node};

use super::{is_label, is_stroke, is_structural_group};
use crate::config::ClassConfig;

const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

pub(super) fn annotate(document: &mut Document, config: &ClassConfig) {
    let root = document.root_mut();

    let strokes = number_elements(root, is_stroke, "kc-stroke");
    let labels = number_elements(root, is_label, "kc-number");
    let groups = annotate_groups(root);
    debug!(strokes = strokes, labels = labels, groups = groups; "Annotated classes");

    root.set_attribute("onload", config.onload());
    if !root.has_attribute("xmlns:xlink") {
        root.set_attribute("xmlns:xlink", XLINK_NAMESPACE);
    }
    root.push_child(
        Element::new("script")
            .attr("type", "text/ecmascript")
            .attr("xlink:href", config.script()),
    );
    root.push_child(Node::Text("\n".to_string()));

    if let Some(stylesheet) = config.stylesheet() {
        link_stylesheet(document.prolog_mut(), stylesheet);
    }
}

fn number_elements(root: &mut Element, predicate: fn(&Element) -> bool, class: &str) -> usize {
    let paths = root.find_paths(predicate);
    for (index, path) in paths.iter().enumerate() {
        if let Some(element) = root.get_mut(path) {
            element.add_class(class);
            element.add_class(&format!("{class}-{}", index + 1));
        }
    }
    paths.len()
}

/// Classes the first two levels of structural groups below the anchor.
fn annotate_groups(root: &mut Element) -> usize {
    let Some(anchor_path) = root.find_paths(is_structural_group).into_iter().next() else {
        warn!("No structural group found, groups not annotated");
        return 0;
    };
    let Some(anchor) = root.get_mut(&anchor_path) else {
        return 0;
    };

    let mut annotated = 0;
    let mut groups = Vec::new();
    outermost_groups(anchor, &mut groups);
    for (g, group) in groups.into_iter().enumerate() {
        group.add_class("kc-group");
        group.add_class(&format!("kc-group-{}", g + 1));
        annotated += 1;

        let mut subgroups = Vec::new();
        outermost_groups(group, &mut subgroups);
        for (s, subgroup) in subgroups.into_iter().enumerate() {
            subgroup.add_class("kc-subgroup");
            subgroup.add_class(&format!("kc-group-{}-{}", g + 1, s + 1));
            annotated += 1;
        }
    }
    annotated
}

/// Collects the structural groups below `element` not nested in another one.
fn outermost_groups<'a>(element: &'a mut Element, out: &mut Vec<&'a mut Element>) {
    for child in element.child_elements_mut() {
        if is_structural_group(child) {
            out.push(child);
        } else {
            outermost_groups(child, out);
        }
    }
}

/// Adds an `xml-stylesheet` instruction after the XML declaration.
fn link_stylesheet(prolog: &mut Vec<Node>, href: &str) {
    let instruction = Node::ProcessingInstruction(format!(
        "xml-stylesheet type=\"text/css\" href=\"{}\"",
        kanji_colorize_markup::escape_attribute(href)
    ));
    let declaration = prolog.iter().position(|node| {
        matches!(node, Node::ProcessingInstruction(body) if body == "xml" || body.starts_with("xml "))
    });
    match declaration {
        Some(index) => {
            prolog.insert(index + 1, instruction);
            prolog.insert(index + 1, Node::Text("\n".to_string()));
        }
        None => {
            prolog.insert(0, Node::Text("\n".to_string()));
            prolog.insert(0, instruction);
        }
    }
}

#[cfg(test)]
mod tests {
    use kanji_colorize_markup::parse;

    use super::*;

    const SVG: &str = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<svg xmlns=\"http://www.w3.org/2000/svg\">",
        "<g id=\"all\" kvg:element=\"字\">",
        "<g id=\"top\" kvg:element=\"宀\"><path/></g>",
        "<g id=\"bottom\" kvg:element=\"子\">",
        "<g id=\"nested\" kvg:element=\"了\"><g id=\"deep\" kvg:element=\"乛\"><path/></g></g>",
        "<path/>",
        "</g></g>",
        "<g><text>1</text><text>2</text><text>3</text></g>",
        "</svg>",
    );

    fn annotated(config: &ClassConfig) -> Document {
        let mut document = parse(SVG).unwrap();
        annotate(&mut document, config);
        document
    }

    fn class_of<'a>(document: &'a Document, id: &str) -> Option<&'a str> {
        document
            .root()
            .descendants()
            .find(|e| e.id() == Some(id))
            .and_then(|e| e.attribute("class"))
    }

    #[test]
    fn test_strokes_and_numbers() {
        let document = annotated(&ClassConfig::default());
        let classes = |name: &str| -> Vec<String> {
            document
                .root()
                .descendants()
                .filter(|e| e.name() == name)
                .filter_map(|e| e.attribute("class").map(str::to_string))
                .collect()
        };
        assert_eq!(
            classes("path"),
            ["kc-stroke kc-stroke-1", "kc-stroke kc-stroke-2", "kc-stroke kc-stroke-3"]
        );
        assert_eq!(
            classes("text"),
            ["kc-number kc-number-1", "kc-number kc-number-2", "kc-number kc-number-3"]
        );
    }

    #[test]
    fn test_group_levels() {
        let document = annotated(&ClassConfig::default());
        assert_eq!(class_of(&document, "all"), None);
        assert_eq!(class_of(&document, "top"), Some("kc-group kc-group-1"));
        assert_eq!(class_of(&document, "bottom"), Some("kc-group kc-group-2"));
        assert_eq!(class_of(&document, "nested"), Some("kc-subgroup kc-group-2-1"));
        assert_eq!(class_of(&document, "deep"), None);
    }

    #[test]
    fn test_script_hookup() {
        let document = annotated(&ClassConfig::default());
        let root = document.root();
        assert_eq!(root.attribute("onload"), Some("kanjiColorize(evt)"));
        assert_eq!(root.attribute("xmlns:xlink"), Some(XLINK_NAMESPACE));

        let script = root.child_elements().last().unwrap();
        assert_eq!(script.name(), "script");
        assert_eq!(script.attribute("xlink:href"), Some("kanji-colorize.js"));
        assert!(!document.to_string().contains("xml-stylesheet"));
    }

    #[test]
    fn test_stylesheet_after_declaration() {
        let config = ClassConfig::new("colorize.js", "init(evt)", Some("kanji.css".to_string()));
        let document = annotated(&config);
        assert!(document.to_string().starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<?xml-stylesheet type=\"text/css\" href=\"kanji.css\"?>\n<svg"
        ));
        assert_eq!(document.root().attribute("onload"), Some("init(evt)"));
    }

    #[test]
    fn test_existing_xlink_kept() {
        let mut document = parse("<svg xmlns:xlink=\"urn:custom\"><path/></svg>").unwrap();
        annotate(&mut document, &ClassConfig::default());
        assert_eq!(document.root().attribute("xmlns:xlink"), Some("urn:custom"));
    }
}
