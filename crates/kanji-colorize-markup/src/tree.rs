//! Owned, mutable markup tree.
//!
//! The tree keeps everything a KanjiVG file contains so it can be written
//! back out: the prolog (XML declaration, the copyright comment, the DOCTYPE
//! with its internal subset), the root element, and anything after it.
//!
//! Attribute values are stored decoded and re-escaped when written. Text,
//! comments and declarations are stored verbatim.

use indexmap::IndexMap;

/// Ordered attribute map of an element.
pub type Attributes = IndexMap<String, String>;

/// A parsed markup document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl Document {
    /// Creates a document from its three top-level parts.
    pub fn from_parts(prolog: Vec<Node>, root: Element, epilog: Vec<Node>) -> Self {
        Self {
            prolog,
            root,
            epilog,
        }
    }

    /// Nodes before the root element.
    pub fn prolog(&self) -> &[Node] {
        &self.prolog
    }

    /// Mutable access to the nodes before the root element.
    pub fn prolog_mut(&mut self) -> &mut Vec<Node> {
        &mut self.prolog
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the root element.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Nodes after the root element.
    pub fn epilog(&self) -> &[Node] {
        &self.epilog
    }

    /// Mutable access to every comment in the document, in document order.
    ///
    /// This covers comments in the prolog, anywhere inside the root element,
    /// and in the epilog.
    pub fn comments_mut(&mut self) -> Vec<&mut String> {
        let mut comments = Vec::new();
        collect_comments(&mut self.prolog, &mut comments);
        collect_comments(&mut self.root.children, &mut comments);
        collect_comments(&mut self.epilog, &mut comments);
        comments
    }
}

fn collect_comments<'a>(nodes: &'a mut [Node], out: &mut Vec<&'a mut String>) {
    for node in nodes {
        match node {
            Node::Comment(comment) => out.push(comment),
            Node::Element(element) => collect_comments(&mut element.children, out),
            _ => {}
        }
    }
}

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// Character data, verbatim including entities and whitespace.
    Text(String),
    /// The body of a `<!-- ... -->` comment.
    Comment(String),
    /// The body of a `<![CDATA[ ... ]]>` section.
    CData(String),
    /// The body of a `<? ... ?>` processing instruction, including its target.
    ProcessingInstruction(String),
    /// Everything between `<!DOCTYPE` and the closing `>`.
    Doctype(String),
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the element mutably if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Whether a tree walk should enter the children of the visited element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Visit the children next.
    Descend,
    /// Skip the children and continue with the next sibling.
    Skip,
}

/// Location of a descendant element as child indices from an ancestor.
///
/// Indices count every child node, not only elements, so a path stays valid
/// as long as no node before it is inserted or removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ElementPath(Vec<usize>);

impl ElementPath {
    /// The child indices from the ancestor down to the element.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Returns `true` if `self` lies strictly inside the element at `other`.
    pub fn is_inside(&self, other: &ElementPath) -> bool {
        self.0.len() > other.0.len() && self.0.starts_with(&other.0)
    }
}

/// A markup element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Attributes,
    pub(crate) children: Vec<Node>,
}

impl Element {
    /// Creates an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_attributes(name, Attributes::new())
    }

    /// Creates an element with the given attributes and no children.
    pub fn with_attributes(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`Element::push_child`].
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.push_child(node);
        self
    }

    /// The tag name, including any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The decoded value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns `true` if the attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// All attributes in source order.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Sets an attribute, keeping its position if it already exists.
    ///
    /// Returns the previous value.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(name.into(), value.into())
    }

    /// Removes an attribute, preserving the order of the others.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Mutable access to the child nodes.
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Appends a child node.
    pub fn push_child(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Child elements in order, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Child elements mutably, skipping text and comments.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// Returns `true` if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Adds a class to the class list unless it is already there.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.attribute("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attribute("class", classes);
    }

    /// Value of a property in the inline `style` declaration list.
    pub fn style_property(&self, property: &str) -> Option<&str> {
        self.attribute("style")?.split(';').find_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            (name.trim() == property).then(|| value.trim())
        })
    }

    /// Sets a property in the inline `style` declaration list.
    ///
    /// An existing declaration of the property is replaced in place; a new
    /// one is appended. Other declarations keep their text and order.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let declaration = format!("{property}:{value}");
        let style = match self.attribute("style") {
            Some(existing) if !existing.trim().is_empty() => {
                let mut replaced = false;
                let mut declarations: Vec<String> = existing
                    .split(';')
                    .map(|part| match part.split_once(':') {
                        Some((name, _)) if name.trim() == property => {
                            replaced = true;
                            declaration.clone()
                        }
                        _ => part.to_string(),
                    })
                    .collect();
                if !replaced {
                    // a trailing `;` leaves an empty last part
                    if declarations.last().is_some_and(|part| part.trim().is_empty()) {
                        declarations.pop();
                    }
                    declarations.push(declaration);
                }
                declarations.join(";")
            }
            _ => declaration,
        };
        self.set_attribute("style", style);
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Walks descendants in document order.
    ///
    /// The visitor receives each element's path relative to `self` and
    /// decides whether its children are visited.
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(&ElementPath, &Element) -> Visit,
    {
        let mut path = ElementPath::default();
        walk_children(self, &mut path, &mut visitor);
    }

    /// Paths of all descendants matching `predicate`, in document order.
    pub fn find_paths<P>(&self, predicate: P) -> Vec<ElementPath>
    where
        P: Fn(&Element) -> bool,
    {
        let mut paths = Vec::new();
        self.walk(|path, element| {
            if predicate(element) {
                paths.push(path.clone());
            }
            Visit::Descend
        });
        paths
    }

    /// The descendant at `path`.
    pub fn get(&self, path: &ElementPath) -> Option<&Element> {
        path.indices()
            .iter()
            .try_fold(self, |element, &index| element.children.get(index)?.as_element())
    }

    /// The descendant at `path`, mutably.
    pub fn get_mut(&mut self, path: &ElementPath) -> Option<&mut Element> {
        let mut element = self;
        for &index in path.indices() {
            element = element.children.get_mut(index)?.as_element_mut()?;
        }
        Some(element)
    }

    /// Removes every descendant element matching `predicate`.
    ///
    /// Matching elements are removed with their subtrees. Returns the number
    /// of elements removed.
    pub fn remove_descendants<P>(&mut self, predicate: &P) -> usize
    where
        P: Fn(&Element) -> bool,
    {
        let before = self.children.len();
        self.children
            .retain(|node| !node.as_element().is_some_and(predicate));
        let mut removed = before - self.children.len();
        for child in self.child_elements_mut() {
            removed += child.remove_descendants(predicate);
        }
        removed
    }
}

fn walk_children<F>(element: &Element, path: &mut ElementPath, visitor: &mut F)
where
    F: FnMut(&ElementPath, &Element) -> Visit,
{
    for (index, node) in element.children.iter().enumerate() {
        let Node::Element(child) = node else {
            continue;
        };
        path.0.push(index);
        if visitor(path, child) == Visit::Descend {
            walk_children(child, path, visitor);
        }
        path.0.pop();
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let siblings = self.stack.last_mut()?;
            match siblings.next() {
                Some(Node::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                Some(_) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
