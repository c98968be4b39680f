//! # Kanji Colorize Markup
//!
//! A small, lossless markup tree for KanjiVG stroke order diagrams.
//!
//! KanjiVG files carry a copyright comment and a DOCTYPE with an internal
//! subset declaring the `kvg:` attributes. Generic XML writers tend to drop
//! or rewrite those, so this crate keeps every node and writes the document
//! back with only the edits made through the [`Element`] API.
//!
//! ## Usage
//!
//! ```
//! # use kanji_colorize_markup::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let mut document = parse(r#"<svg width="109"><path d="M1,2"/></svg>"#)?;
//!
//!     let paths = document.root().find_paths(|e| e.name() == "path");
//!     if let Some(path) = document.root_mut().get_mut(&paths[0]) {
//!         path.set_style_property("stroke", "#bf0909");
//!     }
//!
//!     assert_eq!(
//!         document.to_string(),
//!         r#"<svg width="109"><path d="M1,2" style="stroke:#bf0909"/></svg>"#
//!     );
//!     Ok(())
//! }
//! ```

mod error;
mod escape;
mod parser;
mod span;
mod tree;
mod writer;

pub use error::{ParseError, Result};
pub use escape::{escape_attribute, unescape};
pub use parser::parse;
pub use span::Span;
pub use tree::{Attributes, Descendants, Document, Element, ElementPath, Node, Visit};
