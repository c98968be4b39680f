//! Markup parser built on winnow.
//!
//! The grammar covers what KanjiVG files use: an XML declaration and other
//! processing instructions, comments, a DOCTYPE with an internal subset,
//! elements with single- or double-quoted attributes, character data and
//! CDATA sections. Namespaces are not resolved; a prefixed name such as
//! `kvg:element` is just a name.

use log::trace;
use winnow::{
    Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{alt, cut_err, delimited, eof, opt, preceded, repeat, terminated},
    error::{ContextError, ErrMode},
    token::{literal, take_till, take_until, take_while},
};

use crate::{
    error::{ParseError, Result},
    escape::unescape,
    span::Span,
    tree::{Attributes, Document, Element, Node},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// Name of the element whose end tag was expected
    EndTag(String),
}

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

fn tag<'src>(expected: &'static str) -> impl FnMut(&mut Input<'src>) -> IResult<&'src str> {
    move |input: &mut Input<'src>| literal(expected).parse_next(input)
}

fn whitespace<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    multispace0.parse_next(input)
}

fn required_whitespace<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    multispace1.parse_next(input)
}

fn end_of_input<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    eof.parse_next(input)
}

/// Parse an element or attribute name, prefix included
fn name<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, ':' | '_' | '-' | '.')
    })
    .context(Context::Label("name"))
    .parse_next(input)
}

/// Parse a quoted attribute value and decode its entities
fn quoted_value<'src>(input: &mut Input<'src>) -> IResult<String> {
    alt((
        delimited(tag("\""), take_till(0.., '"'), tag("\"")),
        delimited(tag("'"), take_till(0.., '\''), tag("'")),
    ))
    .map(|raw: &str| unescape(raw).into_owned())
    .context(Context::Label("quoted attribute value"))
    .parse_next(input)
}

fn attribute<'src>(input: &mut Input<'src>) -> IResult<(&'src str, String)> {
    (
        preceded(required_whitespace, name),
        preceded(
            (whitespace, tag("="), whitespace),
            cut_err(quoted_value),
        ),
    )
        .parse_next(input)
}

fn attributes<'src>(input: &mut Input<'src>) -> IResult<Attributes> {
    repeat(0.., attribute)
        .fold(Attributes::new, |mut attributes, (key, value)| {
            attributes.insert(key.to_string(), value);
            attributes
        })
        .parse_next(input)
}

fn comment<'src>(input: &mut Input<'src>) -> IResult<Node> {
    preceded(
        tag("<!--"),
        cut_err(terminated(take_until(0.., "-->"), tag("-->"))),
    )
    .map(|body: &str| Node::Comment(body.to_string()))
    .context(Context::Label("comment"))
    .parse_next(input)
}

fn cdata<'src>(input: &mut Input<'src>) -> IResult<Node> {
    preceded(
        tag("<![CDATA["),
        cut_err(terminated(take_until(0.., "]]>"), tag("]]>"))),
    )
    .map(|body: &str| Node::CData(body.to_string()))
    .context(Context::Label("CDATA section"))
    .parse_next(input)
}

fn processing_instruction<'src>(input: &mut Input<'src>) -> IResult<Node> {
    preceded(
        tag("<?"),
        cut_err(terminated(take_until(0.., "?>"), tag("?>"))),
    )
    .map(|body: &str| Node::ProcessingInstruction(body.to_string()))
    .context(Context::Label("processing instruction"))
    .parse_next(input)
}

/// Parse a quoted literal, quotes included
fn quoted_literal<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    alt((
        (tag("\""), take_till(0.., '"'), tag("\"")),
        (tag("'"), take_till(0.., '\''), tag("'")),
    ))
    .take()
    .parse_next(input)
}

/// Declaration text up to the first unquoted character in `stops`
///
/// Quoted literals and comments are taken whole, so a stop character inside
/// them does not end the text.
fn declaration_text<'src>(stops: &'static [char]) -> impl FnMut(&mut Input<'src>) -> IResult<&'src str> {
    move |input: &mut Input<'src>| {
        repeat(
            0..,
            alt((
                (tag("<!--"), take_until(0.., "-->"), tag("-->")).take(),
                quoted_literal,
                take_till(1.., move |c: char| matches!(c, '"' | '\'' | '<') || stops.contains(&c)),
                tag("<"),
            )),
        )
        .fold(|| (), |(), _| ())
        .take()
        .parse_next(input)
    }
}

/// Parse `<!DOCTYPE ...>`, keeping an internal subset `[...]` verbatim
fn doctype<'src>(input: &mut Input<'src>) -> IResult<Node> {
    preceded(
        tag("<!DOCTYPE"),
        cut_err(terminated(
            (
                declaration_text(&['[', '>']),
                opt((tag("["), cut_err((declaration_text(&[']']), tag("]"))))),
                take_till(0.., '>'),
            )
                .take(),
            tag(">"),
        )),
    )
    .map(|body: &str| Node::Doctype(body.to_string()))
    .context(Context::Label("document type declaration"))
    .parse_next(input)
}

fn text<'src>(input: &mut Input<'src>) -> IResult<Node> {
    take_till(1.., '<')
        .map(|text: &str| Node::Text(text.to_string()))
        .parse_next(input)
}

fn whitespace_node<'src>(input: &mut Input<'src>) -> IResult<Node> {
    required_whitespace
        .map(|text: &str| Node::Text(text.to_string()))
        .parse_next(input)
}

fn end_tag<'src>(expected: &'src str) -> impl FnMut(&mut Input<'src>) -> IResult<()> {
    move |input: &mut Input<'src>| {
        let start = *input;
        let found = delimited(tag("</"), name, (whitespace, tag(">")))
            .context(Context::EndTag(expected.to_string()))
            .parse_next(input)?;
        if found == expected {
            return Ok(());
        }
        // report the mismatched end tag, not what follows it
        *input = start;
        let mut e = ContextError::new();
        e.push(Context::EndTag(expected.to_string()));
        Err(ErrMode::Cut(e))
    }
}

fn element<'src>(input: &mut Input<'src>) -> IResult<Element> {
    let name = preceded(tag("<"), name).parse_next(input)?;
    let attributes = attributes.parse_next(input)?;
    whitespace.parse_next(input)?;

    let mut element = Element::with_attributes(name, attributes);
    if opt(tag("/>")).parse_next(input)?.is_some() {
        return Ok(element);
    }
    cut_err(tag(">"))
        .context(Context::Label("end of start tag"))
        .parse_next(input)?;

    let children: Vec<Node> = repeat(0.., node).parse_next(input)?;
    *element.children_mut() = children;
    cut_err(end_tag(name)).parse_next(input)?;

    Ok(element)
}

fn node<'src>(input: &mut Input<'src>) -> IResult<Node> {
    alt((
        comment,
        cdata,
        processing_instruction,
        element.map(Node::Element),
        text,
    ))
    .parse_next(input)
}

/// Anything allowed before or after the root element
fn misc<'src>(input: &mut Input<'src>) -> IResult<Node> {
    alt((comment, processing_instruction, doctype, whitespace_node)).parse_next(input)
}

fn document<'src>(input: &mut Input<'src>) -> IResult<Document> {
    let prolog: Vec<Node> = repeat(0.., misc).parse_next(input)?;
    let root = cut_err(element)
        .context(Context::Label("root element"))
        .parse_next(input)?;
    let epilog: Vec<Node> = repeat(0.., misc).parse_next(input)?;
    cut_err(end_of_input)
        .context(Context::Label("end of document"))
        .parse_next(input)?;

    Ok(Document::from_parts(prolog, root, epilog))
}

/// Parses markup text into a [`Document`].
///
/// A leading byte order mark is ignored.
///
/// # Errors
///
/// Returns a [`ParseError`] whose span points into `source` when the text is
/// not well-formed: an unterminated comment or tag, a mismatched end tag, a
/// missing root element, or content after the root element.
pub fn parse(source: &str) -> Result<Document> {
    let mut input: Input<'_> = source.strip_prefix('\u{feff}').unwrap_or(source);

    match document.parse_next(&mut input) {
        Ok(document) => {
            trace!(len = source.len(); "Parsed markup document");
            Ok(document)
        }
        Err(err) => Err(convert_error(err, source, source.len() - input.len())),
    }
}

/// Convert a winnow error into a [`ParseError`] at `offset` bytes into `source`.
fn convert_error(error: ErrMode<ContextError<Context>>, source: &str, offset: usize) -> ParseError {
    let context = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e,
        _ => ContextError::new(),
    };

    let width = source[offset..].chars().next().map_or(0, char::len_utf8);
    let span = Span::new(offset..offset + width);

    let end_tag = context.context().find_map(|ctx| match ctx {
        Context::EndTag(name) => Some(name.clone()),
        Context::Label(_) => None,
    });
    if let Some(name) = end_tag {
        return ParseError::new(
            format!("expected end tag `</{name}>`"),
            span,
            "unexpected content",
            Some(format!("`<{name}>` must be closed before its parent")),
        );
    }

    let label = context.context().find_map(|ctx| match ctx {
        Context::Label(label) => Some(*label),
        Context::EndTag(_) => None,
    });
    match label {
        Some("end of document") => ParseError::new(
            "unexpected content after the root element",
            span,
            "expected end of document",
            Some("only comments and processing instructions may follow the root element".to_string()),
        ),
        Some(label) => ParseError::new(
            format!("invalid {label}"),
            span,
            format!("expected {label}"),
            None,
        ),
        None => ParseError::new("malformed markup", span, "unexpected input", None),
    }
}
