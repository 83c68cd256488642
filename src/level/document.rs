//! Minimal XML element tree shared by every on-disk format
//!
//! Supports what level, checkpoint, ranking and legacy collection files
//! use: one root element, nested elements, double- or single-quoted
//! attributes, text content, comments, an optional `<?xml ?>` declaration
//! and the five predefined entities plus numeric character references.
//! Text content is kept verbatim (no trimming); callers decide.

use crate::error::CodecError;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{eof, map, opt, value},
    error::{Error as NomError, ErrorKind},
    multi::many0,
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};
use std::fmt::Write as FmtWrite;

/// Deepest element nesting accepted; none of our formats go past three
const MAX_DEPTH: usize = 64;

/// One element with its attributes, child elements and text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    /// In document order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Concatenated text content, entities decoded
    pub text: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set or replace an attribute
    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Parse a required attribute with `FromStr`
    pub fn parse_attr<T: std::str::FromStr>(&self, name: &str) -> Result<T, CodecError> {
        let raw = self.attr(name);
        raw.and_then(|v| v.trim().parse().ok())
            .ok_or_else(|| CodecError::MalformedAttribute {
                element: self.name.clone(),
                attribute: name.to_string(),
                value: raw.map(str::to_string),
            })
    }
}

enum Node {
    Element(Element),
    Text(String),
    Skip,
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'))(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
    ))(input)
}

fn attribute(input: &str) -> IResult<&str, (String, String)> {
    map(
        preceded(
            multispace1,
            separated_pair(name, delimited(multispace0, char('='), multispace0), quoted),
        ),
        |(k, v)| (k.to_string(), decode_entities(v)),
    )(input)
}

fn comment(input: &str) -> IResult<&str, ()> {
    value((), delimited(tag("<!--"), take_until("-->"), tag("-->")))(input)
}

fn declaration(input: &str) -> IResult<&str, ()> {
    value((), delimited(tag("<?"), take_until("?>"), tag("?>")))(input)
}

fn misc(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((comment, value((), multispace1)))))(input)
}

fn node(depth: usize) -> impl FnMut(&str) -> IResult<&str, Node> {
    move |input: &str| {
        alt((
            map(comment, |_| Node::Skip),
            map(|i| element(i, depth), Node::Element),
            map(take_while1(|c| c != '<'), |t: &str| Node::Text(decode_entities(t))),
        ))(input)
    }
}

fn element(input: &str, depth: usize) -> IResult<&str, Element> {
    let (input, _) = char('<')(input)?;
    let (input, open) = name(input)?;
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(NomError::new(input, ErrorKind::TooLarge)));
    }
    let (input, attributes) = many0(attribute)(input)?;
    let (input, _) = multispace0(input)?;

    let mut el = Element {
        name: open.to_string(),
        attributes,
        ..Default::default()
    };

    if let Ok((rest, _)) = tag::<_, _, NomError<&str>>("/>")(input) {
        return Ok((rest, el));
    }

    let (input, _) = char('>')(input)?;
    let (input, nodes) = many0(node(depth + 1))(input)?;
    let (input, _) = tag("</")(input)?;
    let (after_name, close) = name(input)?;
    if close != open {
        return Err(nom::Err::Failure(NomError::new(input, ErrorKind::Tag)));
    }
    let (input, _) = preceded(multispace0, char('>'))(after_name)?;

    for node in nodes {
        match node {
            Node::Element(child) => el.children.push(child),
            Node::Text(text) => el.text.push_str(&text),
            Node::Skip => {}
        }
    }
    // Indentation between child elements is not content
    if !el.children.is_empty() && el.text.trim().is_empty() {
        el.text.clear();
    }

    Ok((input, el))
}

fn document(input: &str) -> IResult<&str, Element> {
    let (input, (_, _, _, root, _, _)) = tuple((
        opt(char('\u{feff}')),
        preceded(multispace0, opt(declaration)),
        misc,
        |i| element(i, 1),
        misc,
        eof,
    ))(input)?;
    Ok((input, root))
}

/// Parse a document and return its root element
pub fn parse_document(input: &str) -> Result<Element, CodecError> {
    match document(input) {
        Ok((_, root)) => Ok(root),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let line = input.len().saturating_sub(e.input.len());
            let line = input[..line].matches('\n').count() + 1;
            let near: String = e.input.chars().take(24).collect();
            Err(CodecError::Syntax(format!("line {line}: unexpected input near {near:?}")))
        }
        Err(nom::Err::Incomplete(_)) => Err(CodecError::Syntax("unexpected end of input".into())),
    }
}

/// Serialize `root` with a declaration and two-space indentation
pub fn write_document(root: &Element) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n");
    write_element(&mut out, root, 0);
    out
}

fn write_element(out: &mut String, el: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<{}", el.name);
    for (k, v) in &el.attributes {
        let _ = write!(out, " {k}=\"{}\"", escape(v));
    }

    if el.children.is_empty() {
        if el.text.is_empty() {
            out.push_str(" />\n");
        } else {
            let _ = writeln!(out, ">{}</{}>", escape(&el.text), el.name);
        }
        return;
    }

    out.push_str(">\n");
    for child in &el.children {
        write_element(out, child, depth + 1);
    }
    let _ = writeln!(out, "{indent}</{}>", el.name);
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest.find(';') else {
            break;
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                // Not an entity we know; keep it literally
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
