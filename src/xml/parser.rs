//! A small well-formedness-checking XML parser for workflow exports.
//!
//! Covers the subset those exports actually use: an optional XML declaration,
//! DOCTYPE, comments, CDATA sections, elements with quoted attributes, and
//! the five predefined entities plus numeric character references. Namespace
//! handling is deliberately absent; prefixed names are kept verbatim as tag
//! names.

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::xml::{Document, Element};

/// Parse a complete document from a string.
///
/// Whitespace-only text between elements is dropped; any other text content
/// is attached to the enclosing element. Returns [`Error::Parse`] with a line
/// number when the input is not well formed.
pub fn parse_str(input: &str) -> Result<Document, Error> {
    Parser::new(input).parse()
}

/// Read and parse a document from a file.
pub fn parse_file(path: &Path) -> Result<Document, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&content)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        // Skip a UTF-8 BOM if present.
        let bytes = input.as_bytes();
        let pos = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            input: bytes,
            pos,
            line: 1,
        }
    }

    fn parse(mut self) -> Result<Document, Error> {
        let mut doc: Option<Document> = None;
        // Ids of currently open elements, innermost last.
        let mut open: Vec<u32> = Vec::new();

        loop {
            let text = self.take_text()?;
            if !text.trim().is_empty() {
                match open.last() {
                    Some(&id) => append_text(doc.as_mut().expect("open element implies document"), id, text.trim()),
                    None => return self.fail("text content outside the root element"),
                }
            }
            if self.at_end() {
                break;
            }

            if self.eat(b"<!--") {
                self.skip_until(b"-->", "unterminated comment")?;
            } else if self.eat(b"<![CDATA[") {
                let raw = self.take_until(b"]]>", "unterminated CDATA section")?;
                match open.last() {
                    Some(&id) => {
                        if !raw.trim().is_empty() {
                            append_text(doc.as_mut().expect("open element implies document"), id, raw.trim());
                        }
                    }
                    None => return self.fail("CDATA outside the root element"),
                }
            } else if self.eat(b"<?") {
                self.skip_until(b"?>", "unterminated processing instruction")?;
            } else if self.eat(b"<!") {
                self.skip_doctype()?;
            } else if self.eat(b"</") {
                let tag = self.take_name()?;
                self.skip_whitespace();
                if !self.eat(b">") {
                    return self.fail("expected '>' after closing tag name");
                }
                match open.pop() {
                    Some(id) => {
                        let doc = doc.as_ref().expect("open element implies document");
                        if doc.node(id).tag != tag {
                            return self.fail(&format!(
                                "closing tag </{}> does not match <{}>",
                                tag,
                                doc.node(id).tag
                            ));
                        }
                    }
                    None => return self.fail(&format!("unexpected closing tag </{}>", tag)),
                }
            } else if self.eat(b"<") {
                let (element, self_closing) = self.take_element()?;
                let id = if let Some(doc) = doc.as_mut() {
                    match open.last() {
                        Some(&parent) => doc.add_child(parent, element),
                        None => return self.fail("more than one root element"),
                    }
                } else {
                    let created = Document::new(element);
                    let root = created.root();
                    doc = Some(created);
                    root
                };
                if !self_closing {
                    open.push(id);
                }
            } else {
                return self.fail("unexpected character");
            }
        }

        if let Some(&id) = open.last() {
            let doc = doc.as_ref().expect("open element implies document");
            return self.fail(&format!("unclosed element <{}>", doc.node(id).tag));
        }
        doc.ok_or(Error::Parse {
            line: self.line,
            message: "document contains no root element".to_string(),
        })
    }

    /// Parse a start tag after the `<` has been consumed. Returns the element
    /// and whether the tag was self-closing.
    fn take_element(&mut self) -> Result<(Element, bool), Error> {
        let tag = self.take_name()?;
        let mut element = Element::new(tag);

        loop {
            self.skip_whitespace();
            if self.eat(b"/>") {
                return Ok((element, true));
            }
            if self.eat(b">") {
                return Ok((element, false));
            }
            let name = self.take_name()?;
            self.skip_whitespace();
            if !self.eat(b"=") {
                return self.fail(&format!("attribute '{}' is missing '='", name));
            }
            self.skip_whitespace();
            let quote = match self.peek() {
                Some(q @ (b'"' | b'\'')) => q,
                _ => return self.fail("attribute value must be quoted"),
            };
            self.pos += 1;
            let raw = self.take_until(&[quote], "unterminated attribute value")?;
            element.set_attr(name, unescape(&raw));
        }
    }

    /// Accumulate raw character data up to the next `<` (or end of input).
    fn take_text(&mut self) -> Result<String, Error> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'<' {
                break;
            }
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
        let raw = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error("document is not valid UTF-8"))?;
        Ok(unescape(raw))
    }

    fn take_name(&mut self) -> Result<String, Error> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':') {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return self.fail("expected a name");
        }
        Ok(String::from_utf8_lossy(&self.input[start..self.pos]).into_owned())
    }

    /// Skip a DOCTYPE declaration, including a bracketed internal subset.
    fn skip_doctype(&mut self) -> Result<(), Error> {
        let mut depth = 0usize;
        while let Some(b) = self.peek() {
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
            match b {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => return Ok(()),
                _ => {}
            }
        }
        self.fail("unterminated DOCTYPE declaration")
    }

    fn take_until(&mut self, delim: &[u8], unterminated: &str) -> Result<String, Error> {
        let start = self.pos;
        while self.pos + delim.len() <= self.input.len() {
            if &self.input[self.pos..self.pos + delim.len()] == delim {
                let raw = std::str::from_utf8(&self.input[start..self.pos])
                    .map_err(|_| self.error("document is not valid UTF-8"))?;
                self.pos += delim.len();
                return Ok(raw.to_string());
            }
            if self.input[self.pos] == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
        self.fail(unterminated)
    }

    fn skip_until(&mut self, delim: &[u8], unterminated: &str) -> Result<(), Error> {
        self.take_until(delim, unterminated).map(|_| ())
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                self.line += 1;
            }
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn eat(&mut self, token: &[u8]) -> bool {
        if self.input[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, message: &str) -> Error {
        Error::Parse {
            line: self.line,
            message: message.to_string(),
        }
    }

    fn fail<T>(&self, message: &str) -> Result<T, Error> {
        Err(self.error(message))
    }
}

/// Attach a text run to an element, joining multiple runs with a newline.
fn append_text(doc: &mut Document, id: u32, text: &str) {
    let node = doc.node_mut(id);
    match node.text.as_mut() {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(text);
        }
        None => node.text = Some(text.to_string()),
    }
}

/// Resolve the predefined entities and numeric character references.
/// Unknown references are kept verbatim, matching lenient export readers.
fn unescape(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match rest.find(';') {
            Some(semi) if semi <= 12 => {
                let entity = &rest[1..semi];
                match resolve_entity(entity) {
                    Some(c) => out.push(c),
                    None => out.push_str(&rest[..=semi]),
                }
                rest = &rest[semi + 1..];
            }
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}
