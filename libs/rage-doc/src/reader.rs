//! # Document Reader
//!
//! A cursor-based recursive descent parser for the XML subset the external
//! toolchain emits: a declaration, comments, elements with attributes, and
//! text content. Namespaces, CDATA, and doctypes are not part of the wire
//! format and are rejected.

use crate::error::DocError;
use crate::node::DocNode;

/// Parses document text into a [`DocNode`] tree.
///
/// Returns the single root element; leading declaration and comments are
/// skipped.
pub fn read_tree(source: &str) -> Result<DocNode, DocError> {
    let mut parser = Parser::new(source);
    parser.skip_prolog();
    let root = parser.parse_element()?;
    parser.skip_trivia();
    if !parser.is_eof() {
        return Err(parser.error("trailing content after root element"));
    }
    Ok(root)
}

// =============================================================================
// PARSER
// =============================================================================

struct Parser<'a> {
    source: &'a str,
    byte: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        // Tolerate a UTF-8 BOM from external editors.
        let byte = if source.starts_with('\u{feff}') { 3 } else { 0 };
        Self { source, byte }
    }

    fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.byte..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        Some(c)
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.source[self.byte..].starts_with(prefix)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.byte += prefix.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, prefix: &str) -> Result<(), DocError> {
        if self.eat(prefix) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{prefix}'")))
        }
    }

    fn error(&self, message: impl Into<String>) -> DocError {
        DocError::parse(message, self.byte)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if self.starts_with("<!--") {
                self.byte += 4;
                match self.source[self.byte..].find("-->") {
                    Some(end) => self.byte += end + 3,
                    None => self.byte = self.source.len(),
                }
                continue;
            }
            break;
        }
    }

    /// Skips the `<?xml ...?>` declaration and any leading comments.
    fn skip_prolog(&mut self) {
        self.skip_trivia();
        if self.eat("<?") {
            match self.source[self.byte..].find("?>") {
                Some(end) => self.byte += end + 2,
                None => self.byte = self.source.len(),
            }
        }
        self.skip_trivia();
    }

    /// Parses one element: `<name attrs/>` or `<name attrs>content</name>`.
    fn parse_element(&mut self) -> Result<DocNode, DocError> {
        self.expect("<")?;
        let name = self.parse_name()?;
        let mut node = DocNode::new(name);

        loop {
            self.skip_whitespace();
            if self.eat("/>") {
                return Ok(node);
            }
            if self.eat(">") {
                break;
            }
            let (attr, value) = self.parse_attribute()?;
            node.attributes.push((attr, value));
        }

        self.parse_content(&mut node)?;
        self.expect("</")?;
        let closing = self.parse_name()?;
        if closing != node.name {
            return Err(self.error(format!(
                "mismatched closing tag '{}' for '{}'",
                closing, node.name
            )));
        }
        self.skip_whitespace();
        self.expect(">")?;
        Ok(node)
    }

    /// Parses text and child elements until the closing tag.
    fn parse_content(&mut self, node: &mut DocNode) -> Result<(), DocError> {
        let mut text = String::new();
        loop {
            if self.is_eof() {
                return Err(self.error(format!("unterminated element '{}'", node.name)));
            }
            if self.starts_with("<!--") {
                self.skip_trivia();
                continue;
            }
            if self.starts_with("</") {
                break;
            }
            if self.starts_with("<") {
                node.children.push(self.parse_element()?);
                continue;
            }
            let c = self.advance().ok_or_else(|| self.error("unexpected end of input"))?;
            if c == '&' {
                text.push(self.parse_entity()?);
            } else {
                text.push(c);
            }
        }
        node.text = text.trim().to_string();
        Ok(())
    }

    fn parse_name(&mut self) -> Result<String, DocError> {
        let start = self.byte;
        while self
            .peek()
            .map_or(false, |c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            self.advance();
        }
        if self.byte == start {
            return Err(self.error("expected a tag or attribute name"));
        }
        Ok(self.source[start..self.byte].to_string())
    }

    fn parse_attribute(&mut self) -> Result<(String, String), DocError> {
        let name = self.parse_name()?;
        self.skip_whitespace();
        self.expect("=")?;
        self.skip_whitespace();
        let quote = match self.advance() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Err(self.error("expected a quoted attribute value")),
        };
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => break,
                Some('&') => value.push(self.parse_entity()?),
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated attribute value")),
            }
        }
        Ok((name, value))
    }

    fn parse_entity(&mut self) -> Result<char, DocError> {
        let end = self.source[self.byte..]
            .find(';')
            .ok_or_else(|| self.error("unterminated entity"))?;
        let entity = &self.source[self.byte..self.byte + end];
        let c = match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            other => return Err(self.error(format!("unknown entity '&{other};'"))),
        };
        self.byte += end + 1;
        Ok(c)
    }
}

// =============================================================================
// TESTS
// =============================================================================
