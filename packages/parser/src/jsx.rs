use crate::error::{ParseError, ParseResult};

/// Raw JSX tree produced by the cursor parser, before node transformation.
/// Borrowed slices of the original source; expression containers are kept
/// as opaque text.
#[derive(Debug, PartialEq)]
pub enum RawChild<'src> {
    Element(RawElement<'src>),
    Text(&'src str),
    Expr(&'src str),
}

/// An element or fragment (`tag` is empty for fragments).
#[derive(Debug, PartialEq)]
pub struct RawElement<'src> {
    pub tag: &'src str,
    pub attributes: Vec<RawAttr<'src>>,
    pub children: Vec<RawChild<'src>>,
}

#[derive(Debug, PartialEq)]
pub struct RawAttr<'src> {
    pub name: &'src str,
    pub value: RawValue<'src>,
}

#[derive(Debug, PartialEq)]
pub enum RawValue<'src> {
    /// Boolean shorthand (`disabled`).
    Shorthand,
    /// Quoted string value, without the quotes.
    Str(&'src str),
    /// Braced expression, without the outer braces.
    Expr(&'src str),
}

/// Character-level recursive-descent parser for the JSX region.
///
/// The token lexer cannot scan JSX text content (it is not lexable over
/// the statement grammar), so the region after `return` is walked with a
/// cursor instead. Positions are absolute offsets into the full source so
/// errors report real line/column numbers.
pub struct JsxParser<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> JsxParser<'src> {
    pub fn new(source: &'src str, pos: usize) -> Self {
        Self { source, pos }
    }

    pub fn parse_root(&mut self) -> ParseResult<RawElement<'src>> {
        self.skip_ws();
        self.parse_element()
    }

    fn parse_element(&mut self) -> ParseResult<RawElement<'src>> {
        self.expect('<')?;
        self.skip_ws();
        if self.eat('>') {
            let children = self.parse_children("")?;
            return Ok(RawElement {
                tag: "",
                attributes: Vec::new(),
                children,
            });
        }

        let tag = self.tag_name()?;
        let attributes = self.parse_attributes()?;
        self.skip_ws();
        if self.rest().starts_with("/>") {
            self.pos += 2;
            return Ok(RawElement {
                tag,
                attributes,
                children: Vec::new(),
            });
        }
        self.expect('>')?;
        let children = self.parse_children(tag)?;
        Ok(RawElement {
            tag,
            attributes,
            children,
        })
    }

    fn parse_children(&mut self, tag: &'src str) -> ParseResult<Vec<RawChild<'src>>> {
        let mut children = Vec::new();
        loop {
            match self.peek() {
                None => {
                    let expected = if tag.is_empty() {
                        "`</>` to close the fragment".to_string()
                    } else {
                        format!("`</{}>`", tag)
                    };
                    return Err(ParseError::unexpected_eof(expected));
                }
                Some('<') => {
                    if self.rest().starts_with("</") {
                        let close_offset = self.pos;
                        self.pos += 2;
                        self.skip_ws();
                        let close = if self.peek() == Some('>') {
                            ""
                        } else {
                            self.tag_name()?
                        };
                        self.skip_ws();
                        self.expect('>')?;
                        if close != tag {
                            return Err(ParseError::syntax(
                                self.source,
                                close_offset,
                                format!("closing tag `{}` does not match `{}`", close, tag),
                            ));
                        }
                        return Ok(children);
                    }
                    children.push(RawChild::Element(self.parse_element()?));
                }
                Some('{') => children.push(RawChild::Expr(self.braced_expr()?)),
                Some(_) => {
                    let start = self.pos;
                    while let Some(c) = self.peek() {
                        if c == '<' || c == '{' {
                            break;
                        }
                        self.bump();
                    }
                    children.push(RawChild::Text(&self.source[start..self.pos]));
                }
            }
        }
    }

    fn parse_attributes(&mut self) -> ParseResult<Vec<RawAttr<'src>>> {
        let mut attrs = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(ParseError::unexpected_eof("`>` to close the tag")),
                Some('>') | Some('/') => return Ok(attrs),
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    let name = self.attr_name();
                    self.skip_ws();
                    let value = if self.eat('=') {
                        self.skip_ws();
                        match self.peek() {
                            Some('"') => RawValue::Str(self.quoted('"')?),
                            Some('\'') => RawValue::Str(self.quoted('\'')?),
                            Some('{') => RawValue::Expr(self.braced_expr()?),
                            _ => return Err(self.error("expected an attribute value")),
                        }
                    } else {
                        RawValue::Shorthand
                    };
                    attrs.push(RawAttr { name, value });
                }
                Some(_) => return Err(self.error("unexpected character in tag")),
            }
        }
    }

    fn tag_name(&mut self) -> ParseResult<&'src str> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.bump(),
            _ => return Err(self.error("expected a tag name")),
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                self.bump();
            } else {
                break;
            }
        }
        Ok(&self.source[start..self.pos])
    }

    fn attr_name(&mut self) -> &'src str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                self.bump();
            } else {
                break;
            }
        }
        &self.source[start..self.pos]
    }

    /// Quoted attribute value. JSX strings have no escape sequences, so
    /// this scans to the matching quote.
    fn quoted(&mut self, quote: char) -> ParseResult<&'src str> {
        self.bump();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value = &self.source[start..self.pos];
                self.bump();
                return Ok(value);
            }
            self.bump();
        }
        Err(ParseError::unexpected_eof("a closing quote"))
    }

    /// Balanced `{...}` scan that honors nested braces and string
    /// literals, returning the trimmed interior.
    fn braced_expr(&mut self) -> ParseResult<&'src str> {
        let open = self.pos;
        self.bump();
        let start = self.pos;
        let mut depth = 1usize;
        let mut in_string: Option<char> = None;
        let mut escaped = false;

        while let Some(c) = self.peek() {
            if let Some(quote) = in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    in_string = None;
                }
                self.bump();
                continue;
            }
            match c {
                '"' | '\'' | '`' => in_string = Some(c),
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let inner = self.source[start..self.pos].trim();
                        self.bump();
                        return Ok(inner);
                    }
                }
                _ => {}
            }
            self.bump();
        }
        Err(ParseError::syntax(
            self.source,
            open,
            "unterminated `{` expression",
        ))
    }

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            match self.peek() {
                Some(found) => Err(self.error(format!("expected `{}`, found `{}`", expected, found))),
                None => Err(ParseError::unexpected_eof(format!("`{}`", expected))),
            }
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::syntax(self.source, self.pos, message)
    }
}
