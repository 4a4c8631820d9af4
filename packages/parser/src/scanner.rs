use crate::error::{ParseError, ParseResult};
use crate::tokenizer::Token;
use std::ops::Range;

/// Result of scanning a component body: the preamble statement spans and
/// where the returned JSX begins.
#[derive(Debug, PartialEq)]
pub struct BodyLayout {
    /// Source spans of the statements preceding the top-level `return`,
    /// in order. Slices of the original text, passed through verbatim.
    pub statements: Vec<Range<usize>>,
    /// Offset of the `return` keyword itself.
    pub return_offset: usize,
    /// Offset of the `<` opening the returned JSX expression.
    pub jsx_offset: usize,
}

/// Walk the token stream at delimiter depth zero, collecting statement
/// boundaries until the first top-level `return`.
///
/// Statements end at a depth-zero `;`, or at a depth-zero `}` that is not
/// continued by the next token (block-bodied declarations without a
/// trailing semicolon). Statements after the `return` are unreachable and
/// never scanned.
pub fn scan_body(source: &str, tokens: &[(Token, Range<usize>)]) -> ParseResult<BodyLayout> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut statements: Vec<Range<usize>> = Vec::new();
    let mut stmt_start: Option<usize> = None;
    let mut prev_end = 0usize;

    for (i, (tok, span)) in tokens.iter().enumerate() {
        match tok {
            Token::Return if stack.is_empty() => {
                // A pending statement without a terminating `;` still
                // belongs to the preamble.
                if let Some(start) = stmt_start.take() {
                    if !source[start..span.start].trim().is_empty() {
                        statements.push(start..span.start);
                    }
                }
                let jsx_offset = find_jsx_start(source, tokens, i + 1)?;
                return Ok(BodyLayout {
                    statements,
                    return_offset: span.start,
                    jsx_offset,
                });
            }
            Token::LBrace => {
                stmt_start.get_or_insert(prev_end);
                stack.push(('{', span.start));
            }
            Token::LParen => {
                stmt_start.get_or_insert(prev_end);
                stack.push(('(', span.start));
            }
            Token::LBracket => {
                stmt_start.get_or_insert(prev_end);
                stack.push(('[', span.start));
            }
            Token::RBrace | Token::RParen | Token::RBracket => {
                let expected = match tok {
                    Token::RBrace => '{',
                    Token::RParen => '(',
                    _ => '[',
                };
                match stack.pop() {
                    None => {
                        return Err(ParseError::syntax(
                            source,
                            span.start,
                            "unbalanced closing delimiter",
                        ));
                    }
                    Some((open, _)) if open != expected => {
                        return Err(ParseError::syntax(
                            source,
                            span.start,
                            format!("closing delimiter does not match `{}`", open),
                        ));
                    }
                    Some(_) => {
                        if stack.is_empty()
                            && matches!(tok, Token::RBrace)
                            && ends_block_statement(source, tokens, i)
                        {
                            let start = stmt_start.take().unwrap_or(prev_end);
                            statements.push(start..span.end);
                            prev_end = span.end;
                        }
                    }
                }
            }
            Token::Semicolon if stack.is_empty() => {
                let start = stmt_start.take().unwrap_or(prev_end);
                if source[start..span.end].trim() != ";" {
                    statements.push(start..span.end);
                }
                prev_end = span.end;
            }
            _ => {
                stmt_start.get_or_insert(prev_end);
            }
        }
    }

    if let Some((open, offset)) = stack.last() {
        return Err(ParseError::syntax(
            source,
            *offset,
            format!("unclosed `{}`", open),
        ));
    }
    Err(ParseError::NoReturnFound)
}

/// A depth-zero `}` ends a statement unless the following token continues
/// the same expression (`;`, member access, operators, `else`, ...).
fn ends_block_statement(source: &str, tokens: &[(Token, Range<usize>)], i: usize) -> bool {
    let end = tokens[i].1.end;
    match tokens.get(i + 1) {
        None => true,
        Some((next, next_span)) => match next {
            Token::Const
            | Token::Let
            | Token::Var
            | Token::Function
            | Token::Return
            | Token::If
            | Token::For
            | Token::While => true,
            Token::Semicolon
            | Token::Dot
            | Token::Comma
            | Token::LParen
            | Token::RParen
            | Token::RBracket
            | Token::RBrace
            | Token::Equals
            | Token::Arrow
            | Token::Plus
            | Token::Minus
            | Token::Star
            | Token::Slash
            | Token::Question
            | Token::Colon
            | Token::Ampersand
            | Token::Pipe
            | Token::Percent => false,
            Token::Ident(name) if matches!(*name, "else" | "catch" | "finally") => false,
            _ => source[end..next_span.start].contains('\n'),
        },
    }
}

fn find_jsx_start(
    source: &str,
    tokens: &[(Token, Range<usize>)],
    mut j: usize,
) -> ParseResult<usize> {
    while let Some((tok, span)) = tokens.get(j) {
        match tok {
            Token::LParen => j += 1,
            Token::LAngle => return Ok(span.start),
            _ => {
                return Err(ParseError::syntax(
                    source,
                    span.start,
                    "expected a JSX element after `return`",
                ));
            }
        }
    }
    Err(ParseError::unexpected_eof("a JSX element after `return`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_preamble_statements_split_on_semicolons() {
        let source = "const a = 1;\nconst b = fn(a);\nreturn <div />;";
        let tokens = tokenize(source);
        let layout = scan_body(source, &tokens).unwrap();

        assert_eq!(layout.statements.len(), 2);
        assert_eq!(source[layout.statements[0].clone()].trim(), "const a = 1;");
        assert_eq!(source[layout.statements[1].clone()].trim(), "const b = fn(a);");
    }

    #[test]
    fn test_nested_return_is_not_the_return() {
        let source = "function helper() { return 1; }\nreturn <div />;";
        let tokens = tokenize(source);
        let layout = scan_body(source, &tokens).unwrap();

        assert_eq!(layout.statements.len(), 1);
        assert!(source[layout.statements[0].clone()].contains("helper"));
        assert!(source[layout.return_offset..].starts_with("return <div"));
    }

    #[test]
    fn test_missing_return_is_fatal() {
        let source = "const a = 1;";
        let tokens = tokenize(source);

        assert_eq!(scan_body(source, &tokens), Err(ParseError::NoReturnFound));
    }

    #[test]
    fn test_unclosed_brace_is_syntax_error() {
        let source = "const obj = { a: 1;\nreturn <div />;";
        let tokens = tokenize(source);

        assert!(matches!(
            scan_body(source, &tokens),
            Err(ParseError::Syntax { .. })
        ));
    }

    #[test]
    fn test_parenthesized_return_argument() {
        let source = "return (\n  <div />\n);";
        let tokens = tokenize(source);
        let layout = scan_body(source, &tokens).unwrap();

        assert_eq!(source.as_bytes()[layout.jsx_offset], b'<');
    }

    #[test]
    fn test_non_jsx_return_rejected() {
        let source = "return items;";
        let tokens = tokenize(source);

        assert!(matches!(
            scan_body(source, &tokens),
            Err(ParseError::Syntax { .. })
        ));
    }

    #[test]
    fn test_statements_after_return_ignored() {
        let source = "return <div />;\nconst unreachable = 1;";
        let tokens = tokenize(source);
        let layout = scan_body(source, &tokens).unwrap();

        assert!(layout.statements.is_empty());
    }
}
