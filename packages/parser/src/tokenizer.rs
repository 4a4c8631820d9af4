use logos::Logos;
use std::ops::Range;

/// Token types for the JavaScript subset the editor understands.
///
/// The lexer only has to be good enough to scan statement structure: the
/// JSX region after the `return` is handled by a dedicated cursor parser,
/// and expression text is carried opaquely rather than modeled.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
pub enum Token<'src> {
    // Keywords that can begin a statement
    #[token("return")]
    Return,

    #[token("const")]
    Const,

    #[token("let")]
    Let,

    #[token("var")]
    Var,

    #[token("function")]
    Function,

    #[token("if")]
    If,

    #[token("for")]
    For,

    #[token("while")]
    While,

    // Identifiers
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice())]
    Ident(&'src str),

    // String literals (both quote styles)
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| lex.slice())]
    Str(&'src str),

    // Template literals without nested backticks
    #[regex(r"`([^`\\]|\\.)*`", |lex| lex.slice())]
    Template(&'src str),

    // Numbers
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    // Symbols
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("=>")]
    Arrow,

    #[token("=")]
    Equals,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("!")]
    Bang,

    #[token("?")]
    Question,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[token("%")]
    Percent,
}

/// Tokenize a source string.
///
/// Spans that fail to lex (stray characters inside JSX text, for example)
/// are skipped rather than fatal; structural validity is enforced by the
/// statement scanner and the JSX parser, not the lexer.
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    let lexer = Token::lexer(source);
    lexer
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let source = "return const let var function";
        let tokens = tokenize(source);

        assert_eq!(tokens[0].0, Token::Return);
        assert_eq!(tokens[1].0, Token::Const);
        assert_eq!(tokens[2].0, Token::Let);
        assert_eq!(tokens[3].0, Token::Var);
        assert_eq!(tokens[4].0, Token::Function);
    }

    #[test]
    fn test_identifiers() {
        let source = "items $state _private motionDiv";
        let tokens = tokenize(source);

        assert_eq!(tokens[0].0, Token::Ident("items"));
        assert_eq!(tokens[1].0, Token::Ident("$state"));
        assert_eq!(tokens[2].0, Token::Ident("_private"));
        assert_eq!(tokens[3].0, Token::Ident("motionDiv"));
    }

    #[test]
    fn test_strings_both_quote_styles() {
        let source = r#""hello" 'world' "escaped \"quote\"""#;
        let tokens = tokenize(source);

        assert!(matches!(tokens[0].0, Token::Str(_)));
        assert!(matches!(tokens[1].0, Token::Str(_)));
        assert!(matches!(tokens[2].0, Token::Str(_)));
    }

    #[test]
    fn test_template_literal() {
        let source = "`count: ${count}`";
        let tokens = tokenize(source);

        assert!(matches!(tokens[0].0, Token::Template(_)));
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_arrow_lexes_as_one_token() {
        let source = "x => x";
        let tokens = tokenize(source);

        assert_eq!(tokens[1].0, Token::Arrow);
    }

    #[test]
    fn test_comments_skipped() {
        let source = "// line\nconst /* block */ x = 1;";
        let tokens = tokenize(source);

        assert_eq!(tokens[0].0, Token::Const);
        assert_eq!(tokens[1].0, Token::Ident("x"));
    }

    #[test]
    fn test_spans_index_into_source() {
        let source = "const x = 42;";
        let tokens = tokenize(source);

        let (_, span) = tokens.iter().find(|(t, _)| matches!(t, Token::Number(_))).unwrap();
        assert_eq!(&source[span.clone()], "42");
    }
}
