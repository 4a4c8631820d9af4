use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Errors surfaced by `parse`. All of these are fatal: no partial tree is
/// produced. The warning-level no-root-element condition is not an error;
/// it yields a `None` tree instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        offset: usize,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("component body has no top-level return statement")]
    NoReturnFound,
}

impl ParseError {
    /// Build a syntax error at a byte offset, resolving line/column.
    pub fn syntax(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_col(source, offset);
        Self::Syntax {
            offset,
            line,
            column,
            message: message.into(),
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }

    /// Byte offset of the error, when one is known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { offset, .. } => Some(*offset),
            ParseError::UnexpectedEof { .. } => None,
            ParseError::NoReturnFound => None,
        }
    }
}

/// Resolve a byte offset to a 1-based line/column pair.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let clamped = offset.min(source.len());
    let mut line = 1;
    let mut column = 1;
    for ch in source[..clamped].chars() {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Pretty-print an error with source context using ariadne.
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let start = error.offset().unwrap_or_else(|| source.len().saturating_sub(1));
    let end = (start + 1).min(source.len().max(1));

    let mut output = Vec::new();
    let report = Report::build(ReportKind::Error, filename, start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, start..end))
                .with_color(Color::Red)
                .with_message(error.to_string()),
        )
        .finish();

    report
        .write((filename, Source::from(source)), &mut output)
        .ok();

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}
