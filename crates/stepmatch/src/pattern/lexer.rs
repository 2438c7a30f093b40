//! Definition lexer converting definition strings into semantic tokens.

use crate::errors::PatternError;

use super::placeholder::{Placeholder, parse_placeholder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Unescaped literal text.
    Literal(String),
    Placeholder(Placeholder),
}

/// Split a definition into literal runs and placeholders.
///
/// A backslash makes the following character literal; a trailing lone
/// backslash is itself literal. A `}` outside a placeholder is literal text.
pub(crate) fn lex_definition(definition: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = definition.char_indices().peekable();

    let flush_literal = |literal: &mut String, tokens: &mut Vec<Token>| {
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(literal)));
        }
    };

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, next)) => literal.push(next),
                None => literal.push('\\'),
            },
            '{' => {
                flush_literal(&mut literal, &mut tokens);
                let placeholder = parse_placeholder(definition, pos)?;
                while chars.next_if(|&(i, _)| i < placeholder.end).is_some() {}
                tokens.push(Token::Placeholder(placeholder));
            }
            other => literal.push(other),
        }
    }

    flush_literal(&mut literal, &mut tokens);
    Ok(tokens)
}
