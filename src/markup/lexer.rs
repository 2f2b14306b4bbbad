//! Lexer for template markup using logos
//!
//! Markup needs two lexing modes: element content (text and tag openers) and
//! the inside of a start tag (attribute names and values). Both are logos
//! lexers, switched with `morph`, and flattened into a single [`Token`]
//! stream for the grammar.

use std::fmt;

use logos::Logos;

use super::VOID_ELEMENTS;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Token stream consumed by the grammar
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// `<name` opening a start tag
    TagOpen(String),
    /// `>` closing a start tag that has content
    TagEnd,
    /// `/>`, or `>` after a void element
    SelfClose,
    /// `</name>`
    TagClose(String),
    AttrName(String),
    Equals,
    AttrValue(String),
    Text(String),
    /// Input that matches neither mode
    Invalid(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::TagOpen(name) => write!(f, "'<{}'", name),
            Token::TagEnd => write!(f, "'>'"),
            Token::SelfClose => write!(f, "'/>'"),
            Token::TagClose(name) => write!(f, "'</{}>'", name),
            Token::AttrName(name) => write!(f, "attribute '{}'", name),
            Token::Equals => write!(f, "'='"),
            Token::AttrValue(value) => write!(f, "value \"{}\"", value),
            Token::Text(text) => write!(f, "text \"{}\"", text),
            Token::Invalid(text) => write!(f, "invalid input '{}'", text),
        }
    }
}

#[derive(Logos, Debug, Clone, PartialEq)]
enum Content {
    #[regex(r"<!--([^-]|-[^-])*-->", logos::skip)]
    #[regex(r"<![a-zA-Z][^>]*>", logos::skip)]
    Ignored,

    #[regex(r"<[a-zA-Z][a-zA-Z0-9_.:\-]*", |lex| lex.slice()[1..].to_ascii_lowercase())]
    TagOpen(String),

    #[regex(r"</[a-zA-Z][a-zA-Z0-9_.:\-]*[ \t\r\n]*>", close_tag_name)]
    TagClose(String),

    #[regex(r"[^<]+", |lex| lex.slice().to_string())]
    Text(String),
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Markup {
    #[regex(r#"[^ \t\r\n/>="']+"#, |lex| lex.slice().to_string())]
    Name(String),

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, unquote)]
    #[regex(r"'[^']*'", unquote)]
    Quoted(String),

    #[token(">")]
    End,

    #[token("/>")]
    SelfClose,
}

fn close_tag_name(lex: &mut logos::Lexer<Content>) -> String {
    lex.slice()[2..]
        .trim_end_matches('>')
        .trim()
        .to_ascii_lowercase()
}

fn unquote(lex: &mut logos::Lexer<Markup>) -> String {
    let slice = lex.slice();
    decode_entities(&slice[1..slice.len() - 1])
}

/// Tokenize template source
///
/// Whitespace-only text is dropped; other text is trimmed and has its
/// character references decoded.
pub fn lex(input: &str) -> Vec<(Token, Span)> {
    let mut tokens = Vec::new();
    let mut content = Content::lexer(input);

    while let Some(result) = content.next() {
        match result {
            Ok(Content::TagOpen(name)) => {
                tokens.push((Token::TagOpen(name.clone()), content.span()));
                let mut markup = content.morph::<Markup>();
                lex_start_tag(&name, &mut markup, &mut tokens);
                content = markup.morph();
            }
            Ok(Content::TagClose(name)) => tokens.push((Token::TagClose(name), content.span())),
            Ok(Content::Text(text)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    tokens.push((Token::Text(decode_entities(trimmed)), content.span()));
                }
            }
            Ok(Content::Ignored) => {}
            Err(()) => tokens.push((Token::Invalid(content.slice().to_string()), content.span())),
        }
    }

    tokens
}

/// Lex the attributes of a start tag up to and including its terminator
fn lex_start_tag(tag: &str, markup: &mut logos::Lexer<Markup>, tokens: &mut Vec<(Token, Span)>) {
    let mut after_equals = false;
    while let Some(result) = markup.next() {
        let span = markup.span();
        match result {
            // Unquoted values lex as names
            Ok(Markup::Name(value)) if after_equals => {
                tokens.push((Token::AttrValue(decode_entities(&value)), span));
                after_equals = false;
            }
            Ok(Markup::Name(name)) => {
                tokens.push((Token::AttrName(name.to_ascii_lowercase()), span));
            }
            Ok(Markup::Equals) => {
                tokens.push((Token::Equals, span));
                after_equals = true;
            }
            Ok(Markup::Quoted(value)) => {
                tokens.push((Token::AttrValue(value), span));
                after_equals = false;
            }
            Ok(Markup::End) => {
                let token = if VOID_ELEMENTS.contains(&tag) {
                    Token::SelfClose
                } else {
                    Token::TagEnd
                };
                tokens.push((token, span));
                return;
            }
            Ok(Markup::SelfClose) => {
                tokens.push((Token::SelfClose, span));
                return;
            }
            Err(()) => tokens.push((Token::Invalid(markup.slice().to_string()), span)),
        }
    }
}

/// Decode the basic named character references and numeric references
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
