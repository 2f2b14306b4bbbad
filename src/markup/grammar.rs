//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use super::lexer::Token;
use super::node::{Element, Node};

/// Parse template source into its top-level nodes
pub fn parse(input: &str) -> Result<Vec<Node>, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = super::lexer::lex(input)
        .into_iter()
        .map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    nodes_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn nodes_parser<'a, I>() -> impl Parser<'a, I, Vec<Node>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let text = select! {
        Token::Text(t) => Node::Text(t),
    };

    let attribute = select! {
        Token::AttrName(name) => name,
    }
    .then(
        just(Token::Equals)
            .ignore_then(select! { Token::AttrValue(value) => value })
            .or_not(),
    )
    .map(|(name, value)| (name, value.unwrap_or_default()));

    let element = recursive(|element| {
        let start_tag = select! {
            Token::TagOpen(tag) => tag,
        }
        .then(attribute.repeated().collect::<Vec<_>>());

        // <tag ... /> and void elements
        let empty_element = start_tag
            .clone()
            .then_ignore(just(Token::SelfClose))
            .map(|(tag, attributes)| Element::with_attributes(tag, attributes));

        let content = choice((element.map(Node::Element), text.clone()))
            .repeated()
            .collect::<Vec<_>>();

        let full_element = start_tag
            .then_ignore(just(Token::TagEnd))
            .then(content)
            .then(select! { Token::TagClose(tag) => tag })
            .try_map(|(((tag, attributes), children), closing), span: SimpleSpan| {
                if closing != tag {
                    return Err(Rich::custom(
                        span,
                        format!("closing tag </{}> does not match <{}>", closing, tag),
                    ));
                }
                let mut element = Element::with_attributes(tag, attributes);
                element.children = children;
                Ok(element)
            });

        choice((empty_element, full_element))
    });

    choice((element.map(Node::Element), text))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}
