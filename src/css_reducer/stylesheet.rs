//! Stylesheet parsing into qualified rules
//!
//! Only selector + block rules are retained. At-rules of every kind
//! (`@media`, `@font-face`, `@import`, ...) and comments are dropped, so rules
//! nested inside media queries are lost. Reduction relies on this lossy view.

use cssparser::{
    AtRuleParser, CowRcStr, ParseError, Parser, ParserInput, ParserState, QualifiedRuleParser,
    StyleSheetParser, ToCss, Token,
};
use thiserror::Error;

/// A parsed qualified rule: selector prelude plus declaration block text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    /// Selector text, trimmed
    pub prelude: String,
    /// Everything between the braces, comments removed
    pub block: String,
}

impl CssRule {
    /// Serialize as `selector {declarations}`
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("{} {{{}}}", self.prelude, self.block)
    }
}

/// Stylesheet parse failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StylesheetError {
    /// A rule that could not be parsed
    ///
    /// `line` and `column` are 1-based.
    #[error("Malformed stylesheet at line {line}, column {column}: {reason} (near {snippet:?})")]
    Malformed {
        line: u32,
        column: u32,
        reason: String,
        snippet: String,
    },
}

/// Top-level item produced while walking a stylesheet
enum StylesheetItem {
    Rule(CssRule),
    Discarded,
}

/// Rule parser that keeps qualified rules and swallows at-rules
struct RuleCollector;

impl<'i> AtRuleParser<'i> for RuleCollector {
    type Prelude = ();
    type AtRule = StylesheetItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        log::trace!("Dropping @{name} rule");
        while input.next().is_ok() {}
        Ok(())
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(StylesheetItem::Discarded)
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        while input.next().is_ok() {}
        Ok(StylesheetItem::Discarded)
    }
}

impl<'i> QualifiedRuleParser<'i> for RuleCollector {
    type Prelude = String;
    type QualifiedRule = StylesheetItem;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let mut prelude = String::new();
        serialize_tokens(input, &mut prelude)?;
        Ok(prelude.trim().to_owned())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut block = String::new();
        serialize_tokens(input, &mut block)?;
        Ok(StylesheetItem::Rule(CssRule { prelude, block }))
    }
}

/// Write the remaining tokens of `input` back out as CSS, minus comments
///
/// Nested blocks are entered and closed explicitly so their contents survive.
fn serialize_tokens<'i>(
    input: &mut Parser<'i, '_>,
    out: &mut String,
) -> Result<(), ParseError<'i, ()>> {
    while let Ok(token) = input.next_including_whitespace() {
        let token = token.clone();
        // Writing into a String cannot fail
        let _ = token.to_css(out);

        let closing = match token {
            Token::Function(_) | Token::ParenthesisBlock => Some(')'),
            Token::SquareBracketBlock => Some(']'),
            Token::CurlyBracketBlock => Some('}'),
            _ => None,
        };
        if let Some(closing) = closing {
            input.parse_nested_block(|nested| serialize_tokens(nested, out))?;
            out.push(closing);
        }
    }
    Ok(())
}

/// Parse `css` into its top-level qualified rules, in source order
///
/// # Errors
///
/// Returns `StylesheetError::Malformed` for the first rule that cannot be
/// parsed, e.g. a selector running into end of input without a block.
pub fn parse_stylesheet(css: &str) -> Result<Vec<CssRule>, StylesheetError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut collector = RuleCollector;

    let mut rules = Vec::new();
    for item in StyleSheetParser::new(&mut parser, &mut collector) {
        match item {
            Ok(StylesheetItem::Rule(rule)) => rules.push(rule),
            Ok(StylesheetItem::Discarded) => {}
            Err((error, snippet)) => {
                return Err(StylesheetError::Malformed {
                    line: error.location.line + 1,
                    column: error.location.column,
                    reason: format!("{:?}", error.kind),
                    snippet: snippet.chars().take(80).collect(),
                });
            }
        }
    }
    Ok(rules)
}
