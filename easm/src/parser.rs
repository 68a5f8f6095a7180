use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "asm.pest"]
pub struct AsmParser;

pub type ParseError = pest::error::Error<Rule>;

/// Parses one source line (without its newline).
pub fn parse_line(text: &str) -> Result<Pair<Rule>, ParseError> {
    Ok(AsmParser::parse(Rule::line, text)?.next().unwrap())
}

/// Short single-line message for a failed line parse; the line number is
/// attached by the caller.
pub fn syntax_message(err: &ParseError) -> String {
    match &err.variant {
        pest::error::ErrorVariant::ParsingError { positives, .. } => {
            if positives.is_empty() {
                "unexpected input".to_owned()
            } else {
                let expected: Vec<String> =
                    positives.iter().map(|rule| format!("{:?}", rule)).collect();
                format!("expected {}", expected.join(" or "))
            }
        }
        pest::error::ErrorVariant::CustomError { message } => message.clone(),
    }
}
