use std::borrow::Cow;
use vanity_derive::vanity_error;

#[vanity_error]
pub enum LookupError {
    #[error("Missing entry{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Parse failure{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, LookupError> {
    raw.parse::<u32>().context("Parsing breadth")
}

fn missing() -> Result<(), LookupError> {
    Err(LookupError::Missing { message: "width".into(), context: None })
}

fn main() {
    let err = parse("forty").unwrap_err();
    assert!(err.to_string().starts_with("Parse failure (Parsing breadth)"));

    let err = missing().context("Resolving slot").unwrap_err();
    assert_eq!(err.to_string(), "Missing entry (Resolving slot): width");
}
