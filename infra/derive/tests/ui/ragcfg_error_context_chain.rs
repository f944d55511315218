use ragcfg_derive::ragcfg_error;
use std::borrow::Cow;

#[ragcfg_error]
pub enum ParseError {
    #[error("Malformed document{}: {source}", format_context(.context))]
    Malformed { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, ParseError> {
    raw.parse::<u32>().context("Parsing chunk size")
}

fn main() {
    let err = parse("five hundred").unwrap_err();
    assert!(err.to_string().contains("(Parsing chunk size)"));

    let err = Err::<(), ParseError>(ParseError::Malformed {
        source: "x".parse::<u32>().unwrap_err(),
        context: None,
    })
    .context("Rewrapped")
    .unwrap_err();
    assert!(err.to_string().starts_with("Malformed document (Rewrapped)"));
}
