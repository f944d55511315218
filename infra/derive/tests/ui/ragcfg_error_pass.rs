use ragcfg_derive::ragcfg_error;
use std::borrow::Cow;

#[ragcfg_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Blob not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<Vec<u8>, DemoError> {
    let bytes = std::fs::read("/definitely/missing/active.json")?;
    Ok(bytes)
}

fn main() {
    let _ = read();
    let _: DemoError = "static message".into();
    let _: DemoError = String::from("owned message").into();
}
