use ragcfg_derive::ragcfg_error;

#[ragcfg_error]
pub enum DemoError {
    #[error("Blob not found: {message}")]
    NotFound { message: String, context: Option<String> },
}

fn main() {}
