use ragcfg_derive::ragcfg_error;

#[ragcfg_error]
pub enum DemoError {
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
