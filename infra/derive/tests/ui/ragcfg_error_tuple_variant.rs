use ragcfg_derive::ragcfg_error;

#[ragcfg_error]
pub enum DemoError {
    Io(std::io::Error),
}

fn main() {}
