use strata_derive::strata_error;

#[strata_error]
pub enum DemoError {
    #[error("IO error: {source}")]
    Io { source: std::io::Error },
}

fn main() {}
