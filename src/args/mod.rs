pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

use clap::Parser;

pub fn args_checks() -> CleanArgs {
    let args = Args::parse();
    match validation::validate_and_clean(args) {
        Ok(clean) => clean,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Managed-cloud Postgres hosts terminate TLS themselves and refuse plain
/// connections, so SSL is required whenever the host looks like one.
pub fn ssl_required(host: &str) -> bool {
    host.contains("rds.amazonaws.com")
}
