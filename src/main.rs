//! main.rs
//! Entry point for runls

use runls::config::Config;
use runls::core::{Lister, SystemNames};
use runls::utils::cli::{CliAction, handle_args};
use runls::utils::init_logging;

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();

    let invocation = match handle_args() {
        CliAction::List(invocation) => invocation,
        CliAction::Exit => return ExitCode::SUCCESS,
        CliAction::Usage => return ExitCode::FAILURE,
    };

    let config = Config::load();
    let lister = Lister::new(
        config.list_options(&invocation),
        config.formatter(),
        SystemNames::new(),
    );

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    match lister.run(invocation.paths(), &mut out, &mut err) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("rls: {}", e);
            ExitCode::FAILURE
        }
    }
}
