#![forbid(unsafe_code)]

//! Runs a scripted session against the settings screen and prints what the
//! screen shows after each step.
//!
//! Usage: `tether-demo [ACTION...]`, e.g. `tether-demo slide=0.3 toggle`.
//! Logging is controlled by `RUST_LOG` (default `info`).

use std::process::ExitCode;

use tether_demo::{Controller, UserAction};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let actions = match std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<UserAction>())
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(actions) if actions.is_empty() => UserAction::default_script(),
        Ok(actions) => actions,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let controller = Controller::new();
    println!("{:<14} {}", "initial", controller.snapshot());
    for action in &actions {
        action.apply(&controller);
        println!("{:<14} {}", action.to_string(), controller.snapshot());
    }
    tracing::info!(steps = actions.len(), "session finished");
    ExitCode::SUCCESS
}
