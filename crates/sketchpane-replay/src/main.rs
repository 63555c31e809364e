//! Replay a pointer-event script and print the resulting scene as JSON.

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: sketchpane-replay <script.json>");
        return ExitCode::from(2);
    };

    let result = sketchpane_replay::Script::load(&path)
        .and_then(sketchpane_replay::replay)
        .and_then(|outcome| Ok(serde_json::to_string_pretty(&outcome)?));

    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay of {path} failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
