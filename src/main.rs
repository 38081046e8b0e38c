use std::borrow::Cow;
use std::env;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use cc_promptline::StatuslineError;
use cc_promptline::git;
use cc_promptline::input::SessionInput;
use cc_promptline::platform::Platform;
use cc_promptline::render;

fn main() -> ExitCode {
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--version" => {
                println!("cc-promptline {}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            _ => {}
        }
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cc-promptline: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StatuslineError> {
    let mut raw = String::with_capacity(4096);
    io::stdin().read_to_string(&mut raw)?;
    let input = SessionInput::parse(&raw)?;

    // Resolved once; immutable for the run.
    let icons = Platform::detect().icons();

    let current_dir: Cow<str> = match input.current_dir() {
        Some(dir) => Cow::Borrowed(dir),
        None => Cow::Owned(
            env::current_dir()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
    };

    let git_state = git::inspect(&current_dir);
    let line = render::status_line(icons, &input, &current_dir, &git_state);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "{line}").unwrap_or_default();
    out.flush().unwrap_or_default();
    Ok(())
}

fn print_help() {
    eprintln!(
        "Usage: cc-promptline\n\
         Reads a JSON session snapshot from stdin, prints one status line.\n\
         \n\
         Options:\n\
         \x20 --version   Show version\n\
         \x20 --help      Show this help\n\
         \n\
         Environment:\n\
         \x20 CC_PROMPTLINE_PLATFORM   Override platform detection\n\
         \x20                          (macos|linux|wsl|mingw|unknown)"
    );
}
