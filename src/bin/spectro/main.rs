use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod logging;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    logging::init(cli.global.verbose);

    let ctx = display::Context::detect().with_quiet(cli.global.quiet);

    if ctx.interactive {
        display::print_banner();
    }

    match commands::dispatch(cli.command, &cli.global, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
