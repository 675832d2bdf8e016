mod bragg;
mod filter;
mod ionization;
mod level;
mod materials;
mod transition;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use crate::cli::{Command, GlobalOptions};
use crate::display::Context as DisplayContext;

pub fn dispatch(command: Command, global: &GlobalOptions, ctx: DisplayContext) -> Result<()> {
    match command {
        Command::Ionization(args) => ionization::run(args, global, ctx),
        Command::Filter(args) => filter::run(args, global, ctx),
        Command::Materials => materials::run(global),
        Command::Bragg(args) => bragg::run(args, global),
        Command::Level(args) => level::run(args, global),
        Command::Transition(args) => transition::run(args, global),
    }
}

/// Runtime for the database commands; local calculations never start one.
fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")
}
