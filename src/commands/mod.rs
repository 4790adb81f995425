//! Command implementations behind the CLI

pub mod compare;
pub mod diff;
pub mod put;

use crate::config::Command;
use crate::store::FsStore;
use crate::types::BinDiffError;
use crate::Config;
use serde::Serialize;
use std::sync::Arc;

/// Run one CLI command against the store configured in `config`
pub fn run(command: Command, config: &Config) -> Result<(), BinDiffError> {
    let store = Arc::new(FsStore::open(&config.store_dir));

    match command {
        Command::Put {
            id,
            side,
            file,
            base64,
        } => put::run(store, id, side, file.as_deref(), base64.as_deref()),
        Command::Show { id, content } => put::show(store, id, content),
        Command::Diff { id } => diff::run(store, id),
        Command::DiffAll => diff::run_all(store, config),
        Command::Compare { left, right } => compare::run(&left, &right),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), BinDiffError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
