//! Shell command gateway.
//!
//! Implements [`CommandGateway`] by handing each configured command line to
//! `sh -c`, the same way the node's own scripts call `asterisk -rx`.  Output
//! is discarded and nothing is retried; a failure is returned so the
//! scheduler can log it.

use std::process::{Command, Stdio};

use log::debug;

use crate::app::ports::{CommandError, CommandGateway};
use crate::config::CommandSet;

pub struct ShellGateway {
    commands: CommandSet,
}

impl ShellGateway {
    pub fn new(commands: CommandSet) -> Self {
        Self { commands }
    }

    /// Run `line` through the shell and wait for it to exit.
    fn run(line: &str) -> Result<(), CommandError> {
        debug!("Shell: {}", line);
        let status = Command::new("sh")
            .arg("-c")
            .arg(line)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| CommandError::Spawn {
                command: line.to_owned(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                command: line.to_owned(),
                code: status.code(),
            })
        }
    }
}

impl CommandGateway for ShellGateway {
    fn key(&mut self) -> Result<(), CommandError> {
        Self::run(&self.commands.key)
    }

    fn unkey(&mut self) -> Result<(), CommandError> {
        Self::run(&self.commands.unkey)
    }

    fn shutdown(&mut self) -> Result<(), CommandError> {
        Self::run(&self.commands.shutdown_script)
    }

    fn power_off(&mut self) -> Result<(), CommandError> {
        Self::run(&self.commands.poweroff)
    }
}
