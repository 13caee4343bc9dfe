//! Pre/post-partition hook execution for live mode.
//!
//! Hooks are plain shell commands run via [`std::process::Command`],
//! inheriting stdin/stdout/stderr, with an `FPART_*` environment
//! exposing partition metadata. A nonzero exit status is fatal and
//! aborts the run mid-partition.

use std::process::Command;

use crate::error::PartError;

/// The `FPART_*` environment passed to a pre- or post-partition hook.
#[derive(Debug, Clone)]
pub struct HookEnv {
    pub part_number: u32,
    pub part_filename: String,
    pub part_size: u64,
    /// Only meaningful for the post-partition hook.
    pub part_num_files: Option<u32>,
    /// Only meaningful for the post-partition hook; 0 unless a prior
    /// step in this partition's lifecycle failed non-fatally.
    pub part_errno: i32,
}

impl HookEnv {
    fn apply(&self, cmd: &mut Command) {
        cmd.env("FPART_PARTNUMBER", self.part_number.to_string());
        cmd.env("FPART_PARTFILENAME", &self.part_filename);
        cmd.env("FPART_PARTSIZE", self.part_size.to_string());
        if let Some(n) = self.part_num_files {
            cmd.env("FPART_PARTNUMFILES", n.to_string());
        }
        cmd.env("FPART_PARTERRNO", self.part_errno.to_string());
    }
}

/// Runs `command` (via the platform shell) with the given hook
/// environment, returning an error if it exits nonzero or fails to
/// spawn.
pub fn run_hook(command: &str, env: &HookEnv) -> Result<(), PartError> {
    log::debug!("running hook `{command}` for partition {}", env.part_number);

    let mut cmd = shell_command(command);
    env.apply(&mut cmd);

    let status = cmd.status()?;
    if !status.success() {
        return Err(PartError::HookFailure {
            command: command.to_string(),
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("/bin/sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(not(unix))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
