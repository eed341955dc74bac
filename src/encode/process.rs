use std::{
    ffi::{OsStr, OsString},
    process::{Command, Stdio},
};

/// Outcome of one blocking child-process run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
    /// Captured stderr (lossy UTF-8).
    pub stderr: String,
}

impl ProcessOutput {
    pub fn succeeded() -> Self {
        Self {
            code: Some(0),
            success: true,
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stderr: stderr.into(),
        }
    }
}

/// Seam over process spawning so argument construction can be exercised without ffmpeg.
pub trait ProcessRunner {
    /// Spawn `program` with `args`, block until it exits, and report the outcome.
    ///
    /// An `Err` means the process could not be launched at all.
    fn run(&self, program: &OsStr, args: &[OsString]) -> std::io::Result<ProcessOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, program: &OsStr, args: &[OsString]) -> std::io::Result<ProcessOutput> {
        (**self).run(program, args)
    }
}

/// Runs programs through `std::process` with stdin closed, stdout discarded and stderr captured.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &OsStr, args: &[OsString]) -> std::io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ProcessOutput {
            code: output.status.code(),
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
