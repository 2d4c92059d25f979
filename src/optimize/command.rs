//! Optimization through an external program
//!
//! The document is written to the program's stdin; stdout is the result.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use super::{OptimizeError, Optimizer};

#[derive(Debug, Clone)]
pub struct CommandOptimizer {
    program: String,
    args: Vec<String>,
}

impl CommandOptimizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Create from a command array such as `["svgo", "-i", "-", "-o", "-"]`
    pub fn from_slice(command: &[String]) -> Result<Self, OptimizeError> {
        let (program, args) = command.split_first().ok_or(OptimizeError::EmptyCommand)?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }

    fn spawn_error(&self, source: std::io::Error) -> OptimizeError {
        OptimizeError::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    /// Wait for the stdin writer; a panic there counts as a failed write
    fn join_feeder(&self, feeder: thread::JoinHandle<std::io::Result<()>>) -> std::io::Result<()> {
        feeder
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")))
    }
}

impl Optimizer for CommandOptimizer {
    fn optimize(&self, svg: &str) -> Result<String, OptimizeError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            self.spawn_error(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stdin unavailable",
            ))
        })?;

        // Feed stdin from another thread so a full stdout pipe cannot deadlock us.
        let input = svg.as_bytes().to_vec();
        let feeder = thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
        let fed = self.join_feeder(feeder);

        if !output.status.success() {
            return Err(OptimizeError::Exit {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        fed.map_err(|e| self.spawn_error(e))?;

        String::from_utf8(output.stdout).map_err(|_| OptimizeError::Encoding {
            program: self.program.clone(),
        })
    }
}
