//! Wrapper around `xcrun xctrace`
//!
//! Recording and exporting traces shells out to Xcode's command line tool.
//! Every invocation runs with piped output and a bounded timeout, polled
//! the same way for all subcommands.

pub mod export;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

pub use export::{
    export_trace, pick_format, ExportBackend, ExportFormat, TraceExporter, XcodeExporter,
};

const RECORD_TIMEOUT: Duration = Duration::from_secs(30 * 60);
const EXPORT_TIMEOUT: Duration = Duration::from_secs(30 * 60);
const EXPORT_HELP_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from running xctrace or exporting a trace
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("swiftuice requires macOS with Xcode command line tools (current platform: {0})")]
    UnsupportedPlatform(&'static str),

    #[error("{0} is required")]
    MissingArgument(&'static str),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} timed out after {}s", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    #[error("{command} failed: {message}")]
    Failed { command: String, message: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Captured output of a finished command
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Options for `xctrace record`
#[derive(Debug, Clone, Default)]
pub struct RecordOptions {
    /// Instruments template name
    pub template: Option<String>,
    /// Device name or UDID
    pub device: Option<String>,
    /// Bundle id or path to the .app
    pub app: String,
    /// Recording length, e.g. `10s` or `1m`
    pub time_limit: Option<String>,
    pub output: Option<PathBuf>,
}

impl RecordOptions {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec!["xctrace".to_string(), "record".to_string()];
        if let Some(template) = self.template.as_deref().filter(|s| !s.is_empty()) {
            args.extend(["--template".to_string(), template.to_string()]);
        }
        if let Some(device) = self.device.as_deref().filter(|s| !s.is_empty()) {
            args.extend(["--device".to_string(), device.to_string()]);
        }
        if let Some(limit) = self.time_limit.as_deref().filter(|s| !s.is_empty()) {
            args.extend(["--time-limit".to_string(), limit.to_string()]);
        }
        if let Some(output) = &self.output {
            args.extend(["--output".to_string(), output.display().to_string()]);
        }
        args.extend(["--launch".to_string(), "--".to_string(), self.app.clone()]);
        args
    }
}

fn export_args(trace: &Path, out_dir: &Path, format: Option<ExportFormat>) -> Vec<String> {
    let mut args = vec![
        "xctrace".to_string(),
        "export".to_string(),
        "--input".to_string(),
        trace.display().to_string(),
        "--output".to_string(),
        out_dir.display().to_string(),
    ];
    if let Some(format) = format {
        args.extend(["--output-format".to_string(), format.to_string()]);
    }
    args
}

/// Handle to the xctrace tool
#[derive(Debug, Clone)]
pub struct XcTrace {
    program: String,
    export_timeout: Duration,
}

impl Default for XcTrace {
    fn default() -> Self {
        Self {
            program: "xcrun".to_string(),
            export_timeout: EXPORT_TIMEOUT,
        }
    }
}

impl XcTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the record/export timeout
    pub fn with_export_timeout(mut self, timeout: Duration) -> Self {
        self.export_timeout = timeout;
        self
    }

    fn ensure_macos() -> Result<(), ExportError> {
        if cfg!(target_os = "macos") {
            Ok(())
        } else {
            Err(ExportError::UnsupportedPlatform(std::env::consts::OS))
        }
    }

    fn run(&self, args: &[String], timeout: Duration) -> Result<ToolOutput, ExportError> {
        Self::ensure_macos()?;
        run_command(&self.program, args, timeout)
    }

    /// Record a trace by launching the app under Instruments
    pub fn record(&self, opts: &RecordOptions) -> Result<(), ExportError> {
        if opts.app.is_empty() {
            return Err(ExportError::MissingArgument("--app"));
        }
        self.run(&opts.to_args(), RECORD_TIMEOUT).map(|_| ())
    }

    /// Export a trace; `None` lets xctrace pick its default format
    pub fn export(
        &self,
        trace: &Path,
        out_dir: &Path,
        format: Option<ExportFormat>,
    ) -> Result<String, ExportError> {
        let output = self.run(&export_args(trace, out_dir, format), self.export_timeout)?;
        Ok(output.stdout)
    }

    pub fn export_help(&self) -> Result<String, ExportError> {
        let args = ["xctrace", "export", "--help"].map(String::from);
        Ok(self.run(&args, EXPORT_HELP_TIMEOUT)?.stdout)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Run `program args...`, killing it if it outlives `timeout`.
///
/// A non-zero exit becomes [`ExportError::Failed`] carrying stderr, else
/// stdout, else the exit status.
pub fn run_command(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<ToolOutput, ExportError> {
    let command_line = format!("{} {}", program, args.join(" "));
    debug!("Running {}", command_line);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExportError::Spawn {
            program: program.to_string(),
            source,
        })?;

    // Pipes are drained on their own threads so a chatty child cannot block
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = wait_with_timeout(&mut child, timeout).map_err(|e| match e {
        WaitError::TimedOut => {
            warn!("{} timed out after {}s", command_line, timeout.as_secs());
            ExportError::Timeout {
                command: command_line.clone(),
                timeout,
            }
        }
        WaitError::Io(source) => ExportError::Io {
            context: format!("failed to wait for {}", program),
            source,
        },
    })?;

    let output = ToolOutput {
        stdout: stdout.join().unwrap_or_default(),
        stderr: stderr.join().unwrap_or_default(),
    };

    if status.success() {
        return Ok(output);
    }

    let message = [output.stderr.trim(), output.stdout.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string());
    Err(ExportError::Failed {
        command: command_line,
        message,
    })
}

enum WaitError {
    TimedOut,
    Io(std::io::Error),
}

fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
) -> Result<std::process::ExitStatus, WaitError> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(WaitError::TimedOut);
                }
                thread::sleep(Duration::from_millis(100));
            }
            Err(e) => return Err(WaitError::Io(e)),
        }
    }
}
