//! Trace export with automatic format selection

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info, warn};

use super::{ExportError, XcTrace};

/// File written next to the exported data naming the format used
pub const FORMAT_MARKER: &str = "EXPORT_FORMAT.txt";

/// Requested export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Probe `xctrace export --help` and pick the best supported format
    #[default]
    Auto,
    Xml,
    Json,
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Auto => write!(f, "auto"),
            ExportFormat::Xml => write!(f, "xml"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "auto" => Ok(ExportFormat::Auto),
            "xml" => Ok(ExportFormat::Xml),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!(
                "Unknown export format: {}. Valid: auto, xml, json, csv",
                other
            )),
        }
    }
}

/// Pick the easiest format to parse that the help text mentions
pub fn pick_format(help: &str) -> ExportFormat {
    let help = help.to_lowercase();
    if help.contains("json") {
        ExportFormat::Json
    } else if help.contains("xml") {
        ExportFormat::Xml
    } else if help.contains("csv") {
        ExportFormat::Csv
    } else {
        ExportFormat::Xml
    }
}

/// The two xctrace calls an export needs
pub trait ExportBackend {
    fn export_help(&self) -> Result<String, ExportError>;
    fn export(
        &self,
        trace: &Path,
        out_dir: &Path,
        format: ExportFormat,
    ) -> Result<String, ExportError>;
}

impl ExportBackend for XcTrace {
    fn export_help(&self) -> Result<String, ExportError> {
        XcTrace::export_help(self)
    }

    fn export(
        &self,
        trace: &Path,
        out_dir: &Path,
        format: ExportFormat,
    ) -> Result<String, ExportError> {
        let format = (format != ExportFormat::Auto).then_some(format);
        XcTrace::export(self, trace, out_dir, format)
    }
}

/// Export `trace` into `out_dir` and return the directory.
///
/// `Auto` is resolved by probing the tool's help (xml if the probe fails).
/// The chosen format is recorded in [`FORMAT_MARKER`] on a best-effort basis.
pub fn export_trace<B: ExportBackend + ?Sized>(
    backend: &B,
    trace: &Path,
    out_dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    if trace.as_os_str().is_empty() {
        return Err(ExportError::MissingArgument("--trace"));
    }
    if out_dir.as_os_str().is_empty() {
        return Err(ExportError::MissingArgument("--out"));
    }
    std::fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        context: format!("create out dir {}", out_dir.display()),
        source,
    })?;

    let format = match format {
        ExportFormat::Auto => match backend.export_help() {
            Ok(help) => pick_format(&help),
            Err(e) => {
                debug!("export --help probe failed ({}), defaulting to xml", e);
                ExportFormat::Xml
            }
        },
        explicit => explicit,
    };

    info!("Exporting {} as {}", trace.display(), format);
    backend.export(trace, out_dir, format)?;

    if let Err(e) = std::fs::write(out_dir.join(FORMAT_MARKER), format!("{}\n", format)) {
        warn!("Could not write {}: {}", FORMAT_MARKER, e);
    }
    Ok(out_dir.to_path_buf())
}

/// Turns a `.trace` bundle into a directory of exported files
pub trait TraceExporter {
    fn export(&self, trace: &Path, out_dir: &Path) -> Result<PathBuf, ExportError>;
}

/// [`TraceExporter`] backed by the real xctrace tool
#[derive(Debug, Clone, Default)]
pub struct XcodeExporter {
    pub xctrace: XcTrace,
    pub format: ExportFormat,
}

impl XcodeExporter {
    pub fn new(xctrace: XcTrace, format: ExportFormat) -> Self {
        Self { xctrace, format }
    }
}

impl TraceExporter for XcodeExporter {
    fn export(&self, trace: &Path, out_dir: &Path) -> Result<PathBuf, ExportError> {
        export_trace(&self.xctrace, trace, out_dir, self.format)
    }
}
