use core::fmt;
use core::panic::Location;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::string::{String, ToString};

use log::{debug, info, warn};
use thiserror::Error;

use super::{BACKGROUND, FRAME, write_dot};
use crate::RBTree;

/// Errors raised while producing an HTML report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The Graphviz executable was not found.
    #[error("graphviz executable not found: {0}")]
    ToolNotFound(String),

    /// Graphviz ran but did not succeed.
    #[error("graphviz failed: {message}")]
    ToolFailed {
        /// Error output from Graphviz.
        message: String,
        /// Exit code if available.
        exit_code: Option<i32>,
    },

    /// Reading or writing report files failed, or Graphviz could not be started.
    #[error("report i/o failed: {0}")]
    Io(#[from] io::Error),

    /// Rendering the DOT text failed.
    #[error("failed to render graph: {0}")]
    Format(#[from] fmt::Error),
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Where a report is written and which Graphviz executable draws it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// Directory receiving `log.html` and `graph.dot`.
    pub output_dir: PathBuf,
    /// The `dot` executable, looked up on `PATH` unless it is a path.
    pub dot_program: OsString,
}

impl ReportConfig {
    /// Writes into `output_dir` using `dot` from `PATH`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dot_program: OsString::from("dot"),
        }
    }

    /// Uses another Graphviz executable.
    #[must_use]
    pub fn with_dot_program(mut self, dot_program: impl Into<OsString>) -> Self {
        self.dot_program = dot_program.into();
        self
    }

    /// Path of the HTML page.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join("log.html")
    }

    /// Path of the DOT file rewritten for every drawing.
    #[must_use]
    pub fn graph_path(&self) -> PathBuf {
        self.output_dir.join("graph.dot")
    }
}

/// An HTML page collecting one SVG drawing of a tree per [`log_tree`] call.
///
/// The page is closed by [`finish`]; dropping an unfinished report closes it on a
/// best-effort basis.
///
/// [`log_tree`]: HtmlReport::log_tree
/// [`finish`]: HtmlReport::finish
///
/// # Examples
///
/// ```no_run
/// use redblack_tree::RBTree;
/// use redblack_tree::graphviz::{HtmlReport, ReportConfig};
///
/// # fn main() -> Result<(), redblack_tree::graphviz::ReportError> {
/// let mut report = HtmlReport::create(ReportConfig::new("/tmp/rbtree_log"))?;
/// let mut tree = RBTree::new();
/// report.log_tree(&tree)?;
/// for key in [1, 4, 5, 0, 2, 10, 3] {
///     tree.insert(key);
/// }
/// report.log_tree(&tree)?;
/// report.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct HtmlReport {
    config: ReportConfig,
    log: BufWriter<File>,
    finished: bool,
}

impl HtmlReport {
    /// Creates the output directory if needed and starts a fresh page.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the directory or the page cannot be created.
    pub fn create(config: ReportConfig) -> ReportResult<Self> {
        fs::create_dir_all(&config.output_dir)?;
        let mut log = BufWriter::new(File::create(config.log_path())?);
        write!(
            log,
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"utf-8\"/>\n\
             <title>LOGS</title>\n\
             <style>\n\
             body {{\n\
             \tbackground-color: {BACKGROUND};\n\
             \tcolor: {FRAME};\n\
             }}\n\
             </style>\n\
             </head>\n\
             <body>\n\
             <header>\n\
             <h1> Logs for Red-Black Tree </h1>\n\
             </header>\n\
             <main>\n"
        )?;

        info!("started tree report at {}", config.log_path().display());
        Ok(Self {
            config,
            log,
            finished: false,
        })
    }

    /// The report's configuration.
    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Draws `tree` with Graphviz and appends the SVG to the page, headed by the
    /// caller's source location.
    ///
    /// # Errors
    ///
    /// - [`ReportError::ToolNotFound`] if the Graphviz executable does not exist
    /// - [`ReportError::ToolFailed`] if it exits unsuccessfully
    /// - [`ReportError::Io`] if a report file cannot be written
    #[track_caller]
    pub fn log_tree<K: fmt::Display, C>(&mut self, tree: &RBTree<K, C>) -> ReportResult<()> {
        let location = Location::caller();

        let mut dot = String::new();
        write_dot(&tree.snapshot(), &mut dot)?;
        let graph_path = self.config.graph_path();
        fs::write(&graph_path, dot)?;

        let svg = self.run_dot(&graph_path)?;
        writeln!(self.log, "<p>\n<b><big> ### In file: {}, in line: {} ### </big></b>", location.file(), location.line())?;
        for line in svg.lines().skip_while(|line| !line.trim_start().starts_with("<svg")) {
            writeln!(self.log, "{line}")?;
        }
        writeln!(self.log, "</p>\n<hr size=\"4\" color=\"{FRAME}\">\n")?;

        debug!("logged tree of {} keys from {}:{}", tree.len(), location.file(), location.line());
        Ok(())
    }

    /// Closes the page and flushes it to disk.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the page cannot be written.
    pub fn finish(mut self) -> ReportResult<()> {
        self.write_footer()
    }

    fn run_dot(&self, graph_path: &Path) -> ReportResult<String> {
        let program = &self.config.dot_program;
        debug!("invoking {} on {}", program.to_string_lossy(), graph_path.display());

        let output = Command::new(program).arg(graph_path).arg("-Tsvg").output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ReportError::ToolNotFound(program.to_string_lossy().into_owned())
            } else {
                ReportError::Io(e)
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(ReportError::ToolFailed {
                message: String::from_utf8_lossy(&output.stderr).to_string(),
                exit_code: output.status.code(),
            })
        }
    }

    fn write_footer(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        write!(self.log, "</main>\n</body>\n</html>\n")?;
        self.log.flush()?;
        Ok(())
    }
}

impl Drop for HtmlReport {
    fn drop(&mut self) {
        if let Err(error) = self.write_footer() {
            warn!("could not close tree report: {error}");
        }
    }
}

impl fmt::Debug for HtmlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlReport").field("config", &self.config).field("finished", &self.finished).finish()
    }
}
