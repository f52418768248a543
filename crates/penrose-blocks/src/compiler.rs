//! Diagram compiler boundary.
//!
//! Compilation, layout optimization and SVG rendering happen outside this
//! workspace. [`DiagramCompiler`] is the single call a trio goes through;
//! [`CommandCompiler`] runs an external executable for it.

use std::future::Future;
use std::process::Stdio;

use penrose_trio::Trio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Step of the compile pipeline that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompileStage {
    /// The trio could not be encoded for the compiler.
    Encode,
    /// The compiler could not be started or talked to.
    Launch,
    /// The compiler rejected the trio (syntax, type or optimization errors).
    Compile,
    /// The compiler finished but its output is unusable.
    Output,
}

impl std::fmt::Display for CompileStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Encode => "Encode",
            Self::Launch => "Launch",
            Self::Compile => "Compile",
            Self::Output => "Output",
        })
    }
}

/// Error reported by a [`DiagramCompiler`].
///
/// The `Display` output is what gets shown in place of the diagram.
#[derive(Debug, thiserror::Error)]
#[error("{stage} error: {message}")]
pub struct CompileError {
    /// Failed stage.
    pub stage: CompileStage,
    /// Diagnostic text.
    pub message: String,
}

impl CompileError {
    /// Create a new compile error.
    #[must_use]
    pub fn new(stage: CompileStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Turns a [`Trio`] into an SVG document.
pub trait DiagramCompiler: Send + Sync {
    /// Compile, optimize and render `trio`.
    fn render(&self, trio: &Trio) -> impl Future<Output = Result<String, CompileError>> + Send;
}

impl<T: DiagramCompiler> DiagramCompiler for &T {
    fn render(&self, trio: &Trio) -> impl Future<Output = Result<String, CompileError>> + Send {
        (**self).render(trio)
    }
}

/// Compiler backed by an external executable.
///
/// The trio is written to the command's stdin as a JSON object
/// (`{"substance", "style", "domain", "variation"}`). A zero exit status
/// with SVG on stdout is success; otherwise stderr becomes the error text.
#[derive(Clone, Debug)]
pub struct CommandCompiler {
    command: String,
    args: Vec<String>,
}

impl CommandCompiler {
    /// Create a compiler that runs `command`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Set extra arguments for the command.
    #[must_use]
    pub fn args(mut self, args: &[String]) -> Self {
        self.args = args.to_vec();
        self
    }

    /// Command being run.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl DiagramCompiler for CommandCompiler {
    async fn render(&self, trio: &Trio) -> Result<String, CompileError> {
        let payload = serde_json::to_vec(trio)
            .map_err(|e| CompileError::new(CompileStage::Encode, e.to_string()))?;

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                CompileError::new(
                    CompileStage::Launch,
                    format!("failed to start '{}': {e}", self.command),
                )
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            CompileError::new(CompileStage::Launch, "compiler stdin unavailable")
        })?;

        // Feed stdin while collecting output so neither side blocks on a full pipe
        let write = async move {
            let result = stdin.write_all(&payload).await;
            drop(stdin);
            result
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());

        let output = output.map_err(|e| {
            CompileError::new(
                CompileStage::Launch,
                format!("failed to run '{}': {e}", self.command),
            )
        })?;
        if let Err(e) = written {
            tracing::debug!(command = %self.command, error = %e, "Compiler closed stdin early");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("'{}' exited with {}", self.command, output.status),
                text => text.to_owned(),
            };
            return Err(CompileError::new(CompileStage::Compile, message));
        }

        let svg = String::from_utf8(output.stdout).map_err(|_| {
            CompileError::new(CompileStage::Output, "compiler output is not valid UTF-8")
        })?;
        let svg = svg.trim();
        if svg.is_empty() {
            return Err(CompileError::new(
                CompileStage::Output,
                "compiler produced no output",
            ));
        }

        Ok(svg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trio() -> Trio {
        Trio {
            substance: "Set A".to_owned(),
            style: "Set a { }".to_owned(),
            domain: "type Set".to_owned(),
            variation: "abc123".to_owned(),
        }
    }

    fn sh(script: &str) -> CommandCompiler {
        CommandCompiler::new("sh").args(&["-c".to_owned(), script.to_owned()])
    }

    #[test]
    fn test_compile_error_display() {
        let err = CompileError::new(CompileStage::Compile, "unknown type `Sett`");
        assert_eq!(err.to_string(), "Compile error: unknown type `Sett`");
    }

    #[test]
    fn test_stage_display() {
        let err = CompileError::new(CompileStage::Encode, "key must be a string");
        assert_eq!(err.to_string(), "Encode error: key must be a string");
        assert_eq!(CompileStage::Launch.to_string(), "Launch");
        assert_eq!(CompileStage::Output.to_string(), "Output");
    }

    #[test]
    fn test_command_compiler_command() {
        let compiler = CommandCompiler::new("roger").args(&["trio".to_owned()]);
        assert_eq!(compiler.command(), "roger");
    }

    #[tokio::test]
    async fn test_missing_command_is_launch_error() {
        let compiler = CommandCompiler::new("penrose-compiler-that-does-not-exist");

        let err = compiler.render(&sample_trio()).await.unwrap_err();

        assert_eq!(err.stage, CompileStage::Launch);
        assert!(err.message.contains("penrose-compiler-that-does-not-exist"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_returns_stdout() {
        let compiler = sh("cat > /dev/null; printf '<svg></svg>\\n'");

        let svg = compiler.render(&sample_trio()).await.unwrap();

        assert_eq!(svg, "<svg></svg>");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_trio_is_sent_as_json() {
        // Echo stdin back wrapped in an svg element
        let compiler = sh("printf '<svg>'; cat; printf '</svg>'");

        let svg = compiler.render(&sample_trio()).await.unwrap();

        let json = svg
            .strip_prefix("<svg>")
            .and_then(|s| s.strip_suffix("</svg>"))
            .unwrap();
        let trio: Trio = serde_json::from_str(json).unwrap();
        assert_eq!(trio, sample_trio());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_uses_stderr() {
        let compiler = sh("cat > /dev/null; echo 'unknown type Sett' >&2; exit 1");

        let err = compiler.render(&sample_trio()).await.unwrap_err();

        assert_eq!(err.stage, CompileStage::Compile);
        assert_eq!(err.message, "unknown type Sett");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_without_stderr_reports_status() {
        let compiler = sh("cat > /dev/null; exit 3");

        let err = compiler.render(&sample_trio()).await.unwrap_err();

        assert_eq!(err.stage, CompileStage::Compile);
        assert!(err.message.contains("exited with"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_output_is_error() {
        let compiler = sh("cat > /dev/null");

        let err = compiler.render(&sample_trio()).await.unwrap_err();

        assert_eq!(err.stage, CompileStage::Output);
    }
}
