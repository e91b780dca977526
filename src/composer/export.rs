//! Clipboard and file export of the composed Markdown.

use std::io::{Stdout, Write, stdout};
use std::path::{Path, PathBuf};

use base64::Engine;

use super::DocumentState;

/// File name every export is saved under.
pub const README_FILE_NAME: &str = "README.md";
/// Media type attached to exported artifacts.
pub const MARKDOWN_MEDIA_TYPE: &str = "text/markdown";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("clipboard write failed: {0}")]
    Clipboard(#[source] std::io::Error),
    #[error("failed to write {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The composed README, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownArtifact {
    pub file_name: &'static str,
    pub media_type: &'static str,
    content: String,
}

impl MarkdownArtifact {
    pub fn from_state(state: &DocumentState) -> Self {
        Self {
            file_name: README_FILE_NAME,
            media_type: MARKDOWN_MEDIA_TYPE,
            content: state.compose_markdown(),
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    /// UTF-8 encoded content.
    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

/// Destination for clipboard copies.
pub trait ClipboardWriter {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Clipboard`] when the platform rejects the write.
    fn write_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Destination for saved artifacts.
pub trait FileExporter {
    /// Persist the artifact and return where it ended up.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::File`] when the artifact cannot be written.
    fn export(&mut self, artifact: &MarkdownArtifact) -> Result<PathBuf, ExportError>;
}

/// Copy the composed Markdown to the clipboard, returning the byte count.
///
/// # Errors
///
/// Propagates the clipboard writer's failure.
pub fn export_to_clipboard(
    state: &DocumentState,
    clipboard: &mut dyn ClipboardWriter,
) -> Result<usize, ExportError> {
    let markdown = state.compose_markdown();
    clipboard.write_text(&markdown)?;
    tracing::debug!(bytes = markdown.len(), "copied markdown to clipboard");
    Ok(markdown.len())
}

/// Save the composed Markdown as `README.md` through the exporter.
///
/// # Errors
///
/// Propagates the exporter's failure.
pub fn export_to_file(
    state: &DocumentState,
    exporter: &mut dyn FileExporter,
) -> Result<PathBuf, ExportError> {
    let artifact = MarkdownArtifact::from_state(state);
    let path = exporter.export(&artifact)?;
    tracing::debug!(path = %path.display(), bytes = artifact.bytes().len(), "saved markdown");
    Ok(path)
}

/// Clipboard backed by the terminal's OSC 52 escape sequence.
///
/// On macOS `pbcopy` is tried first when constructed with [`Self::stdout`].
pub struct TerminalClipboard<W: Write> {
    out: W,
    try_native: bool,
}

impl TerminalClipboard<Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: stdout(),
            try_native: cfg!(target_os = "macos"),
        }
    }
}

impl<W: Write> TerminalClipboard<W> {
    /// OSC 52 only, written to `out`.
    pub const fn with_writer(out: W) -> Self {
        Self {
            out,
            try_native: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> std::fmt::Debug for TerminalClipboard<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalClipboard")
            .field("try_native", &self.try_native)
            .finish_non_exhaustive()
    }
}

impl<W: Write> ClipboardWriter for TerminalClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        if self.try_native {
            match copy_to_pbcopy(text) {
                Ok(()) => return Ok(()),
                Err(err) => tracing::debug!("pbcopy unavailable, falling back to OSC 52: {err}"),
            }
        }
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(ExportError::Clipboard)
    }
}

fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

/// OSC 52 "set clipboard" sequence carrying `text`.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

/// Saves artifacts into a directory, overwriting any existing file.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileExporter for DirectoryExporter {
    fn export(&mut self, artifact: &MarkdownArtifact) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(artifact.file_name);
        std::fs::write(&path, artifact.bytes()).map_err(|source| ExportError::File {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
