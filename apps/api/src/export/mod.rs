//! PDF export: hands rendered HTML to a headless Chromium and returns the PDF bytes.
//!
//! Every export launches a fresh browser in its own temporary directory. The child is
//! spawned with `kill_on_drop`, so it is torn down on every exit path: success, a failed
//! launch, a non-zero exit, or the timeout dropping the wait future. Failures are fatal
//! for the request and never retried.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to launch browser: {0}")]
    Launch(#[source] std::io::Error),

    #[error("browser did not finish within {0:?}")]
    Timeout(Duration),

    #[error("browser exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },

    #[error("browser produced no PDF output")]
    EmptyOutput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a self-contained HTML document into PDF bytes.
#[async_trait]
pub trait PdfRasterizer: Send + Sync {
    async fn rasterize(&self, html: &str) -> Result<Vec<u8>, ExportError>;
}

/// Rasterizes via `chromium --headless --print-to-pdf`.
///
/// Paper size and margins (A4, 0.5in) come from the document's `@page` rule and
/// backgrounds are kept via `print-color-adjust`, both emitted by the renderer.
#[derive(Debug, Clone)]
pub struct ChromeRasterizer {
    binary: PathBuf,
    timeout: Duration,
}

impl ChromeRasterizer {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    fn command(&self, input: &std::path::Path, output: &std::path::Path, profile: &std::path::Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--no-first-run")
            .arg("--no-pdf-header-footer")
            .arg("--run-all-compositor-stages-before-draw")
            .arg(format!("--user-data-dir={}", profile.display()))
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(format!("file://{}", input.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl PdfRasterizer for ChromeRasterizer {
    async fn rasterize(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        // Removed (with everything Chromium wrote into it) when dropped.
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("resume.html");
        let output = workdir.path().join("resume.pdf");
        let profile = workdir.path().join("profile");
        tokio::fs::write(&input, html).await?;

        let child = self
            .command(&input, &output, &profile)
            .spawn()
            .map_err(ExportError::Launch)?;
        debug!("Launched {} (pid {:?})", self.binary.display(), child.id());

        let result = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("PDF rasterization timed out after {:?}", self.timeout);
                return Err(ExportError::Timeout(self.timeout));
            }
        };

        if !result.status.success() {
            return Err(ExportError::Failed {
                status: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let pdf = match tokio::fs::read(&output).await {
            Ok(bytes) if !bytes.is_empty() => bytes,
            Ok(_) => return Err(ExportError::EmptyOutput),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExportError::EmptyOutput)
            }
            Err(e) => return Err(ExportError::Io(e)),
        };

        info!("Rasterized {} bytes of HTML into {} bytes of PDF", html.len(), pdf.len());
        Ok(pdf)
    }
}

/// `Content-Disposition` filename for an exported resume.
pub fn export_filename(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if stem.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename_plain_title() {
        assert_eq!(export_filename("Jane Doe CV"), "Jane Doe CV.pdf");
    }

    #[test]
    fn test_export_filename_strips_header_breaking_chars() {
        assert_eq!(export_filename("a\"b/c\r\n"), "a_b_c.pdf");
    }

    #[test]
    fn test_export_filename_defaults_when_empty() {
        assert_eq!(export_filename("   "), "resume.pdf");
        assert_eq!(export_filename(".."), "resume.pdf");
    }

    #[tokio::test]
    async fn test_missing_binary_is_launch_error() {
        let rasterizer = ChromeRasterizer::new(
            "/nonexistent/chromium-binary-for-tests",
            Duration::from_secs(5),
        );
        let err = rasterizer.rasterize("<html></html>").await.unwrap_err();
        assert!(matches!(err, ExportError::Launch(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        // `false` ignores its arguments and exits 1.
        let rasterizer = ChromeRasterizer::new("false", Duration::from_secs(5));
        let err = rasterizer.rasterize("<html></html>").await.unwrap_err();
        assert!(matches!(err, ExportError::Failed { status: Some(1), .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hung_browser_times_out() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("hung-browser.sh");
        std::fs::write(&script, "#!/bin/sh\nexec sleep 30\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let rasterizer = ChromeRasterizer::new(&script, Duration::from_secs(1));
        let started = std::time::Instant::now();
        let err = rasterizer.rasterize("<html></html>").await.unwrap_err();

        assert!(matches!(err, ExportError::Timeout(d) if d == Duration::from_secs(1)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_exit_without_output_is_empty() {
        let rasterizer = ChromeRasterizer::new("true", Duration::from_secs(5));
        let err = rasterizer.rasterize("<html></html>").await.unwrap_err();
        assert!(matches!(err, ExportError::EmptyOutput));
    }
}
