mod errors;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

pub use errors::{DownloaderError, Result};
use tokio::process::Command;
use tracing::{debug, info};

const DEFAULT_PROGRAM: &str = "ffmpeg";

/// one invocation of the external stream-copy tool.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub playlist_url: String,
    pub output: PathBuf,
    pub program: String,
}

impl DownloadRequest {
    pub fn new(playlist_url: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            playlist_url: playlist_url.into(),
            output: output.into(),
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// overrides the stream-copy program looked up on PATH.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

/// copies the remote stream into the requested output file.
///
/// the playlist url is handed to the external tool untouched; the tool owns
/// all transport and remuxing. a non-zero exit is surfaced together with the
/// tail of the tool's stderr.
pub async fn download(request: DownloadRequest) -> Result<()> {
    ensure_parent_dir(&request.output).await?;

    info!(url = %request.playlist_url, "starting stream copy");

    let output = Command::new(&request.program)
        .args(stream_copy_args(&request))
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| DownloaderError::Spawn {
            program: request.program.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(DownloaderError::StreamCopyFailed {
            program: request.program,
            status: output.status,
            stderr: stderr_tail(&output.stderr),
        });
    }

    debug!(output = %request.output.display(), "stream copy finished");
    Ok(())
}

fn stream_copy_args(request: &DownloadRequest) -> [OsString; 5] {
    [
        OsString::from("-i"),
        OsString::from(&request.playlist_url),
        OsString::from("-c"),
        OsString::from("copy"),
        request.output.as_os_str().to_os_string(),
    ]
}

fn stderr_tail(stderr: &[u8]) -> String {
    const MAX_LINES: usize = 8;

    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(MAX_LINES);
    lines[start..].join("\n")
}

async fn ensure_parent_dir(output: &Path) -> Result<()> {
    let Some(parent) = output.parent() else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| DownloaderError::Io {
            context: format!("creating output directory {}", parent.display()),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_copy_args_match_tool_contract() {
        let request = DownloadRequest::new("https://example.test/playlist/xyz.m3u8", "EP 1.mp4");
        let args = stream_copy_args(&request);
        assert_eq!(
            args,
            [
                OsString::from("-i"),
                OsString::from("https://example.test/playlist/xyz.m3u8"),
                OsString::from("-c"),
                OsString::from("copy"),
                OsString::from("EP 1.mp4"),
            ]
        );
    }

    #[test]
    fn stderr_tail_keeps_only_trailing_lines() {
        let noisy: Vec<String> = (0..20).map(|n| format!("line {n}")).collect();
        let tail = stderr_tail(noisy.join("\n").as_bytes());
        assert!(tail.starts_with("line 12"));
        assert!(tail.ends_with("line 19"));
    }

    #[tokio::test]
    async fn download_fails_when_program_is_missing() {
        let request = DownloadRequest::new("https://example.test/playlist/xyz.m3u8", "out.mp4")
            .program("gogo-missing-stream-copier");
        let err = download(request).await.expect_err("missing program should error");
        assert!(matches!(err, DownloaderError::Spawn { .. }));
    }

    #[tokio::test]
    async fn download_surfaces_nonzero_exit_status() {
        let request = DownloadRequest::new("https://example.test/playlist/xyz.m3u8", "out.mp4")
            .program("false");
        let err = download(request).await.expect_err("nonzero exit should error");
        assert!(matches!(err, DownloaderError::StreamCopyFailed { .. }));
    }

    #[tokio::test]
    async fn download_succeeds_on_zero_exit_status() {
        let request = DownloadRequest::new("https://example.test/playlist/xyz.m3u8", "out.mp4")
            .program("true");
        download(request).await.expect("zero exit should succeed");
    }
}
