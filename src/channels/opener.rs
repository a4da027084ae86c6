use crate::channels::traits::UriOpener;
use crate::error::{ChannelError, ChannelResult};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Opens URIs with the host's desktop opener (`xdg-open`, `open`, `start`).
#[derive(Debug, Clone)]
pub struct SystemUriOpener {
    program: String,
    leading_args: Vec<String>,
}

impl Default for SystemUriOpener {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::with_program("open", Vec::new())
        } else if cfg!(target_os = "windows") {
            Self::with_program("cmd", vec!["/C".into(), "start".into(), String::new()])
        } else {
            Self::with_program("xdg-open", Vec::new())
        }
    }
}

impl SystemUriOpener {
    /// Use `program` with `leading_args` placed before the URI.
    pub fn with_program(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }
}

#[async_trait]
impl UriOpener for SystemUriOpener {
    async fn open(&self, uri: &str) -> ChannelResult<()> {
        let status = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await
            .map_err(|e| ChannelError::OpenFailed(format!("{}: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(ChannelError::OpenFailed(format!(
                "{} exited with {}",
                self.program, status
            )))
        }
    }
}
