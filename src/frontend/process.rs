//! Out-of-process front-end transport.
//!
//! Invokes a configured command once per call:
//!
//! ```text
//! <command> <args..> parse            stdin: spec text   stdout: ParseResult JSON
//! <command> <args..> generate <Type>  stdin: spec text   stdout: GenerateResult JSON
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::FrontEndConfig;
use crate::frontend::{FrontEndError, GenerateResult, LanguageFrontEnd, ParseResult};

/// Front-end reached through a child process per call.
#[derive(Debug, Clone)]
pub struct ProcessFrontEnd {
    command: String,
    args: Vec<String>,
}

impl ProcessFrontEnd {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &FrontEndConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        operation: &[&str],
        input: &str,
    ) -> Result<T, FrontEndError> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .args(operation)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Feed stdin concurrently so a chatty child cannot block on a full stdout pipe.
        if let Some(mut stdin) = child.stdin.take() {
            let input = input.to_owned();
            let command = self.command.clone();
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(input.as_bytes()).await {
                    tracing::debug!(%command, error = %e, "Front-end stdin closed before input was written");
                }
            });
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(FrontEndError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[async_trait]
impl LanguageFrontEnd for ProcessFrontEnd {
    async fn parse(&self, text: &str) -> Result<ParseResult, FrontEndError> {
        self.invoke(&["parse"], text).await
    }

    async fn generate(&self, text: &str, type_ref: &str) -> Result<GenerateResult, FrontEndError> {
        self.invoke(&["generate", type_ref], text).await
    }
}
