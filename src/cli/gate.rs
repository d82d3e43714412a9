//! Shared-passphrase access gate.
//!
//! A single code from `RECLAIM_ACCESS_CODE` (environment or `.env`). When it is
//! unset the gate is open. Plain comparison, no rate limiting, no expiry.
//!
//! The line-oriented prompt lives here; the TUI has its own in-screen prompt
//! that calls [`AccessGate::check`].

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::error::AppError;

pub const ACCESS_CODE_ENV: &str = "RECLAIM_ACCESS_CODE";

#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    code: Option<String>,
}

impl AccessGate {
    pub fn new(code: Option<String>) -> Self {
        Self {
            code: code.filter(|c| !c.is_empty()),
        }
    }

    /// Read the code from the environment, loading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::new(std::env::var(ACCESS_CODE_ENV).ok())
    }

    pub fn is_open(&self) -> bool {
        self.code.is_none()
    }

    pub fn check(&self, attempt: &str) -> bool {
        match &self.code {
            None => true,
            Some(code) => attempt == code,
        }
    }

    /// Admit or deny: use `provided` when given, otherwise prompt on stdin.
    pub fn require(&self, provided: Option<&str>) -> Result<(), AppError> {
        if self.is_open() {
            return Ok(());
        }
        if let Some(attempt) = provided {
            return self.admit(attempt);
        }
        self.prompt(io::stdin().lock(), io::stderr())
    }

    fn admit(&self, attempt: &str) -> Result<(), AppError> {
        if self.check(attempt) {
            Ok(())
        } else {
            warn!("access denied");
            Err(AppError::new(3, "Access Denied."))
        }
    }

    /// Prompt until the code matches, `q` cancels, or input closes.
    ///
    /// The code is checked before `q`, so a passphrase of `q` still admits.
    fn prompt<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> Result<(), AppError> {
        let write_err = |e: io::Error| AppError::new(4, format!("Failed to write prompt: {e}"));
        loop {
            write!(out, "Enter Access Code (q to quit): ").map_err(write_err)?;
            out.flush().map_err(write_err)?;

            let mut line = String::new();
            let bytes = input
                .read_line(&mut line)
                .map_err(|e| AppError::new(4, format!("Failed to read input: {e}")))?;

            if bytes == 0 {
                return Err(AppError::new(
                    3,
                    "Access code required. Provide one with `--access-code <CODE>`.",
                ));
            }

            let attempt = line.trim_end_matches(['\r', '\n']);
            if self.check(attempt) {
                return Ok(());
            }
            if attempt.eq_ignore_ascii_case("q") {
                return Err(AppError::new(3, "Canceled."));
            }
            warn!("access denied");
            writeln!(out, "Access Denied.").map_err(write_err)?;
        }
    }
}
