// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Child process helpers shared by the transformer and the executor.

use std::io::{self, Write};
use std::process::{Command, Output, Stdio};

/// Spawn `command`, write `input` to its stdin, and collect its output.
///
/// Stdin is fed from a separate thread so a child that writes large output
/// before draining its input cannot deadlock against us.
pub fn output_with_stdin(command: &mut Command, input: &str) -> io::Result<Output> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_owned();
        std::thread::spawn(move || {
            // A child may exit without reading stdin; its exit status decides.
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                tracing::debug!("child stdin closed early: {}", e);
            }
        })
    });

    let output = child.wait_with_output()?;
    if let Some(writer) = writer
        && writer.join().is_err()
    {
        tracing::warn!("stdin writer thread panicked");
    }
    Ok(output)
}

/// Stderr (or stdout when stderr is empty), trimmed, for error messages.
pub fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    };
    if detail.is_empty() {
        output.status.to_string()
    } else {
        format!("{}: {}", output.status, detail)
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
