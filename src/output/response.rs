use anyhow::Result;
use std::io::Write;

use dronectl::ApiResponse;

use super::styling::{bright_green, bright_red, bright_yellow};
use super::tables::headers_table;

/// Prints a response: status line (and headers with `include`) to stderr,
/// body to stdout.
///
/// JSON bodies are pretty-printed unless `raw` is set; anything else is
/// written byte for byte.
pub fn print_response(response: &ApiResponse, include: bool, raw: bool) -> Result<()> {
    eprintln!("{}", render_status(response));

    if include {
        eprintln!("{}", headers_table(response.headers()));
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&render_body(response, raw))?;
    stdout.flush()?;

    Ok(())
}

fn render_status(response: &ApiResponse) -> String {
    let status = response.status();
    let line = format!("HTTP {status}");
    if status.is_success() {
        bright_green(line).to_string()
    } else if status.is_client_error() {
        bright_yellow(line).to_string()
    } else {
        bright_red(line).to_string()
    }
}

fn render_body(response: &ApiResponse, raw: bool) -> Vec<u8> {
    if raw || response.body().is_empty() {
        return response.body().to_vec();
    }

    match serde_json::from_slice::<serde_json::Value>(response.body()) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(mut pretty) => {
                pretty.push('\n');
                pretty.into_bytes()
            }
            Err(_) => response.body().to_vec(),
        },
        Err(_) => response.body().to_vec(),
    }
}
