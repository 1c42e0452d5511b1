//! Output helpers for the `amg` CLI.

use std::io::{self, Write};

/// Write one line to stdout.
///
/// Returns `false` once stdout is gone (e.g. piped to `head`), so callers
/// can stop producing output without treating it as an error.
pub fn emit_line(line: &str) -> bool {
    write_line(&mut io::stdout().lock(), line)
}

fn write_line<W: Write>(out: &mut W, line: &str) -> bool {
    writeln!(out, "{line}").and_then(|()| out.flush()).is_ok()
}
