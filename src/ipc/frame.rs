//! NUL-delimited framing shared by the command and notification sockets.
//!
//! Every message, in either direction, is a UTF-8 payload followed by a
//! single `0x00` byte.  Readers strip the terminator and trim surrounding
//! whitespace.

use std::io::{self, BufRead, Read, Write};

/// Frame terminator.
pub const NUL: u8 = 0;

/// Largest accepted payload, terminator excluded.
pub const MAX_FRAME_BYTES: usize = 1 << 20;

/// Write `payload` followed by the terminator and flush.
pub fn write_frame<W: Write>(writer: &mut W, payload: &str) -> io::Result<()> {
    let mut buf = Vec::with_capacity(payload.len() + 1);
    buf.extend_from_slice(payload.as_bytes());
    buf.push(NUL);
    writer.write_all(&buf)?;
    writer.flush()
}

/// Read one frame of at most [`MAX_FRAME_BYTES`].
///
/// Returns `Ok(None)` on a clean EOF (no bytes pending).  A stream that ends
/// in the middle of a frame is an [`io::ErrorKind::UnexpectedEof`] error; an
/// overlong frame is [`io::ErrorKind::InvalidData`].
pub fn read_frame<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    read_frame_limited(reader, MAX_FRAME_BYTES)
}

fn read_frame_limited<R: BufRead>(reader: &mut R, limit: usize) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader
        .by_ref()
        .take(limit as u64 + 1)
        .read_until(NUL, &mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&NUL) {
        if buf.len() > limit {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("frame exceeds {} bytes", limit),
            ));
        }
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ended inside a frame",
        ));
    }
    buf.pop();
    let text = String::from_utf8(buf)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(text.trim().to_string()))
}

/// Build a command line: the verb followed by each argument in double
/// quotes, e.g. `GetClientList "1"`.
pub fn command(verb: &str, args: &[&str]) -> String {
    let mut out = verb.to_string();
    for arg in args {
        out.push_str(" \"");
        for c in arg.chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }
    out
}
