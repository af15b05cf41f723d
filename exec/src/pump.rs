use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;

use tracing::debug;
use tracing::warn;

/// Bytes requested from the output channel per read.
pub const CHUNK_SIZE: usize = 1024;

/// Copy `output` into `writer` until a read returns no data or fails.
///
/// Each chunk is written and flushed as soon as it arrives. If `writer` fails,
/// the rest of `output` is still read and discarded so the elevated process
/// cannot block on a full pipe. `output` is dropped (closed) before returning.
///
/// Returns the number of bytes forwarded to `writer`.
pub fn drain<R, W>(mut output: R, writer: &mut W) -> u64
where
    R: Read,
    W: Write + ?Sized,
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut forwarded = 0u64;
    let mut forwarding = true;
    loop {
        let n = match output.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                debug!(error = %err, "stopped reading privileged output");
                break;
            }
        };
        if !forwarding {
            continue;
        }
        match writer.write_all(&buf[..n]).and_then(|()| writer.flush()) {
            Ok(()) => forwarded += n as u64,
            Err(err) => {
                warn!(error = %err, "Failed to forward privileged output; discarding the rest");
                forwarding = false;
            }
        }
    }
    forwarded
}
