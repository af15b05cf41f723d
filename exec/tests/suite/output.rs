use std::io;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use anyhow::Result;
use pretty_assertions::assert_eq;
use privileged_exec::CommandSpec;
use privileged_exec::run;
use privileged_exec::run_shell;

use super::harness::LocalLauncher;
use super::harness::granted;

#[test]
fn large_output_arrives_complete_and_in_order() -> Result<()> {
    let (authorization, _broker) = granted();
    let launcher = LocalLauncher::default();
    let mut stdout = Vec::new();

    run_shell(
        &launcher,
        &authorization,
        "i=0; while [ $i -lt 4000 ]; do echo line-$i; i=$((i+1)); done",
        &mut stdout,
    )?;

    let expected: String = (0..4000).map(|i| format!("line-{i}\n")).collect();
    assert_eq!(stdout.len(), expected.len());
    assert_eq!(String::from_utf8(stdout)?, expected);
    Ok(())
}

#[test]
fn binary_output_is_relayed_verbatim() -> Result<()> {
    let (authorization, _broker) = granted();
    let launcher = LocalLauncher::default();
    let mut stdout = Vec::new();

    run(
        &launcher,
        &authorization,
        &CommandSpec::new("/usr/bin/printf", ["\\000\\001\\377\\n"])?,
        &mut stdout,
    )?;

    assert_eq!(stdout, vec![0x00, 0x01, 0xff, b'\n']);
    Ok(())
}

/// Records when each chunk reached the writer.
struct TimedWriter {
    started: Instant,
    chunks: Vec<(Duration, Vec<u8>)>,
}

impl Write for TimedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.chunks.push((self.started.elapsed(), buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn output_is_streamed_before_the_command_exits() -> Result<()> {
    let (authorization, _broker) = granted();
    let launcher = LocalLauncher::default();
    let mut writer = TimedWriter {
        started: Instant::now(),
        chunks: Vec::new(),
    };

    run_shell(&launcher, &authorization, "echo first; sleep 1; echo second", &mut writer)?;

    let total: Vec<u8> = writer.chunks.iter().flat_map(|(_, bytes)| bytes.clone()).collect();
    assert_eq!(total, b"first\nsecond\n");
    let (first_at, first) = &writer.chunks[0];
    assert_eq!(first, b"first\n");
    assert!(
        *first_at < Duration::from_millis(900),
        "first chunk was held back for {first_at:?}"
    );
    Ok(())
}
