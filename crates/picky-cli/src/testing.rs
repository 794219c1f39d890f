//! Stub package-manager executables and log capture for tests.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

static SERIAL: Mutex<()> = Mutex::new(());

/// Tests that write and then execute scripts must not overlap, or a
/// concurrent fork can hold a script open for writing and exec fails
/// with "text file busy".
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An executable shell script with the given body.
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// An executable that prints `output` whatever its arguments.
pub fn stub(dir: &Path, name: &str, output: &str) -> PathBuf {
    script(dir, name, &format!("cat <<'PICKY_EOF'\n{output}PICKY_EOF\n"))
}

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with events at `level` and above recorded on this thread.
/// Returns its result and one `LEVEL message` string per event.
pub fn capture<R>(level: LevelFilter, f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(buffer.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    let lines = String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| line.trim_start().to_string())
        .collect();
    (result, lines)
}
