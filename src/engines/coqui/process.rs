//! Running the `tts` executable.
//!
//! Stdout and stderr are drained concurrently into one buffer in arrival
//! order. Cancellation is cooperative: the runner polls the token while the
//! child is alive and kills it once the token fires. On unix a cancellable
//! child runs in its own process group and the whole group is killed, so
//! wrapper scripts take their workers down with them.

use std::io::{self, ErrorKind, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use super::model::CoquiError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const READ_CHUNK: usize = 4096;

/// Cancellation signal shared between a caller and a running synthesis.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Executes one invocation of an external program.
///
/// Implementations return the combined stdout/stderr on success.
pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<u8>, CoquiError>;
}

/// Runs the program as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<u8>, CoquiError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if cancel.is_some() {
            own_process_group(&mut command);
        }

        let mut child = command.spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CoquiError::ToolNotFound(program.to_string())
            } else {
                CoquiError::Io(e)
            }
        })?;

        let output = Arc::new(Mutex::new(Vec::new()));
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(drain(stdout, Arc::clone(&output)));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(drain(stderr, Arc::clone(&output)));
        }

        let status = match cancel {
            Some(token) => wait_or_cancel(&mut child, token),
            None => child.wait().map(Some).map_err(CoquiError::Io),
        };

        // A killed tool's output is discarded, so don't wait on pipes that a
        // detached descendant may still hold open.
        let Some(status) = status? else {
            return Err(CoquiError::Cancelled);
        };

        // Readers finish once the pipes close, which happens on exit.
        for reader in readers {
            if let Ok(Err(e)) = reader.join() {
                log::debug!("Failed to read {program} output: {e}");
            }
        }

        let output = std::mem::take(&mut *output.lock());
        if status.success() {
            Ok(output)
        } else {
            Err(CoquiError::ToolFailed {
                code: status.code(),
                output: String::from_utf8_lossy(&output).into_owned(),
            })
        }
    }
}

/// Wait for `child`, returning `None` if it was killed because `token` fired.
fn wait_or_cancel(
    child: &mut Child,
    token: &CancellationToken,
) -> Result<Option<ExitStatus>, CoquiError> {
    loop {
        if token.is_cancelled() {
            log::info!("Cancelling pid {}", child.id());
            kill_tree(child)?;
            child.wait()?;
            return Ok(None);
        }
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(unix)]
fn own_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut Command) {}

/// Kill the child's process group. The child is not reaped yet, so its pid
/// still names the group even if it has already exited.
#[cfg(unix)]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    let pgid = libc::pid_t::try_from(child.id())
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e))?;
    // SAFETY: kill(2) only sends a signal; no memory is shared with the callee.
    if unsafe { libc::kill(-pgid, libc::SIGKILL) } == 0 {
        return Ok(());
    }
    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        return Ok(());
    }
    Err(err)
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    match child.kill() {
        // Already exited between the poll and the kill.
        Err(e) if e.kind() == ErrorKind::InvalidInput => Ok(()),
        other => other,
    }
}

fn drain<R>(mut pipe: R, output: Arc<Mutex<Vec<u8>>>) -> JoinHandle<io::Result<()>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match pipe.read(&mut buf) {
                Ok(0) => return Ok(()),
                Ok(n) => output.lock().extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    })
}

/// Run `program` until it succeeds, at most `max_retries` times.
///
/// Returns the captured output and the 1-based attempt that succeeded. A
/// missing executable or a cancellation ends the loop immediately; any other
/// failure is logged and retried, and the last one is returned once attempts
/// run out.
pub fn run_with_retries(
    runner: &impl CommandRunner,
    program: &str,
    args: &[String],
    max_retries: u32,
    cancel: Option<&CancellationToken>,
) -> Result<(Vec<u8>, u32), CoquiError> {
    let max_retries = max_retries.max(1);
    let mut last_error = None;

    for attempt in 1..=max_retries {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(CoquiError::Cancelled);
        }

        match runner.run(program, args, cancel) {
            Ok(output) => return Ok((output, attempt)),
            Err(e @ (CoquiError::Cancelled | CoquiError::ToolNotFound(_))) => return Err(e),
            Err(e) => {
                log::warn!("{e}");
                log::warn!("TTS failed (attempt {attempt}/{max_retries})");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(CoquiError::Cancelled))
}
