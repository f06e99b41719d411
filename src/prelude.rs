use std::env;
use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local, TimeZone};

pub use crate::error::LoggerError;
pub use crate::levels::LogLevel;

use crate::sync::threshold_cell;

/// Environment variable consulted by [`set_threshold_from_env`].
pub const THRESHOLD_ENV_VAR: &str = "LOG_LEVEL";

/// Upper bound on one rendered message, before the per-line prefixes.
const MAX_MESSAGE_LEN: usize = 64 * 1024;

/// Appended when a message hits [`MAX_MESSAGE_LEN`].
const TRUNCATION_MARKER: &str = " [truncated]";

/// Body used when a value inside the template fails to format itself.
const FORMAT_FAILURE_TEXT: &str = "(message formatting failed)";

/// Physical lines whose stdout write failed since process start.
static DROPPED_LINES: AtomicU64 = AtomicU64::new(0);

/// Call-site metadata for one log call.
///
/// Built by the [`log_error!`](crate::log_error),
/// [`log_print!`](crate::log_print), and [`log_debug!`](crate::log_debug)
/// macros and handed straight to [`emit`]; it lives for the duration of the
/// call and is never retained.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    file: &'a str,
    function: &'a str,
    line: u32,
    level: LogLevel,
}

impl<'a> Record<'a> {
    /// Constructs a new record for the given call site.
    ///
    /// # Arguments
    ///
    /// * `file` - Source file of the call site, typically `file!()`.
    /// * `function` - Enclosing function, typically `function_name!()`.
    /// * `line` - Source line of the call site, typically `line!()`.
    /// * `level` - Severity the message is emitted at.
    pub const fn new(file: &'a str, function: &'a str, line: u32, level: LogLevel) -> Self {
        Self {
            file,
            function,
            line,
            level,
        }
    }
}

/// Sets the process-wide minimum severity required for emission.
///
/// The threshold starts at [`LogLevel::Print`] and may be changed at any
/// point; logging policy is process-global by design, not per-call state.
pub fn set_threshold(level: LogLevel) {
    threshold_cell().set(level);
}

/// Returns the current process-wide threshold.
pub fn threshold() -> LogLevel {
    threshold_cell().get()
}

/// Applies the `LOG_LEVEL` environment variable to the threshold.
///
/// Reads [`THRESHOLD_ENV_VAR`] once. When the variable is unset the
/// threshold is left untouched; when it holds a level name or ordinal
/// (see [`LogLevel`]'s `FromStr`), the threshold is updated.
///
/// # Returns
///
/// A result containing the effective `LogLevel`, or a `LoggerError` when the
/// variable is set to an unparseable value (the threshold is left unchanged
/// in that case).
pub fn set_threshold_from_env() -> Result<LogLevel, LoggerError> {
    match env::var(THRESHOLD_ENV_VAR) {
        Ok(value) => {
            let level = value.parse::<LogLevel>()?;
            set_threshold(level);
            Ok(level)
        }
        Err(_) => Ok(threshold()),
    }
}

/// Number of physical lines dropped because a stdout write failed.
///
/// Write failures are never reported to the logging caller; this counter is
/// the only trace they leave.
pub fn dropped_lines() -> u64 {
    DROPPED_LINES.load(Ordering::Relaxed)
}

/// Emits one log record to standard output.
///
/// This is the operation behind the logging macros. When the current
/// threshold is below the record's severity the call returns immediately and
/// the message is never rendered. Otherwise the message is rendered once,
/// split on newlines, and written one physical line at a time, each line
/// carrying the full timestamp/pid/tid/severity prefix and the call site.
/// The stdout handle stays locked for the whole write loop, so concurrent
/// callers interleave per call rather than per line; formatting happens
/// before the lock is taken.
///
/// # Arguments
///
/// * `record` - Call-site metadata, usually built by the macros.
/// * `args` - Message template and captures, usually `format_args!(...)`.
pub fn emit(record: &Record<'_>, args: fmt::Arguments<'_>) {
    if threshold() < record.level {
        return;
    }

    let message = format_message(args);
    let prefix = render_prefix(&Local::now(), process::id(), os_thread_id(), record.level);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let dropped = write_record(
        &mut out,
        &prefix,
        base_name(record.file),
        record.function,
        record.line,
        &message,
    );

    if dropped != 0 {
        DROPPED_LINES.fetch_add(dropped, Ordering::Relaxed);
    }
}

/// Accumulates rendered message text up to [`MAX_MESSAGE_LEN`] bytes.
///
/// Once the cap is hit further input is discarded; the cut always lands on a
/// char boundary.
struct BoundedBuf {
    text: String,
    truncated: bool,
}

impl BoundedBuf {
    fn new() -> Self {
        Self {
            text: String::new(),
            truncated: false,
        }
    }

    fn into_text(mut self) -> String {
        if self.truncated {
            self.text.push_str(TRUNCATION_MARKER);
        }
        self.text
    }
}

impl fmt::Write for BoundedBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }

        let room = MAX_MESSAGE_LEN - self.text.len();
        if s.len() <= room {
            self.text.push_str(s);
        } else {
            let mut cut = room;
            while !s.is_char_boundary(cut) {
                cut -= 1;
            }
            self.text.push_str(&s[..cut]);
            self.truncated = true;
        }

        Ok(())
    }
}

/// Renders the message template and normalizes its tail.
///
/// The result always ends in exactly one newline: one is appended only when
/// the template did not already end with one, so a trailing newline in the
/// template produces no blank output line. A value that fails to format
/// itself yields [`FORMAT_FAILURE_TEXT`] instead of dropping the record.
fn format_message(args: fmt::Arguments<'_>) -> String {
    let mut buf = BoundedBuf::new();
    let mut message = match buf.write_fmt(args) {
        Ok(()) => buf.into_text(),
        Err(fmt::Error) => FORMAT_FAILURE_TEXT.to_string(),
    };

    if !message.ends_with('\n') {
        message.push('\n');
    }

    message
}

/// Renders the fixed-layout prefix for one call.
///
/// Layout: date, time with exactly six zero-padded microsecond digits, the
/// process id right-justified in width 7, `:`, the thread id left-justified
/// in width 7, and the bracketed severity tag.
fn render_prefix<Tz>(now: &DateTime<Tz>, pid: u32, tid: u64, level: LogLevel) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!(
        "{} {:>7}:{:<7} [{}]",
        now.format("%Y-%m-%d %H:%M:%S.%6f"),
        pid,
        tid,
        level.tag()
    )
}

/// Strips directory components from a call-site path, keeping whatever
/// follows the last `/` or `\`.
fn base_name(file: &str) -> &str {
    match file.rfind(['/', '\\']) {
        Some(index) => &file[index + 1..],
        None => file,
    }
}

/// Writes one record's physical lines to `out`, returning how many line
/// writes failed.
///
/// `message` must already end in a newline. Every line of a multi-line
/// message gets the full prefix, so grepping by timestamp or severity still
/// matches stack traces and dumped buffers.
fn write_record<W: Write>(
    out: &mut W,
    prefix: &str,
    file: &str,
    function: &str,
    line: u32,
    message: &str,
) -> u64 {
    let mut dropped = 0;

    for content in message.split_terminator('\n') {
        if writeln!(out, "{} {}::{}({}): {}", prefix, file, function, line, content).is_err() {
            dropped += 1;
        }
    }

    dropped
}

/// OS-level id of the calling thread, as it appears in tools like `ps -L`.
#[cfg(target_os = "linux")]
#[inline]
fn os_thread_id() -> u64 {
    // SAFETY: gettid takes no arguments and cannot fail.
    (unsafe { libc::syscall(libc::SYS_gettid) }) as u64
}

/// OS-level id of the calling thread.
#[cfg(target_os = "macos")]
#[inline]
fn os_thread_id() -> u64 {
    let mut tid: u64 = 0;
    // SAFETY: pthread_self is always a valid thread and tid outlives the call.
    unsafe { libc::pthread_threadid_np(libc::pthread_self(), &mut tid) };
    tid
}

/// Stand-in thread id where the OS offers no numeric one; stable within a
/// thread, distinct across threads of this process.
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
#[inline]
fn os_thread_id() -> u64 {
    static NEXT_TID: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static TID: u64 = NEXT_TID.fetch_add(1, Ordering::Relaxed);
    }
    TID.with(|tid| *tid)
}
