//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("build"; "{} pages", count);
//! // [build] 45 pages
//! ```
//!
//! Watch mode uses [`WatchStatus`] instead, which keeps overwriting one
//! block of output so the terminal does not scroll on every rebuild.

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Columns assumed when the terminal size is unknown (pipes, CI).
const FALLBACK_WIDTH: u16 = 120;

/// `[` + `]` + one space
const PREFIX_OVERHEAD: usize = 3;

fn terminal_width() -> usize {
    usize::from(*TERMINAL_WIDTH.get_or_init(|| size().map_or(FALLBACK_WIDTH, |(w, _)| w)))
}

/// Log a message with a colored module prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print one log line. Single-line messages are cut to the terminal width.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let max_len = terminal_width().saturating_sub(module.chars().count() + PREFIX_OVERHEAD);
    let message = if message.contains('\n') {
        message
    } else {
        truncate_chars(message, max_len)
    };

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Log an error and its whole cause chain under the `error` prefix.
pub fn log_error(context: &str, err: &anyhow::Error) {
    log("error", &format!("{context}: {}", error_chain(err)));
}

/// `outer: inner: root` on one line.
pub fn error_chain(err: &anyhow::Error) -> String {
    err.chain().map(ToString::to_string).collect::<Vec<_>>().join(": ")
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "watch" => prefix.bright_green().bold(),
        "analytics" => prefix.bright_magenta().bold(),
        "catalog" | "check" => prefix.bright_cyan().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Keep at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

// ============================================================================
// Watch Status
// ============================================================================

/// Single block of status output for watch mode, replaced on every update.
pub struct WatchStatus {
    /// Lines printed by the previous update
    last_lines: usize,
}

impl WatchStatus {
    pub const fn new() -> Self {
        Self { last_lines: 0 }
    }

    pub fn success(&mut self, message: &str) {
        self.display(&"✓".green().to_string(), message);
    }

    pub fn unchanged(&mut self, path: &str) {
        self.display("", &format!("unchanged: {path}").dimmed().to_string());
    }

    pub fn error(&mut self, summary: &str, detail: &str) {
        let message = if detail.is_empty() {
            summary.to_owned()
        } else {
            format!("{summary}\n{detail}")
        };
        self.display(&"✗".red().to_string(), &message);
    }

    fn display(&mut self, symbol: &str, message: &str) {
        let mut stdout = stdout().lock();
        if self.last_lines > 0 {
            let lines = u16::try_from(self.last_lines).unwrap_or(u16::MAX);
            execute!(stdout, cursor::MoveUp(lines), Clear(ClearType::FromCursorDown)).ok();
        }

        let line = status_line(&chrono::Local::now().format("%H:%M:%S").to_string(), symbol, message);
        writeln!(stdout, "{line}").ok();
        stdout.flush().ok();

        self.last_lines = line_count(message);
    }
}

fn status_line(time: &str, symbol: &str, message: &str) -> String {
    let timestamp = format!("[{time}]").dimmed();
    if symbol.is_empty() {
        format!("{timestamp} {message}")
    } else {
        format!("{timestamp} {symbol} {message}")
    }
}

fn line_count(message: &str) -> usize {
    message.matches('\n').count() + 1
}
