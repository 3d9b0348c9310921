//! Output sink for interpreter messages.
//!
//! Words such as `try_catch`, `#dump` and tracing write through this sink
//! instead of stdout so that tests and embedding hosts can capture output.
//! Each message may carry a color tag (`"error"`, `"info"`, ...), which the
//! sinks here ignore. Errors go through [`PrintHandlerImpl::output_error`],
//! so the stdout sink routes them to stderr whatever their tag is.

use parking_lot::Mutex;

/// Tag used for error output.
pub const ERROR_TAG: &str = "error";

/// Writes to stdout, errors to stderr.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn output(&self, msg: &str, _tag: Option<&str>) {
        println!("{msg}");
    }

    pub fn output_error(&self, msg: &str, _tag: Option<&str>) {
        eprintln!("{msg}");
    }
}

/// Captures output lines to a buffer. Errors land in the buffer too and
/// are also kept on their own.
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
    errors: Mutex<String>,
}

fn push_line(buf: &Mutex<String>, msg: &str) {
    let mut buf = buf.lock();
    buf.push_str(msg);
    buf.push('\n');
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(String::new()),
            errors: Mutex::new(String::new()),
        }
    }

    pub fn output(&self, msg: &str, _tag: Option<&str>) {
        push_line(&self.buffer, msg);
    }

    pub fn output_error(&self, msg: &str, _tag: Option<&str>) {
        push_line(&self.buffer, msg);
        push_line(&self.errors, msg);
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn get_errors(&self) -> String {
        self.errors.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
        self.errors.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes to stdout (default).
    Stdout(StdoutPrintHandler),
    /// Captures to a buffer (tests, embedding).
    Buffer(BufferPrintHandler),
    /// Discards all output.
    Silent,
}

impl PrintHandlerImpl {
    /// Write one message line with an optional color tag.
    pub fn output(&self, msg: &str, tag: Option<&str>) {
        match self {
            Self::Stdout(h) => h.output(msg, tag),
            Self::Buffer(h) => h.output(msg, tag),
            Self::Silent => {}
        }
    }

    /// Write an error message, whatever tag it carries.
    pub fn output_error(&self, msg: &str, tag: Option<&str>) {
        match self {
            Self::Stdout(h) => h.output_error(msg, tag),
            Self::Buffer(h) => h.output_error(msg, tag),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Captured errors only.
    pub fn get_errors(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_errors(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Silent)
}
