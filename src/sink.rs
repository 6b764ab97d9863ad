use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Shared handle to the stream log lines are written to
///
/// Cloning a sink yields another handle to the same writer, which lets the
/// default listener and the logger's own `write` helpers share one stream.
#[derive(Clone)]
pub struct Sink {
    writer: Rc<RefCell<Box<dyn Write>>>,
}

impl Sink {
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::from_writer(io::stderr())
    }

    pub fn from_writer(writer: impl Write + 'static) -> Self {
        Self {
            writer: Rc::new(RefCell::new(Box::new(writer))),
        }
    }

    /// Write `text` verbatim; an empty string performs no write at all
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let mut writer = self.writer.borrow_mut();
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

/// In-memory writer for capturing output
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    /// Return the captured output and clear the buffer
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.bytes.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn sink(&self) -> Sink {
        Sink::from_writer(self.clone())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
