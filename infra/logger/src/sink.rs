use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Destination for formatted lines. Each line is written with a single call
/// under a lock, so concurrent lines never interleave.
#[derive(Default)]
pub enum Sink {
    #[default]
    Stdout,
    Stderr,
    Buffer(SharedBuffer),
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl Sink {
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self::Writer(Mutex::new(Box::new(writer)))
    }

    pub(crate) fn write_line(&self, line: &str) -> io::Result<()> {
        match self {
            Self::Stdout => writeln!(io::stdout().lock(), "{line}"),
            Self::Stderr => writeln!(io::stderr().lock(), "{line}"),
            Self::Buffer(buffer) => {
                buffer.push_line(line);
                Ok(())
            },
            Self::Writer(writer) => {
                let mut writer = writer.lock();
                writeln!(writer, "{line}")?;
                writer.flush()
            },
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::Buffer(buffer) => f.debug_tuple("Buffer").field(buffer).finish(),
            Self::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// In-memory sink that can be cloned and inspected after logging.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push_line(&self, line: &str) {
        let mut bytes = self.0.lock();
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
    }

    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}
