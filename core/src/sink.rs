//! Label persistence behind an injected sink.
//!
//! # Design
//! Where a label ends up is a collaborator decision, not the adapter's: a
//! batch process writes it to local storage, a request-serving process
//! streams it back to its own caller. Both destinations implement
//! [`LabelSink`]; [`persist_label`] owns the parts that never vary — the
//! transport decoding and the `<trackingNumber>.pdf` naming scheme.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Destination for a decoded label document.
pub trait LabelSink {
    fn write_label(&mut self, filename: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Local-storage sink: writes labels into a fixed directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The path a given filename lands at.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl LabelSink for FileSink {
    fn write_label(&mut self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.dir.join(filename), bytes)
    }
}

/// Response-stream sink: buffers a label for an outbound HTTP response.
///
/// The headers the response should carry are recorded next to the body as
/// plain owned data; the serving process emits both.
#[derive(Debug, Clone, Default)]
pub struct ResponseSink {
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_parts(self) -> (Vec<(String, String)>, Vec<u8>) {
        (self.headers, self.body)
    }
}

impl LabelSink for ResponseSink {
    fn write_label(&mut self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        self.headers = vec![
            (
                "Content-Type".to_string(),
                "application/octet-stream".to_string(),
            ),
            (
                "Content-Disposition".to_string(),
                format!("inline; filename=\"{filename}\""),
            ),
        ];
        self.body = bytes.to_vec();
        Ok(())
    }
}

/// Failure while decoding or writing a label.
#[derive(Debug)]
pub enum PersistError {
    /// The label image was not valid base64.
    Decode(base64::DecodeError),

    /// The sink rejected the write.
    Io(io::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Decode(e) => write!(f, "invalid base64 label image: {e}"),
            PersistError::Io(e) => write!(f, "label could not be written: {e}"),
        }
    }
}

impl std::error::Error for PersistError {}

/// Decodes a base64 label and hands it to the sink under the deterministic
/// name `<trackingNumber>.pdf`. Returns that filename.
pub fn persist_label(
    sink: &mut dyn LabelSink,
    label_image: &str,
    tracking_number: &str,
) -> Result<String, PersistError> {
    let bytes = STANDARD.decode(label_image).map_err(PersistError::Decode)?;
    let filename = format!("{tracking_number}.pdf");
    sink.write_label(&filename, &bytes).map_err(PersistError::Io)?;
    Ok(filename)
}
