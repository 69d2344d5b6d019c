use thiserror::Error;

/// Failure to read a byte range from a source or buffer.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The requested range runs past the end of the data
    #[error("read of {len} bytes at offset 0x{offset:X} runs past end of data ({size} bytes)")]
    TruncatedRead { offset: u64, len: u64, size: u64 },

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReadError {
    pub fn truncated(offset: u64, len: u64, size: u64) -> Self {
        Self::TruncatedRead { offset, len, size }
    }
}

/// Errors raised while identifying the disc layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Original Xbox (XSF) layout: recognized, deliberately not parsed
    #[error("original Xbox disc layout is not supported")]
    UnsupportedLegacyLayout,

    /// No media signature at any known root offset
    #[error("unknown disc layout: no media signature at any known offset")]
    UnknownLayout,

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Errors raised while scanning the root directory.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("'{0}' not found in root directory")]
    EntryNotFound(String),

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Errors raised while parsing an XEX2 executable header.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("bad executable magic {0:02X?} (expected \"XEX2\")")]
    BadMagic([u8; 4]),

    #[error("code offset 0x{code_offset:X} is beyond the executable size ({size} bytes)")]
    CodeOffsetOutOfRange { code_offset: u32, size: u64 },

    #[error("certificate offset 0x{cert_offset:X} is beyond the code offset 0x{code_offset:X}")]
    CertOffsetBeyondCode { cert_offset: u32, code_offset: u32 },

    #[error("optional header table ({entries} entries) spills into code at 0x{code_offset:X}")]
    InfoTableOverflow { entries: u32, code_offset: u32 },

    #[error("execution info header not present")]
    ExecutionInfoNotFound,

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Any failure of a full disc analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Directory: {0}")]
    Scan(#[from] ScanError),

    #[error("Executable: {0}")]
    Header(#[from] HeaderError),

    #[error(transparent)]
    Read(#[from] ReadError),

    /// I/O error opening or sizing the image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// True when the analysis stopped because the input ended early.
    pub fn is_truncated(&self) -> bool {
        let read = match self {
            Self::Layout(LayoutError::Read(e)) => e,
            Self::Scan(ScanError::Read(e)) => e,
            Self::Header(HeaderError::Read(e)) => e,
            Self::Read(e) => e,
            _ => return false,
        };
        matches!(read, ReadError::TruncatedRead { .. })
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
