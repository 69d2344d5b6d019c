use crate::error::ReadError;

/// Format a byte count as a human-readable size string (e.g., "4 KB", "2 MB").
///
/// Values that aren't clean multiples of KB/MB are shown in bytes. For
/// approximate display, see [`format_bytes_approx`].
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 && bytes.is_multiple_of(1024 * 1024) {
        format!("{} MB", bytes / (1024 * 1024))
    } else if bytes >= 1024 && bytes.is_multiple_of(1024) {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format a byte count with fractional units (e.g., "1.5 KB", "6.8 GB").
pub fn format_bytes_approx(bytes: u64) -> String {
    const GB: u64 = 1024 * 1024 * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Read a fixed-length ASCII string from a byte slice.
///
/// Non-printable bytes are replaced with spaces, then the result is trimmed.
/// Does not stop at null bytes; the whole buffer is processed.
pub fn read_ascii_fixed(buf: &[u8]) -> String {
    let s: String = buf
        .iter()
        .map(|&b| {
            if (0x20..0x7F).contains(&b) {
                b as char
            } else {
                ' '
            }
        })
        .collect();
    s.trim().to_string()
}

/// Render bytes as uppercase hex with no separators (`[0xDE, 0xAD]` → `"DEAD"`).
pub fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Borrow `N` bytes at `offset`, failing if the slice is too short.
pub fn array_at<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], ReadError> {
    offset
        .checked_add(N)
        .and_then(|end| buf.get(offset..end))
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| ReadError::truncated(offset as u64, N as u64, buf.len() as u64))
}

/// Read a big-endian u32 from a byte slice.
pub fn read_u32_be(buf: &[u8], offset: usize) -> Result<u32, ReadError> {
    array_at::<4>(buf, offset).map(u32::from_be_bytes)
}

/// Read a little-endian u32 from a byte slice.
pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32, ReadError> {
    array_at::<4>(buf, offset).map(u32::from_le_bytes)
}

/// Read a single byte from a byte slice.
pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8, ReadError> {
    buf.get(offset)
        .copied()
        .ok_or_else(|| ReadError::truncated(offset as u64, 1, buf.len() as u64))
}
