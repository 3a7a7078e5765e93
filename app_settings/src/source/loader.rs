//! Filesystem access for file-backed sources.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Read the file at `path` through a `cap-std` handle on its parent
/// directory and decode it.
///
/// Returns `Ok(None)` when the file or its directory does not exist.
///
/// # Errors
///
/// Returns an [`io::Error`] for any other failure, such as insufficient
/// permissions, `path` naming a directory, or contents that [`decode`]
/// rejects.
pub(super) fn read_source_file(path: &Utf8Path) -> io::Result<Option<String>> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("cannot determine file name for source path"))?;
    let contents = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())
        .and_then(|dir| dir.read(file_name));
    match contents {
        Ok(bytes) => decode(bytes).map(Some),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Decode configuration bytes: UTF-16 when the text starts with a UTF-16
/// byte order mark, UTF-8 otherwise.
///
/// A UTF-8 byte order mark is kept; the XML parser skips it.
///
/// # Errors
///
/// Returns [`io::ErrorKind::InvalidData`] when the bytes are not valid in the
/// detected encoding.
pub(super) fn decode(bytes: Vec<u8>) -> io::Result<String> {
    let bom: Option<[u8; 2]> = bytes.get(..2).and_then(|head| head.try_into().ok());
    match bom {
        Some([0xFF, 0xFE]) => decode_utf16(bytes.get(2..).unwrap_or_default(), |first, second| (second, first)),
        Some([0xFE, 0xFF]) => decode_utf16(bytes.get(2..).unwrap_or_default(), |first, second| (first, second)),
        _ => String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err)),
    }
}

fn decode_utf16(bytes: &[u8], order: fn(u8, u8) -> (u8, u8)) -> io::Result<String> {
    let chunks = bytes.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "UTF-16 text has an odd number of bytes",
        ));
    }
    let units = chunks.map(|pair| match *pair {
        [first, second] => {
            let (hi, lo) = order(first, second);
            (u16::from(hi) << 8) | u16::from(lo)
        }
        _ => 0,
    });
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
