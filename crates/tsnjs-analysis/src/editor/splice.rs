//! Byte-range splicing and the atomic file write (spec.md §4.5): builds the
//! new file content in memory and writes it in one rename, so a failure
//! partway through never leaves the target half-written.

use std::fs;
use std::io::Write;
use std::path::Path;

use tsnjs_core::{GuardError, IoError, Span};

/// Replace `source[span.bytes]` with `replacement`, returning the new file
/// text.
pub fn splice_span(source: &str, span: &Span, replacement: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() - span.byte_length() + replacement.len());
    out.extend_from_slice(&bytes[..span.bytes.start]);
    out.extend_from_slice(replacement.as_bytes());
    out.extend_from_slice(&bytes[span.bytes.end..]);
    String::from_utf8(out).expect("splicing valid UTF-8 segments around a UTF-8 boundary stays valid UTF-8")
}

/// Validate and apply a `--replace-range [rStart, rEnd)` sub-interval,
/// expressed as byte offsets relative to `entry_span`'s own text.
pub fn splice_range(
    source: &str,
    entry_span: &Span,
    relative_start: usize,
    relative_end: usize,
    replacement: &str,
) -> Result<String, GuardError> {
    if relative_start > relative_end || relative_end > entry_span.byte_length() {
        return Err(GuardError::RangeOutOfBounds { start: relative_start, end: relative_end });
    }
    let abs_start = entry_span.bytes.start + relative_start;
    let abs_end = entry_span.bytes.start + relative_end;
    let sub_span = Span::new(0, 0, abs_start, abs_end);
    Ok(splice_span(source, &sub_span, replacement))
}

/// Replace only `identifier_span` with `new_identifier` (the `--rename`
/// operation).
pub fn splice_rename(source: &str, identifier_span: &Span, new_identifier: &str) -> String {
    splice_span(source, identifier_span, new_identifier)
}

/// Write `content` to `path` atomically: the new bytes land in a sibling
/// temp file first, then `rename` swaps it into place in one syscall.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), IoError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("out");
    let tmp_path = dir.join(format!(".{file_name}.tsnjs-tmp"));

    let mut tmp = fs::File::create(&tmp_path).map_err(|e| IoError::WriteFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tmp.write_all(content.as_bytes()).map_err(|e| IoError::WriteFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tmp.sync_all().ok();
    drop(tmp);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        IoError::WriteFailed { path: path.display().to_string(), message: e.to_string() }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splices_whole_span() {
        let source = "function alpha() { return 1; }";
        let span = Span::new(0, source.len(), 0, source.len());
        let result = splice_span(source, &span, "function alpha() { return 2; }");
        assert_eq!(result, "function alpha() { return 2; }");
    }

    #[test]
    fn splices_sub_range_relative_to_entry() {
        let source = "function alpha() { return 1; }";
        let entry_span = Span::new(0, source.len(), 0, source.len());
        let result = splice_range(source, &entry_span, 19, 28, "return 9").unwrap();
        assert_eq!(result, "function alpha() { return 9; }");
    }

    #[test]
    fn rejects_out_of_bounds_range() {
        let source = "short";
        let entry_span = Span::new(0, source.len(), 0, source.len());
        assert!(splice_range(source, &entry_span, 0, 100, "x").is_err());
    }

    #[test]
    fn atomic_write_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.js");
        write_atomic(&path, "const x = 1;").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "const x = 1;");
    }
}
