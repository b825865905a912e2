//! `--with-code` inline snippet handling (spec.md §4.5): unescape `\"` and
//! `\\`, leaving any other backslash run untouched so Windows paths survive
//! unescaped (`C:\Users\foo` is not mangled into `C:Usersfoo`).

use tsnjs_core::GuardError;

pub fn unescape_inline(raw: &str) -> Result<String, GuardError> {
    if raw.is_empty() {
        return Err(GuardError::EmptyReplacement);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('"') => {
                    out.push('"');
                    chars.next();
                }
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }

    if out.trim().is_empty() {
        return Err(GuardError::EmptyReplacement);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_quotes_and_backslashes() {
        assert_eq!(unescape_inline(r#"say \"hi\""#).unwrap(), r#"say "hi""#);
        assert_eq!(unescape_inline(r"a\\b").unwrap(), r"a\b");
    }

    #[test]
    fn preserves_windows_path_runs() {
        assert_eq!(unescape_inline(r"C:\Users\foo").unwrap(), r"C:\Users\foo");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(unescape_inline("").is_err());
        assert!(unescape_inline("   ").is_err());
    }
}
