//! Private utility module
use std::path::Path;

/// Whether the file at the given path is expected to be Gzip encoded.
pub fn is_gz_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}

/// Remove a trailing `#` comment and surrounding whitespace from a line.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => line[..i].trim(),
        None => line.trim(),
    }
}

/// Split a `key value` or `key = value` directive into its key and the
/// remaining value text. The value has any leading `=` removed.
pub fn split_directive(line: &str) -> (&str, &str) {
    let line = line.trim();
    let end = line
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or_else(|| line.len());
    let (key, rest) = line.split_at(end);
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('=').unwrap_or(rest);
    (key, rest.trim())
}

/// Floor division of signed integers (`-3 div 2 == -2`).
pub fn floor_div(a: isize, b: isize) -> isize {
    a.div_euclid(b)
}

#[cfg(test)]
mod tests {
    use super::{floor_div, is_gz_file, split_directive, strip_comment};

    #[test]
    fn gz_files() {
        assert!(is_gz_file("talairach.lta.gz"));
        assert!(is_gz_file("/tmp/subject/transforms/talairach.lta.gz"));
        assert!(!is_gz_file("talairach.lta"));
        assert!(!is_gz_file("gz"));
    }

    #[test]
    fn comments() {
        assert_eq!(strip_comment("type      = 1 # LINEAR_RAS_TO_RAS"), "type      = 1");
        assert_eq!(strip_comment("# transform file"), "");
        assert_eq!(strip_comment("  nxforms 1  "), "nxforms 1");
    }

    #[test]
    fn directives() {
        assert_eq!(split_directive("type      = 1"), ("type", "1"));
        assert_eq!(split_directive("nxforms 1"), ("nxforms", "1"));
        assert_eq!(split_directive("volume = 256 256 256"), ("volume", "256 256 256"));
        assert_eq!(split_directive("sigma=10000.0"), ("sigma", "10000.0"));
        assert_eq!(split_directive("valid"), ("valid", ""));
    }

    #[test]
    fn floor_division() {
        assert_eq!(floor_div(3, 2), 1);
        assert_eq!(floor_div(-3, 2), -2);
        assert_eq!(floor_div(-10, 2), -5);
        assert_eq!(floor_div(0, 2), 0);
    }
}
