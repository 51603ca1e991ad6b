/// Collapse every run of `-`, `_` and `.` into a single `-` and lower-case the
/// rest, producing the key under which distributions are grouped.
///
/// # Examples
///
/// ```
/// use wheelhouse_metadata::normalize;
///
/// assert_eq!(normalize("Foo__Bar.baz"), "foo-bar-baz");
/// assert_eq!(normalize("zope.interface"), "zope-interface");
/// ```
pub fn normalize(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator_run = false;
    for ch in name.chars() {
        match ch {
            '-' | '_' | '.' => {
                if !in_separator_run {
                    normalized.push('-');
                }
                in_separator_run = true;
            },
            _ => {
                normalized.extend(ch.to_lowercase());
                in_separator_run = false;
            },
        }
    }
    normalized
}
