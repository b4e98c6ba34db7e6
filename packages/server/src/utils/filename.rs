use std::path::Path;

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Splits an uploaded filename into `(base name, extension)`.
///
/// Directory components sent by some clients are dropped. A name without a dot
/// (or with only a leading dot) has an empty extension.
pub fn split_file_name(name: &str) -> (&str, &str) {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match file_name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base, ext),
        _ => (file_name, ""),
    }
}

/// Builds the on-disk name `{email}_{field}_{base}_{millis}.{ext}`.
pub fn stored_file_name(email: &str, field_name: &str, original_name: &str, millis: i64) -> String {
    let (base, ext) = split_file_name(original_name);
    format!(
        "{}_{}_{}_{}.{}",
        sanitize_component(email),
        field_name,
        sanitize_component(base),
        millis,
        ext
    )
}

/// Turns an absolute file location into a path relative to the store `root`,
/// joined with `/`.
///
/// A location outside `root` is returned as-is.
pub fn normalize_stored_path(absolute: &Path, root: &Path) -> String {
    match absolute.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => absolute.to_string_lossy().into_owned(),
    }
}

/// Checks if a path string contains path traversal patterns.
pub fn contains_path_traversal(path: &str) -> bool {
    path == ".."
        || path.starts_with("../")
        || path.contains("/../")
        || path.ends_with("/..")
        || path.starts_with("..\\")
        || path.contains("\\..\\")
        || path.ends_with("\\..")
}

/// Validates a store-relative path taken from a request.
pub fn validate_stored_path(path: &str) -> Result<String, &'static str> {
    let trimmed = path.trim();

    if trimmed.is_empty() {
        return Err("Path cannot be empty");
    }

    if trimmed.len() > 512 {
        return Err("Path exceeds maximum length of 512 characters");
    }

    if trimmed.contains('\0') {
        return Err("Path must not contain null bytes");
    }

    if trimmed.contains('\\') {
        return Err("Path must not contain backslashes");
    }

    if trimmed.starts_with('/') {
        return Err("Path must not start with '/'");
    }

    if contains_path_traversal(trimmed) {
        return Err("Path must not contain '..' traversal");
    }

    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err("Path must not contain empty segments");
        }
        if segment.starts_with('.') {
            return Err("Path segments must not start with '.'");
        }
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
    {
        return Err("Path contains invalid characters (allowed: a-zA-Z0-9, /, -, _, .)");
    }

    Ok(trimmed.to_string())
}
