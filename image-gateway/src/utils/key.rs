use uuid::Uuid;

/// Literal last segment of every uploaded object's key.
pub const ORIGINAL_SUFFIX: &str = "original";

/// Returns everything after the last occurrence of `prefix` in `path`.
///
/// `None` when the prefix does not occur or nothing follows it.
pub fn resolve_path_key<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.rsplit_once(prefix)
        .map(|(_, key)| key)
        .filter(|key| !key.is_empty())
}

/// Builds `<prefix>/<uuid>/original` for a freshly uploaded object.
pub fn upload_key(prefix: &str) -> String {
    format!("{prefix}/{}/{ORIGINAL_SUFFIX}", unique_token())
}

/// 128-bit random identifier in hyphenated hex form.
pub fn unique_token() -> String {
    Uuid::new_v4().to_string()
}
