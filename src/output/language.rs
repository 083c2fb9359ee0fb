//! Fence labels for the markdown snapshot.

/// Maps a lowercase extension to the label placed after the opening fence.
/// Unknown or missing extensions are labelled `text`.
///
/// # Examples
/// ```
/// use dirscribe::output::language::fence_language;
///
/// assert_eq!(fence_language(Some("py")), "python");
/// assert_eq!(fence_language(Some("yml")), "yaml");
/// assert_eq!(fence_language(Some("rs")), "text");
/// assert_eq!(fence_language(None), "text");
/// ```
pub fn fence_language(extension: Option<&str>) -> &'static str {
    match extension.unwrap_or_default() {
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "md" => "markdown",
        "yml" | "yaml" => "yaml",
        "xml" => "xml",
        "sh" => "bash",
        "sql" => "sql",
        "php" => "php",
        "rb" => "ruby",
        "go" => "go",
        "java" => "java",
        "cpp" => "cpp",
        "c" => "c",
        _ => "text",
    }
}
