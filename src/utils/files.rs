// html escaping and content type helpers

use std::path::Path;

/// escape html special characters
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// get mime type for a file based on its extension
pub fn get_mime_type(file_path: &Path) -> String {
    mime_guess::from_path(file_path)
        .first_or_octet_stream()
        .to_string()
}

/// lowercase extension of a file name, without the dot
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// dotfiles (including `._name` resource forks) are never exposed
pub fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.')
}
