use url::Url;

/// Path extensions that mark a target as a non-HTML resource
const BINARY_EXTENSIONS: &[&str] = &[
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf", "epub",
    // archives and installers
    "zip", "gz", "tgz", "bz2", "xz", "tar", "rar", "7z", "exe", "msi", "dmg", "pkg", "deb",
    "rpm", "apk", "iso", "bin", "jar",
    // images
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "ico", "tif", "tiff", "avif",
    // audio and video
    "mp3", "wav", "ogg", "flac", "aac", "m4a", "mp4", "m4v", "mov", "avi", "mkv", "webm",
    "wmv",
    // fonts
    "woff", "woff2", "ttf", "otf", "eot",
];

/// Returns true if the URL's last path segment has a binary file extension
///
/// Such targets are probed with HEAD for liveness only; their bodies are
/// never downloaded, rendered or parsed.
///
/// # Examples
///
/// ```
/// use dead_link_hunter::url::is_binary_file_url;
///
/// assert!(is_binary_file_url("https://example.com/files/report.PDF"));
/// assert!(!is_binary_file_url("https://example.com/report"));
/// ```
pub fn is_binary_file_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let last_segment = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");

    match last_segment.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => {
            let extension = extension.to_ascii_lowercase();
            BINARY_EXTENSIONS.contains(&extension.as_str())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_extensions() {
        assert!(is_binary_file_url("https://example.com/a.pdf"));
        assert!(is_binary_file_url("https://example.com/dl/archive.tar.gz"));
        assert!(is_binary_file_url("https://example.com/img/logo.PNG"));
        assert!(is_binary_file_url("https://example.com/video.mp4?t=10"));
    }

    #[test]
    fn test_html_like_paths() {
        assert!(!is_binary_file_url("https://example.com/"));
        assert!(!is_binary_file_url("https://example.com/about"));
        assert!(!is_binary_file_url("https://example.com/index.html"));
        assert!(!is_binary_file_url("https://example.com/page.php"));
    }

    #[test]
    fn test_extension_only_in_directory_or_query() {
        assert!(!is_binary_file_url("https://example.com/files.pdf/view"));
        assert!(!is_binary_file_url("https://example.com/view?file=a.pdf"));
    }

    #[test]
    fn test_dotfile_is_not_binary() {
        assert!(!is_binary_file_url("https://example.com/.zip"));
    }

    #[test]
    fn test_unparseable_is_not_binary() {
        assert!(!is_binary_file_url("not a url"));
    }
}
