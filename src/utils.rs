use url::Url;

/// Collapse all whitespace runs in a string to single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive a filename for an image from the last segment of its URL path
///
/// Falls back to `image_<index>.jpg` when the path carries no usable
/// basename (root path, trailing slash). `index` is the image's 1-based
/// position in the record sequence.
pub fn filename_from_url(url: &Url, index: usize) -> String {
    let basename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    if basename.is_empty() {
        format!("image_{}.jpg", index)
    } else {
        basename.to_string()
    }
}
