//! YouTube link normalization

const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";

/// Convert a YouTube watch/short/embed link into an embeddable URL
///
/// Embed links are returned unchanged; an empty link stays empty. Links that
/// are not recognized produce the bare embed prefix.
pub fn youtube_embed_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    if url.contains("youtube.com/embed/") {
        return url.to_string();
    }

    let video_id = if url.contains("youtube.com/watch?v=") {
        after(url, "v=")
    } else if url.contains("youtu.be/") {
        after(url, "youtu.be/")
    } else {
        ""
    };

    // Drop extra parameters
    let video_id = video_id
        .split(|c| c == '&' || c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    format!("{}{}", EMBED_PREFIX, video_id)
}

fn after<'a>(value: &'a str, marker: &str) -> &'a str {
    value
        .split_once(marker)
        .map(|(_, rest)| rest)
        .unwrap_or_default()
}
