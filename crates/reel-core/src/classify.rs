//! Content classification — a deterministic mapping from a saved URL (or
//! bare video identifier) to the rendering category the presentation layer
//! should use.
//!
//! This is a string-pattern decision, never a network probe.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A URL on a known video host, e.g. `https://youtu.be/dQw4w9WgXcQ`.
static VIDEO_HOST: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/.+$")
    .expect("video host pattern")
});

/// Captures the 11-character video identifier out of a watch or short URL.
static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?:youtube\.com/.*[?&]v=|youtu\.be/)([^"&?/\s]{11})"#)
    .expect("video id pattern")
});

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
const VIDEO_FILE_EXTENSIONS: [&str; 3] = ["mp4", "webm", "ogg"];

/// The rendering category for a library entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
  /// Hosted video (embedded player).
  Video,
  /// Direct image link.
  Image,
  /// Direct video file link (native `<video>` playback).
  VideoFile,
  /// Anything else; rendered as an outbound link.
  Webpage,
}

/// Classify a saved URL or identifier.
///
/// Video-host URLs and *any* exactly-11-character string are treated as
/// hosted video — video identifiers are 11 characters, and the bare-id
/// heuristic deliberately accepts coincidental 11-character strings too.
/// Otherwise the text after the final `'.'` is matched against known image
/// and video-file extensions; there is no URL parsing, so a query string
/// left attached defeats the extension match.
pub fn classify(url: &str) -> ContentKind {
  if VIDEO_HOST.is_match(url) || url.chars().count() == 11 {
    return ContentKind::Video;
  }

  let extension = url.rsplit('.').next().unwrap_or(url).to_ascii_lowercase();
  if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
    ContentKind::Image
  } else if VIDEO_FILE_EXTENSIONS.contains(&extension.as_str()) {
    ContentKind::VideoFile
  } else {
    ContentKind::Webpage
  }
}

/// Extract the 11-character video identifier from a saved value: the value
/// itself when it is a bare identifier, else the id embedded in a
/// `youtube.com/...?v=` or `youtu.be/` URL.
pub fn extract_video_id(url: &str) -> Option<&str> {
  if url.chars().count() == 11 {
    return Some(url);
  }
  VIDEO_ID.captures(url).and_then(|c| c.get(1)).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bare_11_char_id_is_video() {
    assert_eq!(classify("dQw4w9WgXcQ"), ContentKind::Video);
  }

  #[test]
  fn any_11_char_string_is_video() {
    // The heuristic is length-based, not alphabet-based.
    assert_eq!(classify("hello-world"), ContentKind::Video);
    assert_eq!(classify("abcdefg.png"), ContentKind::Video);
  }

  #[test]
  fn video_host_urls_are_video() {
    assert_eq!(
      classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
      ContentKind::Video
    );
    assert_eq!(classify("youtu.be/dQw4w9WgXcQ"), ContentKind::Video);
    assert_eq!(classify("http://youtube.com/anything"), ContentKind::Video);
  }

  #[test]
  fn image_extensions() {
    assert_eq!(classify("https://example.com/cat.png"), ContentKind::Image);
    assert_eq!(classify("https://example.com/cat.JPEG"), ContentKind::Image);
    assert_eq!(classify("https://example.com/a/b/c.gif"), ContentKind::Image);
  }

  #[test]
  fn video_file_extensions() {
    assert_eq!(
      classify("https://example.com/clip.mp4"),
      ContentKind::VideoFile
    );
    assert_eq!(
      classify("https://example.com/clip.webm"),
      ContentKind::VideoFile
    );
  }

  #[test]
  fn everything_else_is_webpage() {
    assert_eq!(classify("https://example.com/article"), ContentKind::Webpage);
    assert_eq!(classify("https://example.com/"), ContentKind::Webpage);
  }

  #[test]
  fn query_string_defeats_extension_match() {
    // No URL parsing: the final '.'-segment includes the query string.
    assert_eq!(
      classify("https://example.com/cat.png?size=large"),
      ContentKind::Webpage
    );
  }

  #[test]
  fn classification_is_deterministic() {
    for url in ["dQw4w9WgXcQ", "https://example.com/cat.png", "x"] {
      assert_eq!(classify(url), classify(url));
    }
  }

  #[test]
  fn extract_id_from_bare_value() {
    assert_eq!(extract_video_id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
  }

  #[test]
  fn extract_id_from_watch_url() {
    assert_eq!(
      extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
      Some("dQw4w9WgXcQ")
    );
    assert_eq!(
      extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
      Some("dQw4w9WgXcQ")
    );
  }

  #[test]
  fn extract_id_missing() {
    assert_eq!(extract_video_id("https://example.com/page"), None);
  }
}
