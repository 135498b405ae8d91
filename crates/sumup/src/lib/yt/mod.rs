pub mod transcript;

use std::{
    fmt::{Debug, Display},
    future::Future,
    sync::LazyLock,
};

use regex::Regex;

use crate::types::{TranscriptFragment, VideoId};

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"=(\w+)\n?\z").unwrap());

/// Extracts the video id from the trailing `=<id>` segment of a url
/// (e.g. `https://www.youtube.com/watch?v=<id>`).
///
/// Returns `None` when the url does not end in `=` followed by word characters
/// (a single trailing newline is tolerated).
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|cap| cap.get(1))
        .map(|m| VideoId::new(m.as_str()))
}

pub trait TranscriptSource {
    type Error: Debug + Display;

    fn fetch_transcript(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = Result<Vec<TranscriptFragment>, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some(VideoId::new("dQw4w9WgXcQ"))
        );
        assert_eq!(
            extract_video_id("https://youtu.be/watch?v=abc123"),
            Some(VideoId::new("abc123"))
        );
    }

    #[test]
    fn test_takes_last_query_value() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL1&v=abc_123"),
            Some(VideoId::new("abc_123"))
        );
    }

    #[test]
    fn test_single_trailing_newline() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123\n"),
            Some(VideoId::new("abc123"))
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123\n\n"),
            None
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123\nmore"),
            None
        );
    }

    #[test]
    fn test_no_trailing_id() {
        for url in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=",
            "https://www.youtube.com/watch?v=dQw4-w9WgXcQ",
            "",
        ] {
            assert_eq!(extract_video_id(url), None, "url {url:?} should not match");
        }
    }

    #[test]
    fn test_any_string_with_trailing_id() {
        assert_eq!(extract_video_id("not a url=xyz"), Some(VideoId::new("xyz")));
    }
}
