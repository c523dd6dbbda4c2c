use std::path::{Path, PathBuf};

// --- Helper: Resolve a slide's video reference against the deck location ---
// References are never checked for existence; ffmpeg reports what it cannot open.
pub fn resolve_video_source(base_dir: &Path, reference: &str) -> String {
    if is_url(reference) {
        return reference.to_string();
    }
    let path = Path::new(reference);
    if path.is_absolute() {
        return reference.to_string();
    }
    let relative = path.strip_prefix(".").unwrap_or(path);
    base_dir.join(relative).to_string_lossy().into_owned()
}

fn is_url(reference: &str) -> bool {
    match reference.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        }
        None => false,
    }
}

/// Directory the video references of a deck are relative to.
pub fn default_base_dir(deck_path: Option<&Path>) -> PathBuf {
    deck_path
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_base_dir() {
        let base = Path::new("/srv/talk");
        assert_eq!(resolve_video_source(base, "./video1.mp4"), "/srv/talk/video1.mp4");
        assert_eq!(resolve_video_source(base, "clips/a.webm"), "/srv/talk/clips/a.webm");
    }

    #[test]
    fn absolute_paths_and_urls_pass_through() {
        let base = Path::new("/srv/talk");
        assert_eq!(resolve_video_source(base, "/media/b.mp4"), "/media/b.mp4");
        assert_eq!(
            resolve_video_source(base, "https://cdn.example.com/v.mp4"),
            "https://cdn.example.com/v.mp4"
        );
        assert_eq!(resolve_video_source(base, "rtsp://cam.local/s"), "rtsp://cam.local/s");
    }

    #[test]
    fn odd_references_are_treated_as_paths() {
        let base = Path::new("/srv");
        assert_eq!(resolve_video_source(base, "a b://c.mp4"), "/srv/a b://c.mp4");
    }

    #[test]
    fn base_dir_defaults() {
        assert_eq!(default_base_dir(None), PathBuf::from("."));
        assert_eq!(default_base_dir(Some(Path::new("deck.toml"))), PathBuf::from("."));
        assert_eq!(
            default_base_dir(Some(Path::new("/talks/deck.toml"))),
            PathBuf::from("/talks")
        );
    }
}
