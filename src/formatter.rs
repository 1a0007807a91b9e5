use std::collections::HashMap;

use crate::types::{Options, PlaybackState, TrackInfo, DEFAULT_ICON};

pub const DEFAULT_APP_NAME: &str = "Music Player";
pub const NOW_PLAYING: &str = "Now Playing";
pub const PAUSE_PREFIX: &str = "\u{23F8} ";

/// Arguments of a `Notify` call, minus the replace id
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub app_name: String,
    pub icon: String,
    pub summary: String,
    pub body: String,
    pub actions: Vec<String>,
    pub hints: HashMap<String, String>,
    pub timeout: i32,
}

/// Build the notification shown for `track` in `state`
pub fn format(track: &TrackInfo, state: PlaybackState, options: &Options) -> Notification {
    let summary = or_default(&track.title, NOW_PLAYING);

    let mut body = if !track.artist.is_empty() && !track.album.is_empty() {
        format!("{}\n{}", track.artist, track.album)
    } else if !track.artist.is_empty() {
        track.artist.clone()
    } else if !track.station.is_empty() {
        track.station.clone()
    } else {
        NOW_PLAYING.to_string()
    };

    if state == PlaybackState::Paused {
        body.insert_str(0, PAUSE_PREFIX);
    }

    Notification {
        app_name: or_default(&options.app_name, DEFAULT_APP_NAME),
        icon: or_default(&options.icon, DEFAULT_ICON),
        summary,
        body,
        actions: Vec::new(),
        hints: HashMap::new(),
        timeout: options.timeout,
    }
}

fn or_default(value: &str, default: &str) -> String {
    let value = if value.is_empty() { default } else { value };
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_track_while_playing() {
        let n = format(&TrackInfo::new("A", "B", "C"), PlaybackState::Playing, &Options::new("Foo"));
        assert_eq!(
            n,
            Notification {
                app_name: "Foo".into(),
                icon: "media-playback-start".into(),
                summary: "A".into(),
                body: "B\nC".into(),
                actions: vec![],
                hints: HashMap::new(),
                timeout: 5000,
            }
        );
    }

    #[test]
    fn body_falls_back_from_artist_to_station_to_placeholder() {
        let options = Options::default();

        let artist_only = TrackInfo::new("T", "Artist", "");
        assert_eq!(format(&artist_only, PlaybackState::Playing, &options).body, "Artist");

        let album_without_artist = TrackInfo {
            station: "KEXP".into(),
            ..TrackInfo::new("T", "", "Album")
        };
        assert_eq!(format(&album_without_artist, PlaybackState::Playing, &options).body, "KEXP");

        let bare = TrackInfo::new("T", "", "");
        assert_eq!(format(&bare, PlaybackState::Playing, &options).body, "Now Playing");
    }

    #[test]
    fn missing_title_uses_placeholder_summary() {
        let n = format(&TrackInfo::new("", "B", ""), PlaybackState::Playing, &Options::default());
        assert_eq!(n.summary, "Now Playing");
    }

    #[test]
    fn paused_body_gets_pause_glyph() {
        let n = format(&TrackInfo::new("A", "B", "C"), PlaybackState::Paused, &Options::default());
        assert_eq!(n.body, "\u{23F8} B\nC");

        let stopped = format(&TrackInfo::new("A", "B", ""), PlaybackState::Stopped, &Options::default());
        assert_eq!(stopped.body, "B");
    }

    #[test]
    fn empty_options_fall_back_to_defaults() {
        let options = Options {
            app_name: String::new(),
            icon: String::new(),
            timeout: -1,
            ..Options::default()
        };
        let n = format(&TrackInfo::new("A", "B", "C"), PlaybackState::Playing, &options);
        assert_eq!(n.app_name, "Music Player");
        assert_eq!(n.icon, "media-playback-start");
        assert_eq!(n.timeout, -1);
    }
}
