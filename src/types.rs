use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ICON: &str = "media-playback-start";
pub const DEFAULT_TIMEOUT_MS: i32 = 5000;

/// Metadata for the track a player is currently on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Station name for radio/streaming sources
    pub station: String,
    /// Album art or station logo URL (not sent to the daemon yet)
    pub image_url: String,
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub duration: Option<Duration>,
}

impl TrackInfo {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            ..Self::default()
        }
    }

    /// A track with neither title nor artist means nothing is playing
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.artist.is_empty()
    }

    pub fn identity(&self) -> TrackIdentity {
        TrackIdentity {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
        }
    }
}

/// Key used to decide whether an update shows a different track.
///
/// Only title, artist and album take part; station, artwork and duration
/// changes alone never count as a new track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackIdentity {
    title: String,
    artist: String,
    album: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
}

/// Notification behaviour, fixed for the lifetime of a notifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Application name shown by the daemon ("Music Player" when empty)
    pub app_name: String,
    /// Freedesktop icon name or path
    pub icon: String,
    /// -1 = daemon default, 0 = never expire, >0 = milliseconds
    pub timeout: i32,
    pub notify_on_pause: bool,
    /// Replace the previous notification instead of stacking a new one
    pub replace_existing: bool,
}

impl Options {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            icon: DEFAULT_ICON.to_string(),
            timeout: DEFAULT_TIMEOUT_MS,
            notify_on_pause: false,
            replace_existing: true,
        }
    }
}

mod duration_ms {
    use serde::{ser, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => {
                let millis = u64::try_from(d.as_millis()).map_err(<S::Error as ser::Error>::custom)?;
                serializer.serialize_some(&millis)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_station_artwork_and_duration() {
        let a = TrackInfo::new("A", "B", "C");
        let b = TrackInfo {
            station: "Radio 1".into(),
            image_url: "https://example.org/art.png".into(),
            duration: Some(Duration::from_secs(200)),
            ..a.clone()
        };
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn identity_is_case_sensitive_and_field_aware() {
        assert_ne!(TrackInfo::new("a", "B", "C").identity(), TrackInfo::new("A", "B", "C").identity());
        // "A-B" + "C" must not collide with "A" + "B-C"
        assert_ne!(
            TrackInfo::new("A-B", "C", "").identity(),
            TrackInfo::new("A", "B-C", "").identity()
        );
    }

    #[test]
    fn empty_track_needs_both_title_and_artist_missing() {
        assert!(TrackInfo::default().is_empty());
        assert!(!TrackInfo::new("", "Artist", "").is_empty());
        assert!(!TrackInfo::new("Title", "", "").is_empty());
    }

    #[test]
    fn options_defaults() {
        let options = Options::new("Foo");
        assert_eq!(options.app_name, "Foo");
        assert_eq!(options.icon, DEFAULT_ICON);
        assert_eq!(options.timeout, 5000);
        assert!(!options.notify_on_pause);
        assert!(options.replace_existing);
    }

    #[test]
    fn options_deserialize_with_missing_fields() {
        let options: Options = serde_json::from_str(r#"{"app_name":"Foo","timeout":-1}"#).unwrap();
        assert_eq!(options.app_name, "Foo");
        assert_eq!(options.timeout, -1);
        assert!(options.replace_existing);
    }

    #[test]
    fn track_deserializes_duration_in_millis() {
        let track: TrackInfo =
            serde_json::from_str(r#"{"title":"A","artist":"B","duration_ms":1500}"#).unwrap();
        assert_eq!(track.duration, Some(Duration::from_millis(1500)));
        assert_eq!(track.album, "");
    }

    #[test]
    fn duration_serializes_as_millis_and_rejects_overflow() {
        let track = TrackInfo {
            duration: Some(Duration::from_millis(2500)),
            ..TrackInfo::default()
        };
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["duration_ms"], 2500);

        let huge = TrackInfo {
            duration: Some(Duration::MAX),
            ..TrackInfo::default()
        };
        assert!(serde_json::to_string(&huge).is_err());
    }

    #[test]
    fn playback_state_is_lowercase_on_the_wire() {
        let state: PlaybackState = serde_json::from_str(r#""paused""#).unwrap();
        assert_eq!(state, PlaybackState::Paused);
    }
}
