//! Data models for the Télérama grabber

use chrono::DateTime;
use chrono_tz::Tz;

/// Channel declaration (one `<channel>` element)
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Namespaced identifier, e.g. "192.tv.telerama.fr"
    pub id: String,
    pub display_name: String,
}

/// Actor credit with an optional role annotation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Actor {
    pub name: String,
    pub role: Option<String>,
}

/// Program credits, each list kept in feed order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Credits {
    pub directors: Vec<String>,
    pub actors: Vec<Actor>,
    pub composers: Vec<String>,
    pub presenters: Vec<String>,
    pub guests: Vec<String>,
}

impl Credits {
    pub fn is_empty(&self) -> bool {
        self.directors.is_empty()
            && self.actors.is_empty()
            && self.composers.is_empty()
            && self.presenters.is_empty()
            && self.guests.is_empty()
    }
}

/// Category with an optional language tag
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub lang: Option<&'static str>,
}

/// Zero-based season/episode numbering (xmltv_ns)
///
/// Numbers are kept as decimal digit strings, the feed does not bound them.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeNum {
    pub season: String,
    pub episode: String,
    pub total_episodes: Option<String>,
}

impl EpisodeNum {
    /// Render as "season.episode[/total].part", single part convention
    pub fn xmltv_ns(&self) -> String {
        let mut out = format!("{}.{}", self.season, self.episode);
        if let Some(total) = &self.total_episodes {
            out.push('/');
            out.push_str(total);
        }
        out.push_str(".0/1");
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AspectRatio {
    Wide,
    Standard,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Wide => "16:9",
            AspectRatio::Standard => "4:3",
        }
    }
}

/// Video properties
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Video {
    pub aspect: Option<AspectRatio>,
    pub hd: bool,
}

impl Video {
    pub fn is_empty(&self) -> bool {
        self.aspect.is_none() && !self.hd
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioMode {
    Stereo,
    Dolby,
    Surround,
}

impl AudioMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioMode::Stereo => "stereo",
            AudioMode::Dolby => "dolby",
            AudioMode::Surround => "surround",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubtitleKind {
    Onscreen,
    Teletext,
}

impl SubtitleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubtitleKind::Onscreen => "onscreen",
            SubtitleKind::Teletext => "teletext",
        }
    }
}

/// A single broadcast, ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub channel: Channel,
    pub start: DateTime<Tz>,
    /// Always after `start`
    pub stop: DateTime<Tz>,
    pub showview: Option<String>,
    pub title: String,
    pub sub_title: Option<String>,
    pub description: Option<String>,
    pub credits: Credits,
    /// Production year, verbatim from the feed
    pub year: Option<String>,
    pub categories: Vec<Category>,
    pub icon: String,
    pub episode_num: Option<EpisodeNum>,
    pub video: Video,
    pub audio: Option<AudioMode>,
    pub previously_shown: bool,
    /// "Inédit" or "Première diffusion"
    pub premiere: Option<String>,
    pub subtitles: Option<SubtitleKind>,
    pub rating: Option<String>,
    /// Stars out of 3
    pub star_rating: Option<u8>,
    pub review: Option<String>,
}
