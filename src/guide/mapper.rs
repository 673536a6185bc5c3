//! Mapping of raw feed records to programs
//!
//! Each record is mapped on its own: timing is rebuilt from the broadcast
//! date and the start/stop time of day in the listings timezone, and the
//! details block is tokenized once before credits, numbering and flags are
//! read from it.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GrabError, Result};
use crate::feed::{split_outside_delimiters, DetailsBlock, RawRecord};
use crate::guide::categories;
use crate::guide::channel_id::to_xmltv_id;
use crate::models::{
    Actor, AspectRatio, AudioMode, Category, Channel, Credits, EpisodeNum, Program, SubtitleKind, Video,
};

/// Base URL of the program thumbnails
const IMAGE_BASE_URL: &str = "http://guidetv-iphone.telerama.fr/verytv/procedures/images/";

/// Language of the feed's free text
const FEED_LANG: &str = "fr";

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// "3" or "3/10"
static EPISODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)(?:/([0-9]+))?$").unwrap());
static SEASON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
/// "Jean Dupont (Paul)"
static ROLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.*) \((.*)\)").unwrap());

/// Maps feed records to [`Program`] values in a fixed timezone
#[derive(Debug, Clone, Copy)]
pub struct ProgramMapper {
    tz: Tz,
}

impl ProgramMapper {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Channel declared by a record
    pub fn channel(record: &RawRecord) -> Channel {
        Channel {
            id: to_xmltv_id(&record.channel_id),
            display_name: record.channel_name.clone(),
        }
    }

    /// Map one record. Only unreadable dates or times are errors; every
    /// missing optional detail is simply left out.
    pub fn map(&self, record: &RawRecord) -> Result<Program> {
        let (start, stop) = self.broadcast_times(record)?;
        let details = DetailsBlock::parse(&record.details);

        Ok(Program {
            channel: Self::channel(record),
            icon: thumbnail_url(&record.channel_id, &start),
            start,
            stop,
            showview: details.value("Showview").map(str::to_string),
            title: record.title.clone(),
            sub_title: details.value("Sous-titre").map(str::to_string),
            description: non_empty(&record.synopsis),
            credits: credits(&details),
            year: details.value("Année").map(str::to_string),
            categories: categories_for(&record.category, details.value("Genre")),
            episode_num: episode_num(&details),
            video: video(&details),
            audio: audio(&details),
            previously_shown: details.has_line_prefix("Rediffusion"),
            premiere: details
                .first_line_prefix(&["Inédit", "Première diffusion"])
                .map(str::to_string),
            subtitles: subtitles(&details),
            rating: Some(record.rating.clone()).filter(|r| !r.is_empty() && r != "0"),
            star_rating: star_rating(&record.star_rating),
            review: non_empty(&record.review),
        })
    }

    /// Start and stop instants; a stop not after the start belongs to the
    /// next day.
    fn broadcast_times(&self, record: &RawRecord) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
        let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT)
            .map_err(|_| GrabError::InvalidTime(record.date.clone()))?;
        let start_time = parse_time(&record.start_time)?;
        let stop_time = parse_time(&record.stop_time)?;

        let start = self.localize(date.and_time(start_time))?;
        let mut stop = self.localize(date.and_time(stop_time))?;

        if stop <= start {
            let next_day = date
                .succ_opt()
                .ok_or_else(|| GrabError::InvalidTime(record.date.clone()))?;
            stop = self.localize(next_day.and_time(stop_time))?;
        }

        Ok((start, stop))
    }

    /// Resolve a wall-clock time in the listings timezone. Ambiguous times
    /// take the standard-time reading, times skipped by a DST jump move
    /// forward one hour.
    fn localize(&self, naive: NaiveDateTime) -> Result<DateTime<Tz>> {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt),
            LocalResult::Ambiguous(_, standard) => Ok(standard),
            LocalResult::None => self
                .tz
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
                .ok_or_else(|| GrabError::InvalidTime(naive.to_string())),
        }
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| GrabError::InvalidTime(value.to_string()))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn thumbnail_url(native_channel_id: &str, start: &DateTime<Tz>) -> String {
    format!(
        "{}{}_{}_{}.jpg",
        IMAGE_BASE_URL,
        start.format("%Y-%m-%d"),
        native_channel_id,
        start.format("%H:%M")
    )
}

/// Names listed after `label`, split on ", " outside parentheses
fn names(details: &DetailsBlock, label: &str) -> Vec<String> {
    details
        .value(label)
        .map(|v| split_outside_delimiters(v, ", ", "(", ")"))
        .unwrap_or_default()
}

fn credits(details: &DetailsBlock) -> Credits {
    Credits {
        directors: names(details, "Réalisateur"),
        actors: names(details, "Acteurs").into_iter().map(actor).collect(),
        composers: names(details, "Musique"),
        presenters: names(details, "Présentateur"),
        guests: names(details, "Invités"),
    }
}

fn actor(entry: String) -> Actor {
    match ROLE_RE.captures(&entry) {
        Some(caps) => Actor {
            name: caps[1].to_string(),
            role: Some(caps[2].to_string()),
        },
        None => Actor { name: entry, role: None },
    }
}

/// Standard label, native label, then the genre when it adds something
fn categories_for(native: &str, genre: Option<&str>) -> Vec<Category> {
    let mut out = Vec::new();

    if !native.is_empty() {
        let translated = categories::translate(native);
        if !translated.is_empty() {
            out.push(Category {
                name: translated.to_string(),
                lang: None,
            });
        }
        out.push(Category {
            name: native.to_string(),
            lang: Some(FEED_LANG),
        });
    }

    if let Some(genre) = genre.filter(|g| *g != native) {
        out.push(Category {
            name: genre.to_string(),
            lang: Some(FEED_LANG),
        });
    }

    out
}

fn episode_num(details: &DetailsBlock) -> Option<EpisodeNum> {
    let caps = EPISODE_RE.captures(details.value("Episode")?)?;
    let episode = zero_based(&caps[1]);
    let total_episodes = caps.get(2).map(|m| canonical(m.as_str()).to_string());

    let season = details
        .value("Saison")
        .filter(|s| SEASON_RE.is_match(s))
        .map(zero_based)
        .unwrap_or_else(|| "0".to_string());

    Some(EpisodeNum {
        season,
        episode,
        total_episodes,
    })
}

/// Digit string without leading zeros ("0" for zero)
fn canonical(digits: &str) -> &str {
    match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    }
}

/// One-based digit string to zero-based, saturating at "0"
fn zero_based(digits: &str) -> String {
    let digits = canonical(digits);
    if digits == "0" {
        return digits.to_string();
    }

    let mut bytes = digits.as_bytes().to_vec();
    for b in bytes.iter_mut().rev() {
        if *b == b'0' {
            *b = b'9';
        } else {
            *b -= 1;
            break;
        }
    }

    let out: String = bytes.into_iter().map(char::from).collect();
    canonical(&out).to_string()
}

fn video(details: &DetailsBlock) -> Video {
    let aspect = match details.first_line_prefix(&["En 16:9", "En 4:3"]) {
        Some("En 16:9") => Some(AspectRatio::Wide),
        Some(_) => Some(AspectRatio::Standard),
        None => None,
    };

    Video {
        aspect,
        hd: details.has_line("HD"),
    }
}

fn audio(details: &DetailsBlock) -> Option<AudioMode> {
    if details.has_line_prefix("En Dolby 5.1") {
        Some(AudioMode::Surround)
    } else if details.has_line_prefix("En Dolby") {
        Some(AudioMode::Dolby)
    } else if details.has_line_prefix("Stéréo") {
        Some(AudioMode::Stereo)
    } else {
        None
    }
}

fn subtitles(details: &DetailsBlock) -> Option<SubtitleKind> {
    if details.has_line_prefix("VOST") {
        Some(SubtitleKind::Onscreen)
    } else if details.has_line_prefix("Sous-titré") {
        Some(SubtitleKind::Teletext)
    } else {
        None
    }
}

fn star_rating(value: &str) -> Option<u8> {
    match value {
        "1" => Some(1),
        "2" => Some(2),
        "3" => Some(3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Paris;

    fn record(start: &str, stop: &str, date: &str, details: &str) -> RawRecord {
        RawRecord {
            channel_id: "192".into(),
            channel_name: "TF1".into(),
            title: "Le Film".into(),
            start_time: start.into(),
            stop_time: stop.into(),
            category: "Film".into(),
            details: details.into(),
            rating: "0".into(),
            star_rating: "0".into(),
            date: date.into(),
            ..Default::default()
        }
    }

    fn map(details: &str) -> Program {
        ProgramMapper::new(Paris)
            .map(&record("20:00:00", "21:30:00", "01/03/2024", details))
            .unwrap()
    }

    fn xmltv_time(dt: &DateTime<Tz>) -> String {
        dt.format("%Y%m%d%H%M%S %z").to_string()
    }

    #[test]
    fn test_same_day_times() {
        let program = map("");
        assert_eq!(xmltv_time(&program.start), "20240301200000 +0100");
        assert_eq!(xmltv_time(&program.stop), "20240301213000 +0100");
        assert!(program.stop > program.start);
    }

    #[test]
    fn test_stop_after_midnight_rolls_over() {
        let program = ProgramMapper::new(Paris)
            .map(&record("23:30:00", "00:45:00", "01/03/2024", ""))
            .unwrap();
        assert_eq!(xmltv_time(&program.start), "20240301233000 +0100");
        assert_eq!(xmltv_time(&program.stop), "20240302004500 +0100");
        assert!(program.stop > program.start);
    }

    #[test]
    fn test_equal_times_roll_over() {
        let program = ProgramMapper::new(Paris)
            .map(&record("06:00:00", "06:00:00", "01/03/2024", ""))
            .unwrap();
        assert_eq!(xmltv_time(&program.stop), "20240302060000 +0100");
    }

    #[test]
    fn test_summer_offset() {
        let program = ProgramMapper::new(Paris)
            .map(&record("20:00:00", "21:00:00", "15/07/2024", ""))
            .unwrap();
        assert_eq!(xmltv_time(&program.start), "20240715200000 +0200");
    }

    #[test]
    fn test_rollover_across_dst_change() {
        // Night of 30 to 31 March 2024: clocks go forward at 02:00
        let program = ProgramMapper::new(Paris)
            .map(&record("23:00:00", "04:00:00", "30/03/2024", ""))
            .unwrap();
        assert_eq!(xmltv_time(&program.start), "20240330230000 +0100");
        assert_eq!(xmltv_time(&program.stop), "20240331040000 +0200");
    }

    #[test]
    fn test_ambiguous_time_takes_standard_offset() {
        // 27 October 2024, 02:30 happens twice
        let program = ProgramMapper::new(Paris)
            .map(&record("02:30:00", "03:30:00", "27/10/2024", ""))
            .unwrap();
        assert_eq!(xmltv_time(&program.start), "20241027023000 +0100");
    }

    #[test]
    fn test_skipped_time_moves_forward() {
        let program = ProgramMapper::new(Paris)
            .map(&record("02:30:00", "04:00:00", "31/03/2024", ""))
            .unwrap();
        assert_eq!(xmltv_time(&program.start), "20240331033000 +0200");
    }

    #[test]
    fn test_invalid_date_is_an_error() {
        let result = ProgramMapper::new(Paris).map(&record("20:00:00", "21:00:00", "2024-03-01", ""));
        assert!(matches!(result, Err(GrabError::InvalidTime(_))));
    }

    #[test]
    fn test_actors_with_roles() {
        let program = map("Acteurs : Jean Dupont (Paul), Marie Curie");
        assert_eq!(
            program.credits.actors,
            vec![
                Actor { name: "Jean Dupont".into(), role: Some("Paul".into()) },
                Actor { name: "Marie Curie".into(), role: None },
            ]
        );
    }

    #[test]
    fn test_role_with_comma_is_not_split() {
        let program = map("Acteurs : Jean Gabin (Maréchal, officier), Dita Parlo (Elsa)");
        assert_eq!(program.credits.actors.len(), 2);
        assert_eq!(program.credits.actors[0].role.as_deref(), Some("Maréchal, officier"));
        assert_eq!(program.credits.actors[1].name, "Dita Parlo");
    }

    #[test]
    fn test_other_credits() {
        let program = map(
            "Réalisateur : Jean Renoir\nMusique : Joseph Kosma\nPrésentateur : Anne Sinclair, Paul Amar\nInvités : Serge Gainsbourg",
        );
        assert_eq!(program.credits.directors, vec!["Jean Renoir"]);
        assert_eq!(program.credits.composers, vec!["Joseph Kosma"]);
        assert_eq!(program.credits.presenters, vec!["Anne Sinclair", "Paul Amar"]);
        assert_eq!(program.credits.guests, vec!["Serge Gainsbourg"]);
        assert!(program.credits.actors.is_empty());
    }

    #[test]
    fn test_no_credits() {
        assert!(map("Année : 1937").credits.is_empty());
    }

    #[test]
    fn test_episode_with_season_and_total() {
        let program = map("Episode : 3/10\nSaison : 2");
        assert_eq!(program.episode_num.unwrap().xmltv_ns(), "1.2/10.0/1");
    }

    #[test]
    fn test_episode_without_season() {
        let program = map("Episode : 5");
        assert_eq!(program.episode_num.unwrap().xmltv_ns(), "0.4.0/1");
    }

    #[test]
    fn test_malformed_episode_is_ignored() {
        assert!(map("Episode : trois").episode_num.is_none());
        assert!(map("Saison : 2").episode_num.is_none());
    }

    #[test]
    fn test_large_episode_numbers_are_kept() {
        let program = map("Episode : 4294967297/10000000000000000000001\nSaison : 99999999999");
        assert_eq!(
            program.episode_num.unwrap().xmltv_ns(),
            "99999999998.4294967296/10000000000000000000001.0/1"
        );
    }

    #[test]
    fn test_zero_based_numbering() {
        assert_eq!(zero_based("1"), "0");
        assert_eq!(zero_based("0"), "0");
        assert_eq!(zero_based("10"), "9");
        assert_eq!(zero_based("1000"), "999");
        assert_eq!(zero_based("007"), "6");
        assert_eq!(canonical("0012"), "12");
    }

    #[test]
    fn test_genre_kept_without_native_category() {
        let mut raw = record("20:00:00", "21:30:00", "01/03/2024", "Genre : Comédie");
        raw.category = String::new();
        let program = ProgramMapper::new(Paris).map(&raw).unwrap();
        assert_eq!(
            program.categories,
            vec![Category { name: "Comédie".into(), lang: Some("fr") }]
        );
    }

    #[test]
    fn test_categories_with_distinct_genre() {
        let program = map("Genre : Comédie dramatique");
        assert_eq!(
            program.categories,
            vec![
                Category { name: "Movie / Drama".into(), lang: None },
                Category { name: "Film".into(), lang: Some("fr") },
                Category { name: "Comédie dramatique".into(), lang: Some("fr") },
            ]
        );
    }

    #[test]
    fn test_genre_equal_to_category_is_not_repeated() {
        let program = map("Genre : Film");
        assert_eq!(program.categories.len(), 2);
    }

    #[test]
    fn test_video_and_audio_flags() {
        let program = map("En 16:9\nHD\nEn Dolby 5.1");
        assert_eq!(program.video, Video { aspect: Some(AspectRatio::Wide), hd: true });
        assert_eq!(program.audio, Some(AudioMode::Surround));

        let program = map("En 4:3\nEn Dolby\nStéréo");
        assert_eq!(program.video.aspect, Some(AspectRatio::Standard));
        assert_eq!(program.audio, Some(AudioMode::Dolby));

        assert_eq!(map("Stéréo").audio, Some(AudioMode::Stereo));
    }

    #[test]
    fn test_missing_aspect_is_omitted() {
        let program = map("Stéréo");
        assert!(program.video.is_empty());
    }

    #[test]
    fn test_rerun_premiere_and_subtitles() {
        let program = map("Rediffusion\nInédit\nVOST");
        assert!(program.previously_shown);
        assert_eq!(program.premiere.as_deref(), Some("Inédit"));
        assert_eq!(program.subtitles, Some(SubtitleKind::Onscreen));

        let program = map("Première diffusion\nSous-titré");
        assert!(!program.previously_shown);
        assert_eq!(program.premiere.as_deref(), Some("Première diffusion"));
        assert_eq!(program.subtitles, Some(SubtitleKind::Teletext));
    }

    #[test]
    fn test_sub_title_is_not_subtitles_flag() {
        let program = map("Sous-titre : La revanche");
        assert_eq!(program.sub_title.as_deref(), Some("La revanche"));
        assert_eq!(program.subtitles, None);
    }

    #[test]
    fn test_ratings() {
        let mut raw = record("20:00:00", "21:30:00", "01/03/2024", "");
        raw.rating = "12".into();
        raw.star_rating = "3".into();
        let program = ProgramMapper::new(Paris).map(&raw).unwrap();
        assert_eq!(program.rating.as_deref(), Some("12"));
        assert_eq!(program.star_rating, Some(3));

        raw.rating = "0".into();
        raw.star_rating = "4".into();
        let program = ProgramMapper::new(Paris).map(&raw).unwrap();
        assert_eq!(program.rating, None);
        assert_eq!(program.star_rating, None);

        raw.rating = String::new();
        let program = ProgramMapper::new(Paris).map(&raw).unwrap();
        assert_eq!(program.rating, None);
    }

    #[test]
    fn test_thumbnail_and_showview() {
        let program = map("Showview : 123456");
        assert_eq!(
            program.icon,
            "http://guidetv-iphone.telerama.fr/verytv/procedures/images/2024-03-01_192_20:00.jpg"
        );
        assert_eq!(program.showview.as_deref(), Some("123456"));
    }
}
