//! Filename and display-string derivation.
//!
//! Everything in this module is pure: given the same track and release
//! metadata it always produces the same strings. The scene naming rules
//! (underscores for spaces, lower-cased MP3 filenames, human-readable
//! FLAC filenames) live here and nowhere else.

use chrono::NaiveDate;

/// Joiner used when canonicalizing free-text strings for filenames.
const SCENE_JOINER: char = '_';

/// Canonicalize a free-text string into a filename-safe token.
///
/// Spaces become underscores; `lower_case` additionally lower-cases the
/// result. No other characters are touched.
pub fn scenify(input: &str, lower_case: bool) -> String {
    let output = input.replace(' ', &SCENE_JOINER.to_string());
    if lower_case {
        output.to_lowercase()
    } else {
        output
    }
}

/// Zero-padded two-digit track number, e.g. `7` → `"07"`.
pub fn track_number_str(number: u32) -> String {
    format!("{:02}", number)
}

/// MP3 filename for one track: `{NN}-{artist}-{title}-{group}.mp3`,
/// scenified and lower-cased.
pub fn mp3_filename(number: u32, artist: &str, title: &str, group_initials: &str) -> String {
    let raw = format!(
        "{}-{}-{}-{}.mp3",
        track_number_str(number),
        artist,
        title,
        group_initials
    );
    scenify(&raw, true)
}

/// FLAC filename for one track: `{NN} - {artist} - {title}.flac`.
///
/// Deliberately not scenified; the FLAC tree is the human-readable one.
pub fn flac_filename(number: u32, artist: &str, title: &str) -> String {
    format!(
        "{} - {} - {}.flac",
        track_number_str(number),
        artist,
        title
    )
}

/// Base release identifier seeding every release-level artifact filename.
///
/// Scenified but not lower-cased; the `00-` artifact names lower-case it
/// themselves (see [`zero_filename`]).
pub fn base_release_name(artist: &str, title: &str, year: u16, group_initials: &str) -> String {
    scenify(
        &format!("{}-{}-{}-{}", artist, title, year, group_initials),
        false,
    )
}

/// Filename of a release-level ("track 00") artifact:
/// `00-{base.lowercase}.{ext}`.
pub fn zero_filename(base_name: &str, extension: &str) -> String {
    format!("00-{}.{}", base_name.to_lowercase(), extension)
}

/// Directory name of the FLAC release tree: `{artist} - {title} ({year})`.
pub fn flac_dir_name(artist: &str, title: &str, year: u16) -> String {
    format!("{} - {} ({})", artist, title, year)
}

/// Format a duration in whole seconds as `MM:SS`.
pub fn duration_str(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Format a date as `YYYY-MM-DD`.
pub fn date_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
