use std::collections::HashMap;

use regex::Regex;

pub const VIDEO_EXTENSIONS: [&str; 7] = ["mp4", "mov", "mkv", "avi", "flv", "webm", "3gp"];
pub const AUDIO_EXTENSIONS: [&str; 7] = ["mp3", "wav", "aiff", "flac", "m4a", "ogg", "mka"];

fn has_extension(filename: &str, extensions: &[&str]) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn is_video_file(filename: &str) -> bool {
    has_extension(filename, &VIDEO_EXTENSIONS)
}

pub fn is_audio_file(filename: &str) -> bool {
    has_extension(filename, &AUDIO_EXTENSIONS)
}

/// Make a title safe to use as a file name on every platform we care about.
///
/// Strips characters that are invalid on Windows/NTFS, trims leading and
/// trailing spaces and periods, and defuses reserved device names.
pub fn clean_file_name(title: &str) -> String {
    let invalid = Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).unwrap();
    let mut name = invalid.replace_all(title, "").to_string();
    name = name.trim_matches(|c| c == ' ' || c == '.').to_string();

    const RESERVED: [&str; 11] = [
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "LPT1", "LPT2", "LPT3",
    ];
    if RESERVED.contains(&name.to_ascii_uppercase().as_str()) {
        name = format!("_{name}");
    }
    name
}

/// Replace `%tag` placeholders with values from `tags`.
///
/// Unknown tags are passed through literally so a typo in a template shows up
/// in the output instead of silently vanishing.
pub fn format_string(template: &str, tags: &HashMap<&str, String>) -> String {
    let pattern = Regex::new(r"%\w+").unwrap();
    pattern
        .replace_all(template, |caps: &regex::Captures| {
            let key = &caps[0][1..];
            tags.get(key).cloned().unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
