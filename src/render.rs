use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};
use crate::ffmpeg::Acceleration;

const SUBTITLE_STYLE: &str =
    "Fontsize=30,Alignment=10,Fontname=Roboto Black,Outline=2,Shadow=4";

/// Everything one final-assembly invocation needs. Built once per video and
/// discarded after the compiled command is dispatched.
#[derive(Debug, Clone)]
pub struct RenderSpec {
    pub speech_path: String,
    pub subtitle_path: String,
    /// Background clips in play order, sized upstream to cover the duration.
    pub clip_paths: Vec<String>,
    pub music_path: Option<String>,
    pub title: String,
    pub duration_secs: i64,
}

/// How many background clips are needed to cover `duration_secs`. Each clip
/// contributes its full length minus the overlap consumed by the crossfade
/// into the next one.
pub fn required_clip_count(duration_secs: i64, clip_length: u32, xfade_length: u32) -> usize {
    let step = i64::from(clip_length - xfade_length);
    let count = (duration_secs + step - 1) / step;
    count.max(1) as usize
}

pub fn output_path(out_dir: &Path, title: &str) -> PathBuf {
    out_dir.join(format!("{title}.mp4"))
}

/// Compile a [`RenderSpec`] into a complete ffmpeg argument list.
///
/// Stream order: 0 is speech, 1 is music when present, background clips
/// follow. For a single clip the video feeds the subtitle burn-in directly;
/// for two or more the clips are chained pairwise with fade transitions,
/// where transition `i` (0-indexed) lands at offset
/// `(clip_length - xfade_length) * (i + 1)` on the composed timeline.
/// Speech and music are mixed weighted toward speech and truncated to the
/// shorter stream; the whole output is trimmed to the spoken duration.
pub fn compile(
    spec: &RenderSpec,
    clip_length: u32,
    xfade_length: u32,
    accel: Acceleration,
    video_bitrate: &str,
    out_dir: &Path,
) -> PipelineResult<Vec<String>> {
    let num_clips = spec.clip_paths.len();
    if num_clips == 0 {
        return Err(PipelineError::EmptyPool);
    }

    let mut args: Vec<String> = Vec::new();
    args.push("-i".into());
    args.push(spec.speech_path.clone());
    if let Some(music) = &spec.music_path {
        args.push("-i".into());
        args.push(music.clone());
    }
    for clip in &spec.clip_paths {
        args.push("-i".into());
        args.push(clip.clone());
    }

    // index of the first background clip stream
    let base = if spec.music_path.is_some() { 2 } else { 1 };

    let mut filter = String::new();
    let composed = if num_clips == 1 {
        format!("[{base}:v]")
    } else {
        let offset_step = i64::from(clip_length - xfade_length);
        let mut prev = format!("[{base}:v]");
        for i in 0..num_clips - 1 {
            let next = format!("[{}:v]", base + i + 1);
            let out = if i + 2 == num_clips {
                "[vfin]".to_string()
            } else {
                format!("[v{}]", base + i)
            };
            filter.push_str(&format!(
                "{prev}{next}xfade=transition=fade:duration={xfade_length}:offset={offset}{out};",
                offset = offset_step * (i as i64 + 1),
            ));
            prev = out;
        }
        "[vfin]".to_string()
    };

    filter.push_str(&format!(
        "{composed}subtitles={}:force_style='{SUBTITLE_STYLE}'[vout]",
        spec.subtitle_path
    ));

    let audio_out = if spec.music_path.is_some() {
        filter.push_str(";[0:a][1:a]amix=inputs=2:duration=shortest:weights=5 1[aout]");
        "[aout]"
    } else {
        "[0:a]"
    };

    args.push("-filter_complex".into());
    args.push(filter);
    for arg in ["-map", "[vout]", "-map", audio_out] {
        args.push(arg.to_string());
    }
    args.push("-t".into());
    args.push(spec.duration_secs.to_string());
    for arg in [
        "-c:v",
        accel.encode_codec(),
        "-b:v",
        video_bitrate,
        "-c:a",
        "aac",
        "-f",
        "mp4",
        "-y",
    ] {
        args.push(arg.to_string());
    }
    args.push(output_path(out_dir, &spec.title).to_string_lossy().into_owned());

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(clips: usize, music: bool) -> RenderSpec {
        RenderSpec {
            speech_path: "work/speech.wav".into(),
            subtitle_path: "work/sub.srt".into(),
            clip_paths: (0..clips).map(|i| format!("video/splits/bg_{i}.mp4")).collect(),
            music_path: music.then(|| "audio/track.mp3".into()),
            title: "my video".into(),
            duration_secs: 17,
        }
    }

    fn filter_of(args: &[String]) -> &str {
        let pos = args.iter().position(|a| a == "-filter_complex").unwrap();
        &args[pos + 1]
    }

    #[test]
    fn clip_count_covers_duration() {
        assert_eq!(required_clip_count(17, 5, 1), 5);
        assert_eq!(required_clip_count(16, 5, 1), 4);
        assert_eq!(required_clip_count(1, 5, 1), 1);
        // never zero
        assert_eq!(required_clip_count(0, 5, 1), 1);
    }

    #[test]
    fn single_clip_skips_crossfade() {
        let args = compile(&spec(1, false), 5, 1, Acceleration::None, "10M", Path::new("out")).unwrap();
        let filter = filter_of(&args);
        assert!(!filter.contains("xfade"));
        assert!(filter.starts_with("[1:v]subtitles="));
    }

    #[test]
    fn crossfade_offsets_step_by_clip_minus_fade() {
        let args = compile(&spec(3, false), 5, 1, Acceleration::None, "10M", Path::new("out")).unwrap();
        let filter = filter_of(&args);
        assert!(filter.contains("xfade=transition=fade:duration=1:offset=4"));
        assert!(filter.contains("xfade=transition=fade:duration=1:offset=8"));
        assert!(filter.contains("[vfin]subtitles="));
    }

    #[test]
    fn music_shifts_clip_streams_and_mixes() {
        let args = compile(&spec(2, true), 5, 1, Acceleration::None, "10M", Path::new("out")).unwrap();
        let filter = filter_of(&args);
        // clips start at stream 2 when music occupies stream 1
        assert!(filter.starts_with("[2:v][3:v]xfade="));
        assert!(filter.contains("amix=inputs=2:duration=shortest:weights=5 1"));
        let map_pos = args.iter().position(|a| a == "[vout]").unwrap();
        assert_eq!(args[map_pos + 2], "[aout]");
    }

    #[test]
    fn no_music_maps_speech_directly() {
        let args = compile(&spec(1, false), 5, 1, Acceleration::None, "10M", Path::new("out")).unwrap();
        assert!(!filter_of(&args).contains("amix"));
        assert!(args.contains(&"[0:a]".to_string()));
    }

    #[test]
    fn video_bitrate_follows_the_encoder() {
        let args = compile(&spec(1, false), 5, 1, Acceleration::None, "8M", Path::new("out")).unwrap();
        let pos = args.iter().position(|a| a == "-b:v").unwrap();
        assert_eq!(args[pos + 1], "8M");
        assert_eq!(args[pos - 1], "libx264");
    }

    #[test]
    fn output_trimmed_to_duration_at_expected_path() {
        let args = compile(&spec(2, false), 5, 1, Acceleration::None, "10M", Path::new("out")).unwrap();
        let t_pos = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t_pos + 1], "17");
        assert_eq!(args.last().unwrap(), "out/my video.mp4");
    }
}
