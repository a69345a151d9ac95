use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{error, info, warn};

use crate::config::SplitConfig;
use crate::ffmpeg;
use crate::utils::is_video_file;

/// Per-segment progress through the crop-then-scale fallback. A segment is
/// tried with a widescreen crop first; if that fails the partial output is
/// removed and a naive scale is tried; if that fails too the segment is
/// skipped and the batch moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Pending,
    CropAttempted,
    ScaleAttempted,
    Done,
    Skipped,
}

impl SegmentState {
    /// Next state given the outcome of the attempt just performed. `Pending`
    /// always moves to the first attempt; terminal states stay put.
    pub fn advance(self, last_attempt_ok: bool) -> Self {
        match self {
            Self::Pending => Self::CropAttempted,
            Self::CropAttempted if last_attempt_ok => Self::Done,
            Self::CropAttempted => Self::ScaleAttempted,
            Self::ScaleAttempted if last_attempt_ok => Self::Done,
            Self::ScaleAttempted => Self::Skipped,
            terminal => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Skipped)
    }
}

fn segment_args(
    input: &Path,
    start: i64,
    output: &Path,
    video_filter: &str,
    cfg: &SplitConfig,
) -> Vec<String> {
    let mut args: Vec<String> = cfg
        .accel
        .decode_args()
        .iter()
        .map(|a| a.to_string())
        .collect();
    args.push("-ss".into());
    args.push(start.to_string());
    args.push("-i".into());
    args.push(input.to_string_lossy().into_owned());
    args.push("-r".into());
    args.push(cfg.fps.to_string());
    args.push("-t".into());
    args.push(cfg.clip_length.to_string());
    args.push("-vf".into());
    args.push(video_filter.to_string());
    args.push("-y".into());
    args.push(output.to_string_lossy().into_owned());
    args
}

/// Slice one fixed-length segment out of `input`, driving the fallback
/// state machine to a terminal state.
pub fn render_segment(input: &Path, start: i64, output: &Path, cfg: &SplitConfig) -> SegmentState {
    let crop_filter = format!("crop=ih/16*9:ih,scale={}:{}", cfg.width, cfg.height);
    let scale_filter = format!("scale={}:{}", cfg.width, cfg.height);

    let mut state = SegmentState::Pending;
    let mut attempt_ok = false;
    loop {
        state = state.advance(attempt_ok);
        match state {
            SegmentState::CropAttempted => {
                attempt_ok = attempt(&segment_args(input, start, output, &crop_filter, cfg));
            }
            SegmentState::ScaleAttempted => {
                // a failed crop can leave an empty container behind
                let _ = fs::remove_file(output);
                warn!(
                    "Widescreen crop failed for {}, retrying with naive scale",
                    output.display()
                );
                attempt_ok = attempt(&segment_args(input, start, output, &scale_filter, cfg));
            }
            SegmentState::Done => {
                info!("Exported {} to {}", input.display(), output.display());
                return state;
            }
            SegmentState::Skipped => {
                error!("Failed to split segment {}", output.display());
                return state;
            }
            SegmentState::Pending => unreachable!("advance never yields Pending"),
        }
    }
}

fn attempt(args: &[String]) -> bool {
    match ffmpeg::run_ffmpeg(args) {
        Ok(()) => true,
        Err(err) => {
            warn!("Transform attempt failed: {err}");
            false
        }
    }
}

/// Source stems that already have segments in the splits directory, derived
/// by stripping the `_{offset}` suffix from each split file name.
pub fn already_split_sources(splits_dir: &Path) -> std::io::Result<HashSet<String>> {
    let mut sources = HashSet::new();
    for entry in fs::read_dir(splits_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(&name);
        if let Some((source, _offset)) = stem.rsplit_once('_') {
            sources.insert(source.to_string());
        }
    }
    Ok(sources)
}

/// Slice every raw source clip in the footage directory into fixed-length
/// segments, skipping footage that was already split in an earlier run.
pub fn split_all(cfg: &SplitConfig) -> anyhow::Result<()> {
    let entries = fs::read_dir(&cfg.footage_dir).with_context(|| {
        format!(
            "footage directory {} does not exist, create it and place background videos there",
            cfg.footage_dir.display()
        )
    })?;

    let videos: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(is_video_file)
                .unwrap_or(false)
        })
        .collect();

    info!("Beginning processing of {} videos", videos.len());

    let splits_dir = cfg.splits_dir();
    fs::create_dir_all(&splits_dir)?;
    let existing = already_split_sources(&splits_dir)?;

    let mut num_processed = 0;
    let mut num_skipped = 0;

    for (i, video) in videos.iter().enumerate() {
        info!("Processing video {}/{}: {}", i + 1, videos.len(), video.display());
        let stem = match video.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };
        if existing.contains(&stem) {
            info!("Skipping, splits already exist for this video");
            num_skipped += 1;
            continue;
        }

        let duration = match ffmpeg::media_duration_seconds(&video.to_string_lossy()) {
            Ok(d) => d as i64,
            Err(err) => {
                error!("Could not probe {}: {err}", video.display());
                continue;
            }
        };

        let clip = i64::from(cfg.clip_length);
        let mut start = clip;
        while start < duration - clip {
            let output = splits_dir.join(format!("{stem}_{start}.mp4"));
            render_segment(video, start, &output, cfg);
            start += clip;
        }
        num_processed += 1;
    }

    info!(
        "Completed processing videos! Processed {num_processed} and skipped {num_skipped}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_policy_crop_then_scale_then_skip() {
        use SegmentState::*;
        assert_eq!(Pending.advance(false), CropAttempted);
        assert_eq!(CropAttempted.advance(true), Done);
        assert_eq!(CropAttempted.advance(false), ScaleAttempted);
        assert_eq!(ScaleAttempted.advance(true), Done);
        assert_eq!(ScaleAttempted.advance(false), Skipped);
        // terminal states are absorbing
        assert_eq!(Done.advance(false), Done);
        assert_eq!(Skipped.advance(true), Skipped);
    }

    #[test]
    fn split_sources_derived_from_segment_names() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["ride_5.mp4", "ride_10.mp4", "walk_through_town_25.mp4"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let sources = already_split_sources(dir.path()).unwrap();
        assert!(sources.contains("ride"));
        assert!(sources.contains("walk_through_town"));
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn segment_args_include_trim_and_filter() {
        let cfg = SplitConfig {
            footage_dir: "./video".into(),
            clip_length: 5,
            width: 1080,
            height: 1920,
            fps: 60,
            accel: crate::ffmpeg::Acceleration::None,
        };
        let args = segment_args(
            Path::new("video/ride.mp4"),
            15,
            Path::new("video/splits/ride_15.mp4"),
            "scale=1080:1920",
            &cfg,
        );
        let joined = args.join(" ");
        assert!(joined.starts_with("-ss 15 -i video/ride.mp4"));
        assert!(joined.contains("-t 5"));
        assert!(joined.contains("-vf scale=1080:1920"));
        assert!(joined.ends_with("video/splits/ride_15.mp4"));
    }
}
