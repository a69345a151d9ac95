use std::path::PathBuf;

use crate::ffmpeg::Acceleration;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub comments_file: PathBuf,
    pub footage_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub out_dir: PathBuf,
    pub work_dir: PathBuf,
    pub aligner_url: String,
    pub piper_model: String,
    pub speech_speed: f64,
    pub clip_length: u32,
    pub xfade_length: u32,
    // window bounds in seconds, -1 disables a side
    pub min_length: i64,
    pub max_length: i64,
    pub start_index: usize,
    // exclusive, -1 for the whole list
    pub end_index: i64,
    pub title_format: String,
    pub content_format: String,
    pub custom_tag: String,
    pub accel: Acceleration,
    pub video_bitrate: String,
    pub request_timeout_secs: u64,
}

impl RenderConfig {
    pub fn splits_dir(&self) -> PathBuf {
        self.footage_dir.join("splits")
    }

    /// Fail fast on tunables that would make the crossfade arithmetic
    /// meaningless: each clip must outlast the transition into the next one.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.xfade_length < self.clip_length,
            "crossfade length ({}s) must be shorter than clip length ({}s)",
            self.xfade_length,
            self.clip_length
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub footage_dir: PathBuf,
    pub clip_length: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub accel: Acceleration,
}

impl SplitConfig {
    pub fn splits_dir(&self) -> PathBuf {
        self.footage_dir.join("splits")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(clip_length: u32, xfade_length: u32) -> RenderConfig {
        RenderConfig {
            comments_file: "content/comments.json".into(),
            footage_dir: "./video".into(),
            audio_dir: "./audio".into(),
            out_dir: "./out".into(),
            work_dir: "./work".into(),
            aligner_url: "http://localhost:32768".into(),
            piper_model: "model.onnx".into(),
            speech_speed: 1.5,
            clip_length,
            xfade_length,
            min_length: 20,
            max_length: 180,
            start_index: 0,
            end_index: -1,
            title_format: "%title".into(),
            content_format: "%title %content".into(),
            custom_tag: String::new(),
            accel: Acceleration::None,
            video_bitrate: "10M".into(),
            request_timeout_secs: 300,
        }
    }

    #[test]
    fn rejects_crossfade_not_shorter_than_clip() {
        // equal lengths would divide by zero in the clip-count math,
        // a longer fade would underflow the offset step
        assert!(config(5, 5).validate().is_err());
        assert!(config(5, 6).validate().is_err());
    }

    #[test]
    fn accepts_sane_lengths() {
        assert!(config(5, 1).validate().is_ok());
    }
}
