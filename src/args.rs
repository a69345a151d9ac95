use clap::{Parser, Subcommand};
use clap::Args as ClapArgs;
use std::path::PathBuf;

use crate::config::{RenderConfig, SplitConfig};
use crate::ffmpeg::Acceleration;

#[derive(Parser, Debug)]
#[command(name = "storyforge", about = "Assemble narrated short-form videos")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render narrated videos from a scraped comments file
    Render(RenderArgs),
    /// Pre-split raw footage into fixed-length background clips
    Split(SplitArgs),
}

#[derive(ClapArgs, Debug)]
pub struct RenderArgs {
    /// JSON file of {title, comment_text} records
    #[clap(long)]
    pub comments: PathBuf,

    #[clap(long, default_value = "./video")]
    pub footage_dir: PathBuf,

    #[clap(long, default_value = "./audio")]
    pub audio_dir: PathBuf,

    #[clap(long, default_value = "./out")]
    pub out_dir: PathBuf,

    #[clap(long, default_value = "./work")]
    pub work_dir: PathBuf,

    /// Base URL of the gentle-style forced aligner
    #[clap(long, default_value = "http://localhost:32768")]
    pub aligner_url: String,

    #[clap(long, default_value = "./tts/en_US-hfc_male-medium.onnx")]
    pub piper_model: String,

    /// Tempo multiplier applied to the narration, pitch preserved
    #[clap(long, default_value_t = 1.5)]
    pub speech_speed: f64,

    #[clap(long, default_value_t = 5)]
    pub clip_length: u32,

    #[clap(long, default_value_t = 1)]
    pub xfade_length: u32,

    /// Reject speech shorter than this many seconds, -1 to disable
    #[clap(long, default_value_t = 20)]
    pub min_length: i64,

    /// Reject speech longer than this many seconds, -1 to disable
    #[clap(long, default_value_t = 180)]
    pub max_length: i64,

    #[clap(long, default_value_t = 0)]
    pub start_index: usize,

    /// Exclusive end index into the comments list, -1 for all
    #[clap(long, default_value_t = -1)]
    pub end_index: i64,

    /// Per-video title template, tags: %title %date %index %uuid %randnum %mystr
    #[clap(long, default_value = "%title #shorts %index %date")]
    pub title_format: String,

    /// Narration template, tags: %title %content
    #[clap(long, default_value = "%title %content")]
    pub content_format: String,

    /// Value substituted for the %mystr title tag
    #[clap(long, default_value = "")]
    pub custom_tag: String,

    #[clap(long, value_enum, default_value_t = Acceleration::None)]
    pub accel: Acceleration,

    /// Target bitrate for the final video encode
    #[clap(long, default_value = "10M")]
    pub video_bitrate: String,

    /// Timeout for alignment requests in seconds
    #[clap(long, default_value_t = 300)]
    pub request_timeout: u64,
}

#[derive(ClapArgs, Debug)]
pub struct SplitArgs {
    #[clap(long, default_value = "./video")]
    pub footage_dir: PathBuf,

    #[clap(long, default_value_t = 5)]
    pub clip_length: u32,

    #[clap(long, default_value_t = 1080)]
    pub width: u32,

    #[clap(long, default_value_t = 1920)]
    pub height: u32,

    #[clap(long, default_value_t = 60)]
    pub fps: u32,

    #[clap(long, value_enum, default_value_t = Acceleration::None)]
    pub accel: Acceleration,
}

impl RenderArgs {
    pub fn into_config(self) -> RenderConfig {
        RenderConfig {
            comments_file: self.comments,
            footage_dir: self.footage_dir,
            audio_dir: self.audio_dir,
            out_dir: self.out_dir,
            work_dir: self.work_dir,
            aligner_url: self.aligner_url,
            piper_model: self.piper_model,
            speech_speed: self.speech_speed,
            clip_length: self.clip_length,
            xfade_length: self.xfade_length,
            min_length: self.min_length,
            max_length: self.max_length,
            start_index: self.start_index,
            end_index: self.end_index,
            title_format: self.title_format,
            content_format: self.content_format,
            custom_tag: self.custom_tag,
            accel: self.accel,
            video_bitrate: self.video_bitrate,
            request_timeout_secs: self.request_timeout,
        }
    }
}

impl SplitArgs {
    pub fn into_config(self) -> SplitConfig {
        SplitConfig {
            footage_dir: self.footage_dir,
            clip_length: self.clip_length,
            width: self.width,
            height: self.height,
            fps: self.fps,
            accel: self.accel,
        }
    }
}
