use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::align;
use crate::audio::wav_duration_seconds;
use crate::config::RenderConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::ffmpeg;
use crate::normalize::Normalizer;
use crate::render::{self, RenderSpec};
use crate::sampler;
use crate::subtitle;
use crate::tts;
use crate::utils::{clean_file_name, format_string, is_audio_file, is_video_file};

/// One scraped item, as persisted by the text-acquisition step.
#[derive(Debug, Deserialize)]
pub struct Comment {
    pub title: String,
    pub comment_text: String,
}

/// Expand the title template for one video. Unknown tags stay literal.
pub fn format_title(template: &str, title: &str, index: usize, custom: &str) -> String {
    let mut tags = HashMap::new();
    tags.insert("title", title.to_string());
    tags.insert("date", Local::now().format("%m-%d-%y").to_string());
    tags.insert("index", index.to_string());
    tags.insert("uuid", Uuid::new_v4().to_string());
    tags.insert("randnum", rand::rng().random_range(1000..=9999).to_string());
    tags.insert("mystr", custom.to_string());
    format_string(template, &tags)
}

/// Acceptance window on the measured speech length. A bound of -1 disables
/// that side of the window.
pub fn within_window(secs: f64, min: i64, max: i64) -> bool {
    (min == -1 || secs >= min as f64) && (max == -1 || secs <= max as f64)
}

fn list_dir_filtered(dir: &PathBuf, keep: fn(&str) -> bool) -> Vec<String> {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.file_name()
                        .and_then(|n| n.to_str())
                        .map(keep)
                        .unwrap_or(false)
                })
                .map(|p| p.to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

/// Render every queued comment in the configured index range. A failed
/// video is logged and skipped; the batch always runs to the end.
pub async fn render_all(cfg: &RenderConfig) -> anyhow::Result<()> {
    cfg.validate()?;

    let data = fs::read_to_string(&cfg.comments_file)
        .with_context(|| format!("could not read comments file {}", cfg.comments_file.display()))?;
    let comments: Vec<Comment> =
        serde_json::from_str(&data).context("comments file is not valid JSON")?;

    let video_pool = list_dir_filtered(&cfg.splits_dir(), is_video_file);
    if video_pool.is_empty() {
        anyhow::bail!(
            "no background clips found in {}, add raw footage to {} and run the split command first",
            cfg.splits_dir().display(),
            cfg.footage_dir.display()
        );
    }

    let audio_pool = list_dir_filtered(&cfg.audio_dir, is_audio_file);
    if audio_pool.is_empty() {
        warn!(
            "No background audio found in {}, videos will not have music",
            cfg.audio_dir.display()
        );
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(cfg.request_timeout_secs))
        .build()
        .context("could not build HTTP client")?;
    let normalizer = Normalizer::new();

    let end = match cfg.end_index {
        i if i >= 0 && (i as usize) < comments.len() => i as usize,
        _ => comments.len(),
    };
    let total = end.saturating_sub(cfg.start_index);
    info!("Rendering out {total} videos");

    for (count, i) in (cfg.start_index..end).enumerate() {
        let comment = &comments[i];
        let title = clean_file_name(&format_title(
            &cfg.title_format,
            &comment.title,
            i,
            &cfg.custom_tag,
        ));
        let mut tags = HashMap::new();
        tags.insert("title", comment.title.clone());
        tags.insert("content", comment.comment_text.clone());
        let content = format_string(&cfg.content_format, &tags);

        info!("Rendering video {}/{total}: '{title}'", count + 1);
        match render_one(cfg, &client, &normalizer, &video_pool, &audio_pool, &content, &title).await
        {
            Ok(path) => info!("Done! Exported video to {}", path.display()),
            Err(err) => error!("Skipping video '{title}': {err}"),
        }
    }

    Ok(())
}

/// The per-video pipeline: normalize, synthesize, retime, gate on length,
/// align, build subtitles, pick clips, compile and run the final assembly.
async fn render_one(
    cfg: &RenderConfig,
    client: &reqwest::Client,
    normalizer: &Normalizer,
    video_pool: &[String],
    audio_pool: &[String],
    content: &str,
    title: &str,
) -> PipelineResult<PathBuf> {
    fs::create_dir_all(&cfg.work_dir)?;
    let work = |name: &str| cfg.work_dir.join(name).to_string_lossy().into_owned();

    let content = normalizer.clean(content);
    fs::write(work("speech.txt").as_str(), &content)?;

    tts::synthesize(&cfg.piper_model, &content, &work("speech_pre.wav"))?;
    tts::retime(&work("speech_pre.wav"), &work("speech.wav"), cfg.speech_speed)?;

    let speech_secs = wav_duration_seconds(&work("speech.wav"))?;
    if !within_window(speech_secs, cfg.min_length, cfg.max_length) {
        return Err(PipelineError::Rejected {
            secs: speech_secs,
            min: cfg.min_length,
            max: cfg.max_length,
        });
    }

    let timings = align::align(
        client,
        &cfg.aligner_url,
        cfg.work_dir.join("speech.wav").as_path(),
        &content,
    )
    .await?;

    let (srt, total_secs) = subtitle::build(&timings)?;
    fs::write(work("sub.srt").as_str(), &srt)?;

    let needed = render::required_clip_count(total_secs, cfg.clip_length, cfg.xfade_length);
    let clips = sampler::select(video_pool, needed)?;
    let music = audio_pool.choose(&mut rand::rng()).cloned();

    let spec = RenderSpec {
        speech_path: work("speech.wav"),
        subtitle_path: work("sub.srt"),
        clip_paths: clips,
        music_path: music,
        title: title.to_string(),
        duration_secs: total_secs,
    };

    fs::create_dir_all(&cfg.out_dir)?;
    let args = render::compile(
        &spec,
        cfg.clip_length,
        cfg.xfade_length,
        cfg.accel,
        &cfg.video_bitrate,
        &cfg.out_dir,
    )?;
    info!("Calling ffmpeg: {}", args.join(" "));
    ffmpeg::run_ffmpeg(&args)?;

    Ok(render::output_path(&cfg.out_dir, title))
}
