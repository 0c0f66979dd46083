use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    batch::config::PipelineConfig,
    foundation::error::{ThumbError, ThumbResult},
    render::engine::CompositionEngine,
    source::{
        fetch::{ThumbnailSource, fetch_thumbnail},
        title::{fetch_title, sanitize_title},
        video_id::extract_video_id,
    },
};

/// An input line that produced no output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedItem {
    /// The URL as read from the input list.
    pub url: String,
    /// Display form of the error that stopped it.
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files written, in input order then variant order.
    pub written: Vec<PathBuf>,
    /// Items that were skipped, in input order.
    pub skipped: Vec<SkippedItem>,
}

/// Recursively delete `dir` if it exists and recreate it empty.
pub fn clear_output_dir(dir: &Path) -> ThumbResult<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| {
            ThumbError::output(format!("failed to clear output dir '{}': {e}", dir.display()))
        })?;
    }
    fs::create_dir_all(dir).map_err(|e| {
        ThumbError::output(format!("failed to create output dir '{}': {e}", dir.display()))
    })
}

/// Non-empty, trimmed lines of a newline-delimited file.
pub fn load_urls(path: &Path) -> ThumbResult<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read url list '{}'", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Longest file name, in bytes, most filesystems accept.
pub const MAX_FILE_NAME_BYTES: usize = 255;

/// `"<title> <label>.png"`, with the space dropped when `label` is empty.
///
/// The title is shortened at a char boundary so the whole name fits in
/// [`MAX_FILE_NAME_BYTES`]; the label and extension are kept intact.
pub fn output_file_name(title: &str, label: &str) -> String {
    let label = label.trim();
    let suffix = if label.is_empty() {
        ".png".to_string()
    } else {
        format!(" {label}.png")
    };
    let budget = MAX_FILE_NAME_BYTES.saturating_sub(suffix.len());
    let title = truncate_at_char_boundary(title.trim(), budget).trim_end();
    format!("{title}{suffix}").trim_start().to_string()
}

fn truncate_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Encode `img` as PNG at `path`. Failures only concern this file.
pub fn save_png(img: &RgbaImage, path: &Path) -> ThumbResult<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| ThumbError::write(format!("write png '{}': {e}", path.display())))
}

/// Drives URL list -> thumbnails -> composites -> PNG files.
pub struct BatchRunner<S> {
    source: S,
    config: PipelineConfig,
    engine: CompositionEngine,
}

impl<S: ThumbnailSource> BatchRunner<S> {
    /// Validate `config` and build a runner over `source`.
    pub fn new(source: S, config: PipelineConfig) -> ThumbResult<Self> {
        config.validate()?;
        let engine = CompositionEngine::new(config.canvas);
        Ok(Self {
            source,
            config,
            engine,
        })
    }

    /// Configuration this runner was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Clear `out_dir` once, then process every URL listed in `urls_path`.
    ///
    /// Per-item failures are collected in the report; only output-directory failures abort.
    pub fn run(&self, urls_path: &Path, out_dir: &Path) -> ThumbResult<BatchReport> {
        clear_output_dir(out_dir)?;
        let urls = load_urls(urls_path)?;
        tracing::info!(count = urls.len(), out_dir = %out_dir.display(), "starting batch");
        self.run_urls(&urls, out_dir)
    }

    /// Process `urls` into an existing `out_dir`.
    pub fn run_urls(&self, urls: &[String], out_dir: &Path) -> ThumbResult<BatchReport> {
        if !out_dir.is_dir() {
            return Err(ThumbError::output(format!(
                "output dir '{}' does not exist",
                out_dir.display()
            )));
        }
        let mut report = BatchReport::default();

        if self.config.jobs <= 1 {
            for url in urls {
                let outcome = self.process_item(url, out_dir);
                record(&mut report, url, outcome)?;
            }
        } else {
            let pool = build_thread_pool(self.config.jobs)?;
            let outcomes: Vec<_> = pool.install(|| {
                urls.par_iter()
                    .map(|url| (url, self.process_item(url, out_dir)))
                    .collect()
            });
            for (url, outcome) in outcomes {
                record(&mut report, url, outcome)?;
            }
        }

        warn_on_collisions(&report.written);
        tracing::info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "batch finished"
        );
        Ok(report)
    }

    /// Fetch, render every variant and save one URL.
    #[tracing::instrument(skip(self, out_dir))]
    pub fn process_item(&self, url: &str, out_dir: &Path) -> ThumbResult<Vec<PathBuf>> {
        let video_id = extract_video_id(url)?;
        let thumbnail = fetch_thumbnail(
            &self.source,
            &self.config.thumbnail_base_url,
            &video_id,
            &self.config.resolutions,
        )?;

        let page_url = format!("{}{video_id}", self.config.watch_url_prefix);
        let name = fetch_title(&self.source, &page_url)
            .map(|t| sanitize_title(&t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| video_id.clone());

        let mut written = Vec::with_capacity(self.config.variants.len());
        for variant in &self.config.variants {
            let overlay = variant.overlay_request(self.config.overlay_color);
            let img = self
                .engine
                .process_thumbnail(&thumbnail, self.config.resize_ratio, &overlay)?;
            let path = out_dir.join(output_file_name(&name, &variant.label));
            save_png(&img, &path)?;
            tracing::info!(path = %path.display(), "saved");
            written.push(path);
        }
        Ok(written)
    }
}

fn record(
    report: &mut BatchReport,
    url: &str,
    outcome: ThumbResult<Vec<PathBuf>>,
) -> ThumbResult<()> {
    match outcome {
        Ok(paths) => report.written.extend(paths),
        Err(err) if err.is_batch_fatal() => return Err(err),
        Err(err) => {
            tracing::warn!(marker = "item-skipped", %url, %err, "skipping item");
            report.skipped.push(SkippedItem {
                url: url.to_string(),
                reason: err.to_string(),
            });
        }
    }
    Ok(())
}

fn warn_on_collisions(written: &[PathBuf]) {
    let mut seen = HashSet::with_capacity(written.len());
    for path in written {
        if !seen.insert(path) {
            tracing::warn!(
                marker = "filename-collision",
                path = %path.display(),
                "output written more than once, last write wins"
            );
        }
    }
}

fn build_thread_pool(threads: usize) -> ThumbResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ThumbError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/runner.rs"]
mod tests;
