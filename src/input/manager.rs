//! Input manager: turns resume and job description files into text

use crate::error::{Result, RankerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::document::CandidateInput;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
    show_progress: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            show_progress: false,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_progress(mut self, enable: bool) -> Self {
        self.show_progress = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(RankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(RankerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    /// Load a batch of resumes.
    ///
    /// Paths that do not exist or have an unsupported extension are skipped.
    /// Existing files that fail to extract stay in the batch as unreadable and
    /// rank last.
    pub async fn load_candidates(&mut self, paths: &[PathBuf]) -> Result<Vec<CandidateInput>> {
        let progress = self.progress_bar(paths.len() as u64);
        let mut candidates = Vec::with_capacity(paths.len());

        for path in paths {
            let id = Self::candidate_id(path);
            progress.set_message(id.clone());

            if !FileType::from_path(path).is_supported() {
                warn!("Skipping {}: unsupported file type", path.display());
                progress.inc(1);
                continue;
            }

            if !path.exists() {
                warn!("Skipping {}: file not found", path.display());
                progress.inc(1);
                continue;
            }

            match self.extract_text(path).await {
                Ok(text) => candidates.push(CandidateInput::new(id, text)),
                Err(e) => {
                    warn!("Could not read {}: {}", path.display(), e);
                    candidates.push(CandidateInput::unreadable(id));
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();

        if candidates.is_empty() {
            warn!("None of the {} path(s) produced a candidate", paths.len());
        } else {
            info!("Loaded {} candidate(s)", candidates.len());
        }
        Ok(candidates)
    }

    /// Display name of a candidate: its file name.
    pub fn candidate_id(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = ProgressBar::new(len);
        bar.set_style(style);
        bar
    }
}
