//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{AtsScorerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, StdinExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_file_size: Option<u64>,
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
            max_file_size: None,
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new()
            .with_cache(config.enable_cache)
            .with_max_file_size(config.max_file_size_bytes())
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let file_type = FileType::detect(path);

        // stdin can only be read once, so it is never cached
        if file_type == FileType::Stdin {
            info!("Reading text from standard input");
            return StdinExtractor.extract(path).await;
        }

        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(AtsScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        self.check_size(path).await?;

        let text = match file_type {
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
            FileType::Stdin | FileType::Unknown => {
                return Err(AtsScorerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    async fn check_size(&self, path: &Path) -> Result<()> {
        let Some(limit) = self.max_file_size else {
            return Ok(());
        };

        let size = tokio::fs::metadata(path).await?.len();
        if size > limit {
            return Err(AtsScorerError::InvalidInput(format!(
                "File {} is {} KB, larger than the {} KB limit",
                path.display(),
                size / 1024,
                limit / 1024
            )));
        }
        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
