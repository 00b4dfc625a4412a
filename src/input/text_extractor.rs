//! Text extraction from various file formats

use crate::error::{AtsScorerError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AtsScorerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown))
    }
}

impl MarkdownExtractor {
    /// Drop markdown markup, keeping one line per paragraph, heading and list item
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::with_capacity(markdown.len());

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak => text.push(' '),
                Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reads everything piped into the process
pub struct StdinExtractor;

impl TextExtractor for StdinExtractor {
    async fn extract(&self, _path: &Path) -> Result<String> {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# Jane Doe\n\n**Senior** engineer using `Rust`.\n\n## Skills\n\n- React\n- Node.js\n";
        let text = MarkdownExtractor::markdown_to_text(markdown);

        assert_eq!(text, "Jane Doe\nSenior engineer using Rust.\nSkills\nReact\nNode.js");
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.txt");
        std::fs::write(&path, "Jane Doe\nEngineer").unwrap();

        let text = PlainTextExtractor.extract(&path).await.unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");
    }
}
