//! Text extraction from various file formats

use crate::error::{Result, MatcherError};
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;
use zip::ZipArchive;

const DOCX_BODY: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            MatcherError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        String::from_utf8(bytes).map_err(|_| {
            MatcherError::InvalidInput(format!("'{}' is not valid UTF-8 text", path.display()))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    /// Plain text of a markdown document, one block per line
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                    text.push('\n')
                }
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

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let xml = Self::read_document_xml(&bytes).map_err(|e| {
            MatcherError::DocxExtraction(format!("Failed to open DOCX '{}': {}", path.display(), e))
        })?;
        Self::document_xml_to_text(&xml).map_err(|e| {
            MatcherError::DocxExtraction(format!("Failed to parse DOCX '{}': {}", path.display(), e))
        })
    }
}

impl DocxExtractor {
    fn read_document_xml(bytes: &[u8]) -> std::result::Result<String, zip::result::ZipError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entry = archive.by_name(DOCX_BODY)?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        Ok(xml)
    }

    /// Paragraph text of a WordprocessingML body, one paragraph per line
    pub fn document_xml_to_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs: Vec<String> = Vec::new();
        let mut current = String::new();
        // only <w:t> runs carry visible text
        let mut in_text = false;

        loop {
            match reader.read_event()? {
                XmlEvent::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
                XmlEvent::End(e) => match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                },
                XmlEvent::Empty(e) => match e.local_name().as_ref() {
                    b"tab" => current.push('\t'),
                    b"br" | b"cr" => current.push('\n'),
                    b"p" => paragraphs.push(String::new()),
                    _ => {}
                },
                XmlEvent::Text(t) if in_text => current.push_str(&t.unescape()?),
                XmlEvent::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# Jane Roe\n\n## Skills\n\n- **Rust**, `tokio`\n- Node.js\n\nBuilt *fast* services.\n";

        let text = MarkdownExtractor::markdown_to_text(markdown);

        assert_eq!(text, "Jane Roe\nSkills\nRust, tokio\nNode.js\nBuilt fast services.");
    }

    #[test]
    fn test_document_xml_to_text() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Roe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Rust </w:t></w:r><w:r><w:t>&amp; C</w:t></w:r><w:r><w:tab/><w:t>Go</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:instrText>PAGE</w:instrText><w:t>Done</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let text = DocxExtractor::document_xml_to_text(xml).unwrap();

        assert_eq!(text, "Jane Roe\nRust & C\tGo\n\nDone");
    }
}
