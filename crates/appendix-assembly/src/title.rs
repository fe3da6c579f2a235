//! Title pages inserted before each appendix.

use std::fs::File;
use std::path::Path;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts};

use crate::error::{AssemblyError, Result};

/// Typography of a generated title page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePageStyle {
    pub font: String,
    pub title_size_pt: usize,
    pub subtitle_size_pt: usize,
    /// Empty paragraphs above the title, pushing it down the page.
    pub leading_blank_lines: usize,
}

impl Default for TitlePageStyle {
    fn default() -> Self {
        Self {
            font: "Calibri".to_string(),
            title_size_pt: 36,
            subtitle_size_pt: 12,
            leading_blank_lines: 8,
        }
    }
}

impl TitlePageStyle {
    fn run(&self, text: &str, size_pt: usize) -> Run {
        let fonts = RunFonts::new()
            .ascii(&self.font)
            .hi_ansi(&self.font)
            .cs(&self.font);
        // Word measures run sizes in half-points.
        Run::new().add_text(text).size(size_pt * 2).fonts(fonts)
    }
}

/// Write a one-page document to `path` with `title` in bold and the source
/// file name in parentheses underneath, both centered.
pub fn write_title_page(
    path: &Path,
    title: &str,
    file_name: &str,
    style: &TitlePageStyle,
) -> Result<()> {
    let mut docx = Docx::new();
    for _ in 0..style.leading_blank_lines {
        docx = docx.add_paragraph(Paragraph::new());
    }
    docx = docx
        .add_paragraph(
            Paragraph::new()
                .add_run(style.run(title, style.title_size_pt).bold())
                .align(AlignmentType::Center),
        )
        .add_paragraph(Paragraph::new())
        .add_paragraph(
            Paragraph::new()
                .add_run(
                    style
                        .run(&format!("({file_name})"), style.subtitle_size_pt)
                        .italic(),
                )
                .align(AlignmentType::Center),
        );

    let file = File::create(path)?;
    docx.build()
        .pack(file)
        .map_err(|error| AssemblyError::TitlePage {
            path: path.to_path_buf(),
            message: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Bold, DocumentChild, Italic, ParagraphChild, RunChild, Sz, read_docx};
    use tempfile::TempDir;

    #[test]
    fn writes_a_docx_package() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("title_0.docx");
        write_title_page(&path, "Survey Results", "survey.pdf", &TitlePageStyle::default())
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // DOCX files are zip archives.
        assert_eq!(&bytes[..2], b"PK");
    }

    fn paragraphs(docx: &Docx) -> Vec<&Paragraph> {
        docx.document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph.as_ref()),
                _ => None,
            })
            .collect()
    }

    fn runs(paragraph: &Paragraph) -> Vec<&Run> {
        paragraph
            .children
            .iter()
            .filter_map(|child| match child {
                ParagraphChild::Run(run) => Some(run.as_ref()),
                _ => None,
            })
            .collect()
    }

    fn text(run: &Run) -> String {
        run.children
            .iter()
            .filter_map(|child| match child {
                RunChild::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn is_centered(paragraph: &Paragraph) -> bool {
        paragraph
            .property
            .alignment
            .as_ref()
            .is_some_and(|alignment| alignment.val == "center")
    }

    #[test]
    fn title_page_reads_back_with_its_typography() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("title_1.docx");
        let style = TitlePageStyle::default();
        write_title_page(&path, "R&D <Results>", "survey.pdf", &style).unwrap();

        let docx = read_docx(&std::fs::read(&path).unwrap()).unwrap();
        let paragraphs = paragraphs(&docx);
        assert!(paragraphs.len() > style.leading_blank_lines);
        for blank in &paragraphs[..style.leading_blank_lines] {
            assert!(runs(blank).is_empty());
        }

        let written: Vec<(&Paragraph, &Run)> = paragraphs
            .iter()
            .flat_map(|&paragraph| runs(paragraph).into_iter().map(move |run| (paragraph, run)))
            .filter(|(_, run)| !text(run).is_empty())
            .collect();
        assert_eq!(written.len(), 2);

        let (title_paragraph, title) = written[0];
        assert_eq!(text(title), "R&D <Results>");
        assert_eq!(title.run_property.bold, Some(Bold::new()));
        assert_eq!(title.run_property.sz, Some(Sz::new(style.title_size_pt * 2)));
        assert!(is_centered(title_paragraph));

        let (name_paragraph, name) = written[1];
        assert_eq!(text(name), "(survey.pdf)");
        assert_eq!(name.run_property.italic, Some(Italic::new()));
        assert_eq!(name.run_property.sz, Some(Sz::new(style.subtitle_size_pt * 2)));
        assert!(is_centered(name_paragraph));
    }
}
