use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Utc;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::error::{Error, Result};
use crate::models::report::{safe_name, TalentIntelligenceReport};
use crate::storage::reports::ensure_dir;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const CONFIDENCE_COLUMN: f32 = 140.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
/// Rough Helvetica capacity of one body line across the printable width.
const BODY_WRAP_CHARS: usize = 95;

fn pdf_err(e: impl std::fmt::Display) -> Error {
    Error::Pdf(e.to_string())
}

/// Writes one A4 PDF per candidate talent report.
#[derive(Debug, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &TalentIntelligenceReport, out_dir: &Path) -> Result<PathBuf> {
        let dir = ensure_dir(out_dir)?;
        let path = dir.join(format!("{}.pdf", safe_name(&report.candidate.name)));

        let title = format!("Talent Intelligence Report - {}", report.candidate.name);
        let mut page = PageWriter::new(&title)?;

        page.line(&title, TITLE_SIZE, true);
        page.gap(4.0);

        page.line(&format!("Role: {}", report.candidate.role), BODY_SIZE, false);
        page.line(
            &format!("Experience (years): {}", report.candidate.experience_years),
            BODY_SIZE,
            false,
        );
        page.gap(4.0);

        page.heading("Career Summary");
        page.paragraph(&report.career_summary);

        page.heading("Detected Skills");
        if report.skills.is_empty() {
            page.line("No skills detected.", BODY_SIZE, false);
        } else {
            page.columns("Skill", "Confidence", true);
            for m in &report.skills {
                page.columns(&m.skill, &format!("{:.2}", m.confidence), false);
            }
        }

        page.heading("Highlights");
        for h in &report.highlights {
            page.paragraph(&format!("- {}", h));
        }

        page.heading("Notes");
        page.paragraph(&report.notes);

        page.gap(6.0);
        page.line(
            &format!("Generated {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
            8.0,
            false,
        );

        page.save(&path)?;
        tracing::debug!("Rendered PDF {}", path.display());
        Ok(path)
    }
}

/// Top-down text cursor that starts a new page when it runs out of room.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn line_height(size: f32) -> f32 {
        // pt to mm with some leading
        size * 0.3528 * 1.4
    }

    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let height = Self::line_height(size);
        self.ensure_space(height);
        self.y -= height;
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.y), self.font(bold));
    }

    fn heading(&mut self, text: &str) {
        self.gap(3.0);
        self.line(text, HEADING_SIZE, true);
        self.gap(1.0);
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap(text, BODY_WRAP_CHARS) {
            self.line(&line, BODY_SIZE, false);
        }
    }

    fn columns(&mut self, left: &str, right: &str, bold: bool) {
        let height = Self::line_height(BODY_SIZE);
        self.ensure_space(height);
        self.y -= height;
        let font = self.font(bold).clone();
        self.layer
            .use_text(left, BODY_SIZE, Mm(MARGIN), Mm(self.y), &font);
        self.layer
            .use_text(right, BODY_SIZE, Mm(CONFIDENCE_COLUMN), Mm(self.y), &font);
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(pdf_err)
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::CandidateInfo;
    use crate::models::skill::SkillMatch;

    fn report(summary: String) -> TalentIntelligenceReport {
        TalentIntelligenceReport {
            candidate: CandidateInfo {
                name: "Ada Lovelace".to_string(),
                role: "AI Engineer".to_string(),
                experience_years: 7,
            },
            career_summary: summary,
            skills: vec![SkillMatch::new("Python", 0.8), SkillMatch::new("NLP", 0.53)],
            highlights: vec!["7 years of experience as AI Engineer".to_string()],
            notes: "Synthetic.".to_string(),
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three four", 9), vec!["one two", "three", "four"]);
        assert_eq!(wrap("", 10), Vec::<String>::new());
        assert_eq!(wrap("averyveryverylongword x", 5), vec!["averyveryverylongword", "x"]);
    }

    #[test]
    fn test_render_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = PdfRenderer::new()
            .render(&report("Builds models.".to_string()), dir.path())
            .unwrap();

        assert_eq!(path, dir.path().join("Ada_Lovelace.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_report_paginates() {
        let dir = tempfile::tempdir().unwrap();
        let summary = "Shipped another production model this quarter. ".repeat(400);
        let path = PdfRenderer::new()
            .render(&report(summary), dir.path())
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("pdfs");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(PdfRenderer::new()
            .render(&report(String::new()), &blocker)
            .is_err());
    }
}
