//! Plain-text PDF output with `printpdf` builtin fonts. Only the statement of
//! purpose is offered as PDF; it has no structure beyond paragraphs.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::document::RenderError;

pub const PDF_MIME: &str = "application/pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 6.0;
/// (297 - 2 * 15) / 6, rounded down.
const LINES_PER_PAGE: usize = 44;
/// Helvetica at 12pt across the 180mm text width.
const WRAP_CHARS: usize = 85;

/// Builtin PDF fonts only cover Latin-1. Typographic dashes and quotes are mapped
/// to their ASCII forms and anything else outside Latin-1 is dropped.
fn latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .filter(|c| (*c as u32) <= 0xFF)
        .collect()
}

fn wrap(line: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let needed = current.chars().count() + word.chars().count() + 1;
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Every source line wrapped to the page width. Blank lines are kept so
/// paragraph breaks survive.
pub fn layout_lines(text: &str) -> Vec<String> {
    latin1(text)
        .split('\n')
        .flat_map(|line| wrap(line.trim_end_matches('\r'), WRAP_CHARS))
        .collect()
}

pub fn render_text_pdf(title: &str, text: &str) -> Result<Vec<u8>, RenderError> {
    let lines = layout_lines(text);

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;

    for (index, page_lines) in lines.chunks(LINES_PER_PAGE).enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        let mut y = Mm(PAGE_HEIGHT_MM - MARGIN_MM);
        for line in page_lines {
            if !line.is_empty() {
                layer.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), y, &font);
            }
            y -= Mm(LINE_HEIGHT_MM);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| RenderError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| RenderError::Pdf(format!("buffer error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typographic_punctuation_mapped_and_non_latin_dropped() {
        assert_eq!(
            latin1("It\u{2019}s \u{201C}great\u{201D} \u{2014} caf\u{e9} \u{4f60}"),
            "It's \"great\" - caf\u{e9} "
        );
    }

    #[test]
    fn test_blank_lines_survive_layout() {
        assert_eq!(
            layout_lines("Dear committee,\n\nI apply.\r\n"),
            vec!["Dear committee,", "", "I apply.", ""]
        );
    }

    #[test]
    fn test_long_paragraph_wraps_at_page_width() {
        let paragraph = vec!["word"; 60].join(" ");
        let lines = layout_lines(&paragraph);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= WRAP_CHARS));
        assert_eq!(lines.join(" "), paragraph);
    }

    #[test]
    fn test_renders_pdf_bytes_over_several_pages() {
        let text = vec!["A line of the statement."; LINES_PER_PAGE * 2 + 1].join("\n");
        let bytes = render_text_pdf("SOP", &text).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
