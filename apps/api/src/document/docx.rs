//! Serializes an `AssembledDocument` to WordprocessingML with `docx-rs`.

use std::io::{Read, Seek, SeekFrom, Write};

use docx_rs::{
    AbstractNumbering, AlignmentType, BorderType, Docx, Hyperlink, HyperlinkType, IndentLevel,
    Level, LevelJc, LevelText, LineSpacing, NumberFormat, Numbering, NumberingId, PageMargin,
    ParagraphBorder, ParagraphBorderPosition, ParagraphBorders, Run, RunFonts, SpecialIndentType,
    Start, Tab, TabValueType,
};

use crate::document::RenderError;
use crate::document::model::{
    Alignment, AssembledDocument, Element, Inline, Paragraph, TextStyle,
};
use crate::document::style::{
    half_points, right_tab_position, twips, BASE_FONT, BASE_SIZE_PT, BULLET_INDENT_TWIPS,
    BULLET_NUMBERING_ID, BULLET_SPACE_AFTER_PT, LINK_COLOR, MARGIN_TWIPS, PAGE_HEIGHT_TWIPS,
    PAGE_WIDTH_TWIPS, SECTION_BORDER_SIZE, SECTION_HEADER_SIZE_PT, SECTION_SPACE_AFTER_PT,
    SECTION_SPACE_BEFORE_PT, SPACE_AFTER_PT,
};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Writes the document as a `.docx` archive.
pub fn render<W: Write + Seek>(document: &AssembledDocument, writer: W) -> Result<(), RenderError> {
    let mut docx = Docx::new()
        .page_size(PAGE_WIDTH_TWIPS, PAGE_HEIGHT_TWIPS)
        .page_margin(
            PageMargin::new()
                .top(MARGIN_TWIPS)
                .bottom(MARGIN_TWIPS)
                .left(MARGIN_TWIPS)
                .right(MARGIN_TWIPS),
        )
        .add_abstract_numbering(bullet_numbering())
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

    for section in document.sections() {
        if let Some(title) = &section.title {
            docx = docx.add_paragraph(section_header(title));
        }
        for element in &section.elements {
            docx = docx.add_paragraph(element_paragraph(element));
        }
    }

    docx.build()
        .pack(writer)
        .map_err(|e| RenderError::Pack(e.to_string()))
}

/// Packs the document into an anonymous temp file and reads it back. The file is
/// removed when it goes out of scope.
pub fn render_to_bytes(document: &AssembledDocument) -> Result<Vec<u8>, RenderError> {
    let mut file = tempfile::tempfile()?;
    render(document, &mut file)?;
    file.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn bullet_numbering() -> AbstractNumbering {
    let level = |depth: usize, glyph: &str| {
        let indent = BULLET_INDENT_TWIPS * (depth as i32 + 1);
        Level::new(
            depth,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new(glyph),
            LevelJc::new("left"),
        )
        .indent(
            Some(indent),
            Some(SpecialIndentType::Hanging(BULLET_INDENT_TWIPS)),
            None,
            None,
        )
    };

    AbstractNumbering::new(BULLET_NUMBERING_ID)
        .add_level(level(0, "•"))
        .add_level(level(1, "◦"))
}

fn base_fonts() -> RunFonts {
    RunFonts::new()
        .ascii(BASE_FONT)
        .hi_ansi(BASE_FONT)
        .east_asia(BASE_FONT)
        .cs(BASE_FONT)
}

fn styled_run(text: &str, style: &TextStyle) -> Run {
    let mut run = Run::new()
        .add_text(text)
        .fonts(base_fonts())
        .size(half_points(style.size_pt.unwrap_or(BASE_SIZE_PT)));
    if style.bold {
        run = run.bold();
    }
    if style.italic {
        run = run.italic();
    }
    run
}

fn section_header(title: &str) -> docx_rs::Paragraph {
    let rule = ParagraphBorder::new(ParagraphBorderPosition::Bottom)
        .val(BorderType::Single)
        .size(SECTION_BORDER_SIZE)
        .space(0)
        .color("000000");

    docx_rs::Paragraph::new()
        .add_run(styled_run(
            title,
            &TextStyle::PLAIN.bold().sized(SECTION_HEADER_SIZE_PT),
        ))
        .line_spacing(
            LineSpacing::new()
                .before(twips(SECTION_SPACE_BEFORE_PT))
                .after(twips(SECTION_SPACE_AFTER_PT)),
        )
        .set_borders(ParagraphBorders::with_empty().set(rule))
}

fn element_paragraph(element: &Element) -> docx_rs::Paragraph {
    match element {
        Element::Paragraph(p) => paragraph(p, SPACE_AFTER_PT),
        Element::Bullet { level, paragraph: p } => paragraph(p, BULLET_SPACE_AFTER_PT).numbering(
            NumberingId::new(BULLET_NUMBERING_ID),
            IndentLevel::new(*level as usize),
        ),
    }
}

fn paragraph(p: &Paragraph, space_after_pt: u32) -> docx_rs::Paragraph {
    let mut out =
        docx_rs::Paragraph::new().line_spacing(LineSpacing::new().after(twips(space_after_pt)));

    if p.alignment == Alignment::Center {
        out = out.align(AlignmentType::Center);
    }
    if p.right_tab_stop {
        out = out.add_tab(Tab::new().val(TabValueType::Right).pos(right_tab_position()));
    }

    for run in &p.runs {
        out = match run {
            Inline::Text { text, style } => out.add_run(styled_run(text, style)),
            Inline::Link {
                label,
                target,
                style,
            } => out.add_hyperlink(
                Hyperlink::new(target.as_str(), HyperlinkType::External).add_run(
                    styled_run(label, style)
                        .color(LINK_COLOR)
                        .underline("single"),
                ),
            ),
            Inline::Tab => out.add_run(Run::new().add_tab()),
        };
    }

    out
}
