//! Fixed layout defaults for every generated document.
//!
//! WordprocessingML measures spacing in twentieths of a point (twips) and font
//! sizes in half-points.

/// US letter, 8.5" x 11".
pub const PAGE_WIDTH_TWIPS: u32 = 12_240;
pub const PAGE_HEIGHT_TWIPS: u32 = 15_840;
/// 0.5" on every side.
pub const MARGIN_TWIPS: i32 = 720;

pub const BASE_FONT: &str = "Times New Roman";
pub const BASE_SIZE_PT: u32 = 10;
pub const SPACE_AFTER_PT: u32 = 4;
pub const BULLET_SPACE_AFTER_PT: u32 = 2;

pub const NAME_SIZE_PT: u32 = 16;
pub const SECTION_HEADER_SIZE_PT: u32 = 14;
pub const SECTION_SPACE_BEFORE_PT: u32 = 10;
pub const SECTION_SPACE_AFTER_PT: u32 = 8;
/// Border width in eighths of a point.
pub const SECTION_BORDER_SIZE: usize = 12;

pub const LINK_COLOR: &str = "0000FF";

pub const BULLET_NUMBERING_ID: usize = 1;
pub const BULLET_INDENT_TWIPS: i32 = 360;

pub const fn twips(pt: u32) -> u32 {
    pt * 20
}

pub const fn half_points(pt: u32) -> usize {
    (pt * 2) as usize
}

/// Right edge of the text area, where date ranges are tab-aligned.
pub const fn right_tab_position() -> usize {
    (PAGE_WIDTH_TWIPS as i32 - 2 * MARGIN_TWIPS) as usize
}
