//! View constants (layout/sizing).

pub(crate) const SIDE_W: f32 = 480.0;
pub(crate) const LABEL_W: f32 = 90.0;

// song list sizing
pub(crate) const HEADER_TEXT: f32 = 14.0;
pub(crate) const ROW_TEXT: f32 = 13.0;

pub(crate) const SONG_ROW_H: f32 = 26.0;
pub(crate) const SONG_ROW_VPAD: f32 = 2.0;
pub(crate) const SONG_ROW_HPAD: f32 = 8.0;
pub(crate) const SONG_LIST_SPACING: f32 = 1.0;

pub(crate) const COL_MARK: f32 = 40.0;
pub(crate) const COL_WIDE: f32 = 200.0;
pub(crate) const COL_MID: f32 = 130.0;
pub(crate) const COL_NUM: f32 = 56.0;

pub(crate) const COVER_BIG: f32 = 140.0;
pub(crate) const JSON_EDITOR_H: f32 = 220.0;

/// Rows of the last apply report shown under the buttons.
pub(crate) const REPORT_LINES: usize = 8;
