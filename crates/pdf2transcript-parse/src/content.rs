//! Content-stream interpretation: text matrix tracking and run extraction.
//!
//! Walks a decoded page content stream and emits one positioned [`TextRun`]
//! per text-showing operator. Only the text-positioning subset of the PDF
//! graphics model is interpreted (`BT`/`ET`, `Td`/`TD`/`Tm`/`T*`,
//! `Tf`/`TL`/`Tc`/`Tw`/`Tz`, `q`/`Q`/`cm`); painting operators are ignored.
//!
//! The pen advance between runs is estimated from font size and a
//! half-width/full-width character class rather than real glyph metrics.
//! The estimate only has to keep same-line runs in reading order; rows are
//! re-sorted by `x0` downstream.

use std::collections::HashMap;

use lopdf::content::Content;

use crate::backend::TextRun;
use crate::font::FontDecoder;

/// A 2D affine transformation matrix `[a b c d e f]`, row-vector convention.
///
/// A point transforms as `(x', y') = (a·x + c·y + e, b·x + d·y + f)`; the
/// product `m1.concat(&m2)` applies `m1` first, then `m2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    /// The identity matrix.
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// A pure translation by `(tx, ty)`.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: tx,
            f: ty,
        }
    }

    /// Matrix product: apply `self`, then `m`.
    pub fn concat(&self, m: &Matrix) -> Matrix {
        Matrix {
            a: self.a * m.a + self.b * m.c,
            b: self.a * m.b + self.b * m.d,
            c: self.c * m.a + self.d * m.c,
            d: self.c * m.b + self.d * m.d,
            e: self.e * m.a + self.f * m.c + m.e,
            f: self.e * m.b + self.f * m.d + m.f,
        }
    }

    /// Transform a point.
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

/// Text positioning state tracked through a content stream.
///
/// Mirrors the PDF text object model: the text matrix is set by `Tm`,
/// rewound to the line start by `Td`/`TD`/`T*`, and advanced after each
/// shown string. Spacing parameters persist across `BT`/`ET` blocks and
/// are saved/restored by `q`/`Q` together with the CTM.
#[derive(Debug, Clone)]
pub struct TextCursor {
    /// Current transformation matrix (`cm`).
    pub ctm: Matrix,
    /// Character spacing (`Tc`).
    pub char_spacing: f64,
    /// Word spacing (`Tw`), applied at ASCII space characters.
    pub word_spacing: f64,
    /// Horizontal scaling as a fraction (`Tz`; 1.0 = 100%).
    pub h_scaling: f64,
    /// Text leading (`TL`).
    pub leading: f64,
    /// Current font size (`Tf`).
    pub font_size: f64,
    text_matrix: Matrix,
    line_matrix: Matrix,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCursor {
    /// A cursor with the PDF default text state.
    pub fn new() -> Self {
        Self {
            ctm: Matrix::identity(),
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scaling: 1.0,
            leading: 0.0,
            font_size: 0.0,
            text_matrix: Matrix::identity(),
            line_matrix: Matrix::identity(),
        }
    }

    /// The current text matrix.
    pub fn text_matrix(&self) -> &Matrix {
        &self.text_matrix
    }

    /// `BT`: reset text and line matrix to identity.
    pub fn begin_text(&mut self) {
        self.text_matrix = Matrix::identity();
        self.line_matrix = Matrix::identity();
    }

    /// `Tm`: replace the text and line matrix.
    pub fn set_text_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        let m = Matrix { a, b, c, d, e, f };
        self.text_matrix = m;
        self.line_matrix = m;
    }

    /// `Td`: move to the start of the next line, offset from the current
    /// line start by `(tx, ty)`.
    pub fn move_text_position(&mut self, tx: f64, ty: f64) {
        self.line_matrix = Matrix::translation(tx, ty).concat(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    /// `TD`: like `Td`, but also sets leading to `-ty`.
    pub fn move_text_position_and_set_leading(&mut self, tx: f64, ty: f64) {
        self.leading = -ty;
        self.move_text_position(tx, ty);
    }

    /// `T*`: move to the start of the next line using the current leading.
    pub fn move_to_next_line(&mut self) {
        let leading = self.leading;
        self.move_text_position(0.0, -leading);
    }

    /// The device-space pen position: the text-space origin mapped through
    /// the text matrix and the CTM.
    pub fn device_position(&self) -> (f64, f64) {
        self.text_matrix.concat(&self.ctm).transform_point(0.0, 0.0)
    }

    /// Advance the text matrix horizontally by `tx` text-space units after
    /// showing text. The line matrix stays at the line start.
    pub fn advance(&mut self, tx: f64) {
        self.text_matrix = Matrix::translation(tx, 0.0).concat(&self.text_matrix);
    }

    /// Apply a `TJ` kern adjustment (thousandths of text space).
    pub fn kern(&mut self, amount: f64) {
        let tx = -amount / 1000.0 * self.font_size * self.h_scaling;
        self.advance(tx);
    }

    /// Estimate the pen advance for a shown string.
    ///
    /// Each character contributes `font_size` scaled by a width class: half
    /// for ASCII, full for everything else. Character spacing applies per
    /// character, word spacing at ASCII spaces.
    pub fn advance_for(&self, text: &str) -> f64 {
        let mut advance = 0.0;
        for ch in text.chars() {
            let class = if ch.is_ascii() { 0.5 } else { 1.0 };
            let mut tx = class * self.font_size + self.char_spacing;
            if ch == ' ' {
                tx += self.word_spacing;
            }
            advance += tx * self.h_scaling;
        }
        advance
    }
}

/// One frame of saved graphics state for `q`/`Q`.
#[derive(Debug, Clone)]
struct StateFrame {
    cursor: TextCursor,
    font: Option<Vec<u8>>,
}

/// Walk a decoded content stream and collect positioned text runs.
///
/// `fonts` maps resource font names (the operand of `Tf`) to their string
/// decoders; strings shown under an unknown font decode as WinAnsi.
/// `media_box` is `(x0, y0, x1, y1)` in PDF bottom-left coordinates; run
/// positions are converted to top-left page coordinates against it.
pub fn extract_runs(
    content: &Content,
    fonts: &HashMap<Vec<u8>, FontDecoder>,
    media_box: (f64, f64, f64, f64),
) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut cursor = TextCursor::new();
    let mut current_font: Option<Vec<u8>> = None;
    let mut state_stack: Vec<StateFrame> = Vec::new();
    let (page_left, _, _, page_top) = media_box;

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => cursor.begin_text(),
            "ET" => {}
            "q" => state_stack.push(StateFrame {
                cursor: cursor.clone(),
                font: current_font.clone(),
            }),
            "Q" => {
                if let Some(frame) = state_stack.pop() {
                    cursor = frame.cursor;
                    current_font = frame.font;
                }
            }
            "cm" => {
                if let [a, b, c, d, e, f] = nums(operands)[..] {
                    cursor.ctm = Matrix { a, b, c, d, e, f }.concat(&cursor.ctm);
                }
            }
            "Tf" => {
                if operands.len() == 2 {
                    if let Ok(name) = operands[0].as_name() {
                        current_font = Some(name.to_vec());
                    }
                    if let Some(size) = num(operands.get(1)) {
                        cursor.font_size = size;
                    }
                }
            }
            "Tc" => {
                if let Some(v) = num(operands.first()) {
                    cursor.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some(v) = num(operands.first()) {
                    cursor.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some(v) = num(operands.first()) {
                    cursor.h_scaling = v / 100.0;
                }
            }
            "TL" => {
                if let Some(v) = num(operands.first()) {
                    cursor.leading = v;
                }
            }
            "Td" => {
                if let [tx, ty] = nums(operands)[..] {
                    cursor.move_text_position(tx, ty);
                }
            }
            "TD" => {
                if let [tx, ty] = nums(operands)[..] {
                    cursor.move_text_position_and_set_leading(tx, ty);
                }
            }
            "Tm" => {
                if let [a, b, c, d, e, f] = nums(operands)[..] {
                    cursor.set_text_matrix(a, b, c, d, e, f);
                }
            }
            "T*" => cursor.move_to_next_line(),
            "Tj" => {
                if let Some(lopdf::Object::String(bytes, _)) = operands.first() {
                    show_string(
                        bytes,
                        &mut cursor,
                        &current_font,
                        fonts,
                        page_left,
                        page_top,
                        &mut runs,
                    );
                }
            }
            "'" => {
                cursor.move_to_next_line();
                if let Some(lopdf::Object::String(bytes, _)) = operands.first() {
                    show_string(
                        bytes,
                        &mut cursor,
                        &current_font,
                        fonts,
                        page_left,
                        page_top,
                        &mut runs,
                    );
                }
            }
            "\"" => {
                if let Some(v) = num(operands.first()) {
                    cursor.word_spacing = v;
                }
                if let Some(v) = num(operands.get(1)) {
                    cursor.char_spacing = v;
                }
                cursor.move_to_next_line();
                if let Some(lopdf::Object::String(bytes, _)) = operands.get(2) {
                    show_string(
                        bytes,
                        &mut cursor,
                        &current_font,
                        fonts,
                        page_left,
                        page_top,
                        &mut runs,
                    );
                }
            }
            "TJ" => {
                // One run per TJ array; kern adjustments move the pen
                // between elements but the array reads as one emission.
                if let Some(lopdf::Object::Array(elements)) = operands.first() {
                    show_tj_array(
                        elements,
                        &mut cursor,
                        &current_font,
                        fonts,
                        page_left,
                        page_top,
                        &mut runs,
                    );
                }
            }
            _ => {}
        }
    }

    runs
}

/// Decode and emit one shown string, then advance the pen.
fn show_string(
    bytes: &[u8],
    cursor: &mut TextCursor,
    current_font: &Option<Vec<u8>>,
    fonts: &HashMap<Vec<u8>, FontDecoder>,
    page_left: f64,
    page_top: f64,
    runs: &mut Vec<TextRun>,
) {
    let text = decode_with(current_font, fonts, bytes);
    let (x, y) = cursor.device_position();
    cursor.advance(cursor.advance_for(&text));
    if !text.is_empty() {
        runs.push(TextRun {
            text,
            x0: x - page_left,
            top: page_top - y,
        });
    }
}

/// Emit one run for a TJ array, applying kerns between its elements.
fn show_tj_array(
    elements: &[lopdf::Object],
    cursor: &mut TextCursor,
    current_font: &Option<Vec<u8>>,
    fonts: &HashMap<Vec<u8>, FontDecoder>,
    page_left: f64,
    page_top: f64,
    runs: &mut Vec<TextRun>,
) {
    let (x, y) = cursor.device_position();
    let mut text = String::new();
    for element in elements {
        match element {
            lopdf::Object::String(bytes, _) => {
                let piece = decode_with(current_font, fonts, bytes);
                cursor.advance(cursor.advance_for(&piece));
                text.push_str(&piece);
            }
            lopdf::Object::Integer(i) => cursor.kern(*i as f64),
            lopdf::Object::Real(r) => cursor.kern(f64::from(*r)),
            _ => {}
        }
    }
    if !text.is_empty() {
        runs.push(TextRun {
            text,
            x0: x - page_left,
            top: page_top - y,
        });
    }
}

fn decode_with(
    current_font: &Option<Vec<u8>>,
    fonts: &HashMap<Vec<u8>, FontDecoder>,
    bytes: &[u8],
) -> String {
    match current_font.as_ref().and_then(|name| fonts.get(name)) {
        Some(decoder) => decoder.decode(bytes),
        None => FontDecoder::WinAnsi.decode(bytes),
    }
}

fn num(obj: Option<&lopdf::Object>) -> Option<f64> {
    match obj {
        Some(lopdf::Object::Integer(i)) => Some(*i as f64),
        Some(lopdf::Object::Real(r)) => Some(f64::from(*r)),
        _ => None,
    }
}

fn nums(operands: &[lopdf::Object]) -> Vec<f64> {
    operands.iter().filter_map(|o| num(Some(o))).collect()
}
