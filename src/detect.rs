//! Intake for boxes found by external detectors (faces, text).
//!
//! Detection itself happens elsewhere; this module only grows, filters and
//! hands the boxes over to the editor as one batch.

use egui::{Pos2, Rect, Vec2};

/// Default overlap above which a new box counts as already covered.
pub const DOMINANCE_THRESHOLD: f32 = 0.3;
pub const FACE_PADDING: BoxPadding = BoxPadding::Relative(0.1);
pub const TEXT_PADDING: BoxPadding = BoxPadding::Absolute(4.0);

/// One candidate box in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedBox {
    pub rect: Rect,
}

impl DetectedBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::from_min_size(Pos2::new(x, y), Vec2::new(width, height)),
        }
    }

    pub fn area(&self) -> f32 {
        self.rect.width() * self.rect.height()
    }

    pub fn padded(&self, padding: BoxPadding) -> Rect {
        let grow = match padding {
            BoxPadding::None => Vec2::ZERO,
            BoxPadding::Relative(f) => self.rect.size() * f,
            BoxPadding::Absolute(px) => Vec2::splat(px),
        };
        self.rect.expand2(grow)
    }

    fn overlap_area(&self, other: &DetectedBox) -> f32 {
        let i = self.rect.intersect(other.rect);
        if i.is_positive() { i.width() * i.height() } else { 0.0 }
    }
}

/// How much to grow each side of a detected box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoxPadding {
    #[default]
    None,
    /// Fraction of the box's own width/height, per side.
    Relative(f32),
    /// Fixed pixels per side.
    Absolute(f32),
}

/// Drops boxes that mostly repeat an earlier one: a box is kept only if its
/// overlap with every kept box is at most `threshold` of the smaller area.
pub fn suppress_dominated(boxes: &[DetectedBox], threshold: f32) -> Vec<DetectedBox> {
    let mut kept: Vec<DetectedBox> = Vec::with_capacity(boxes.len());
    for candidate in boxes {
        let dominated = kept
            .iter()
            .any(|k| candidate.overlap_area(k) > k.area().min(candidate.area()) * threshold);
        if !dominated {
            kept.push(*candidate);
        }
    }
    if kept.len() != boxes.len() {
        log::debug!("Suppressed {} overlapping detections", boxes.len() - kept.len());
    }
    kept
}

/// A recognised word and where it sits, as produced by a text recogniser.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedWord {
    pub text: String,
    pub rect: Rect,
}

/// Boxes of the words that contain something shaped like an email address.
pub fn email_boxes(words: &[RecognizedWord]) -> Vec<DetectedBox> {
    words
        .iter()
        .filter(|w| contains_email(&w.text))
        .map(|w| DetectedBox { rect: w.rect })
        .collect()
}

/// `local@domain.tld` somewhere in `text`, with a top-level domain of at least
/// two letters.
pub fn contains_email(text: &str) -> bool {
    let is_local = |c: char| c.is_ascii_alphanumeric() || "._%+-".contains(c);
    let is_domain = |c: char| c.is_ascii_alphanumeric() || ".-".contains(c);

    text.char_indices().filter(|(_, c)| *c == '@').any(|(at, _)| {
        let local_ok = text[..at].chars().next_back().is_some_and(is_local);
        let domain: String = text[at + 1..].chars().take_while(|c| is_domain(*c)).collect();
        local_ok
            && domain.char_indices().filter(|(_, c)| *c == '.').any(|(dot, _)| {
                dot > 0 && domain[dot + 1..].chars().take_while(char::is_ascii_alphabetic).count() >= 2
            })
    })
}
