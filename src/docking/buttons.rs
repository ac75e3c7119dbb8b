use egui::{Pos2, Rect, Vec2};

/// The four action buttons overlaid on a container's caption bar, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptionButton {
    Float,
    MaximizeRestore,
    Minimize,
    Close,
}

impl CaptionButton {
    pub const ALL: [Self; 4] = [Self::Float, Self::MaximizeRestore, Self::Minimize, Self::Close];
}

const BUTTON_PADDING: f32 = 2.0;

/// Button rects inside `caption_rect`, right-aligned squares in [`CaptionButton::ALL`] order.
///
/// Empty when the caption is too narrow to hold all four.
pub(crate) fn caption_button_rects(caption_rect: Rect) -> Vec<(CaptionButton, Rect)> {
    let side = (caption_rect.height() - 2.0 * BUTTON_PADDING).max(0.0);
    let needed = CaptionButton::ALL.len() as f32 * (side + BUTTON_PADDING) + BUTTON_PADDING;
    if side <= 0.0 || caption_rect.width() < needed {
        return Vec::new();
    }

    let first_left = caption_rect.right() - needed + BUTTON_PADDING;
    CaptionButton::ALL
        .iter()
        .enumerate()
        .map(|(i, &button)| {
            let min = Pos2::new(
                first_left + i as f32 * (side + BUTTON_PADDING),
                caption_rect.top() + BUTTON_PADDING,
            );
            (button, Rect::from_min_size(min, Vec2::splat(side)))
        })
        .collect()
}

pub(crate) fn caption_button_at(caption_rect: Rect, pos: Pos2) -> Option<CaptionButton> {
    if !caption_rect.contains(pos) {
        return None;
    }
    caption_button_rects(caption_rect)
        .into_iter()
        .find(|(_, rect)| rect.contains(pos))
        .map(|(button, _)| button)
}
