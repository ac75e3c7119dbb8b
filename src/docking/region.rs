use egui::{Pos2, Rect};

/// One of the five insertion zones of a hovered container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DockRegion {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl DockRegion {
    pub const ALL: [Self; 5] = [Self::Left, Self::Right, Self::Top, Self::Bottom, Self::Center];

    /// Left/Right split side by side, Top/Bottom stack.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Whether the new container goes before the existing one in the split.
    pub fn inserts_first(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }
}

/// Fraction of the smaller side used to inset the center zone.
pub const CENTER_INSET_FRACTION: f32 = 0.25;

/// Map a point to an insertion region of `rect`.
///
/// The center zone is `rect` shrunk on every side by a quarter of its smaller dimension. Outside
/// of it, the two diagonals split the rectangle into four triangles.
///
/// The comparisons are cross-multiplied so that points exactly on a diagonal resolve the same way
/// regardless of rounding. Evaluation order is Top, Bottom, then Left/Right, so a point on a
/// diagonal belongs to Top (upper half) or Bottom (lower half), never to Left/Right.
pub fn resolve_region(rect: Rect, point: Pos2) -> DockRegion {
    let inset = CENTER_INSET_FRACTION * rect.width().min(rect.height());
    if rect.shrink(inset.max(0.0)).contains(point) {
        return DockRegion::Center;
    }

    let w = rect.width();
    let h = rect.height();
    let dx = point.x - rect.left();
    let dy = point.y - rect.top();

    let dy_w = dy * w;
    let main_diagonal = dx * h; // top-left → bottom-right
    let anti_diagonal = (w - dx) * h; // top-right → bottom-left

    if dy_w <= main_diagonal && dy_w <= anti_diagonal {
        DockRegion::Top
    } else if dy_w >= main_diagonal && dy_w >= anti_diagonal {
        DockRegion::Bottom
    } else if dx < w * 0.5 {
        DockRegion::Left
    } else {
        DockRegion::Right
    }
}

/// The highlight shown for `region`: half of `rect` on that side, or all of it for Center.
pub fn region_preview_rect(rect: Rect, region: DockRegion) -> Rect {
    match region {
        DockRegion::Left => rect.split_left_right_at_fraction(0.5).0,
        DockRegion::Right => rect.split_left_right_at_fraction(0.5).1,
        DockRegion::Top => rect.split_top_bottom_at_fraction(0.5).0,
        DockRegion::Bottom => rect.split_top_bottom_at_fraction(0.5).1,
        DockRegion::Center => rect,
    }
}
