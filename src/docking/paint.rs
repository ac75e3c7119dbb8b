use egui::epaint::RectShape;
use egui::{Color32, Pos2, Rect, Shape, Stroke, StrokeKind, Visuals};

use super::buttons::CaptionButton;
use super::container::DockContainer;
use super::preview::DockPreview;
use super::types::PageContent;

/// Paint the drag overlay: region highlight, insertion caret and ghost.
///
/// The ghost is only a frame; its label is left to the caller so no fonts are needed here.
pub fn paint_dock_preview(painter: &egui::Painter, visuals: &Visuals, preview: &DockPreview) {
    painter.extend(dock_preview_shapes(visuals, preview));
}

/// Paint the four caption buttons of a container.
pub fn paint_caption_buttons<C: PageContent>(
    painter: &egui::Painter,
    visuals: &Visuals,
    container: &DockContainer<C>,
    hovered: Option<CaptionButton>,
    maximized: bool,
) {
    painter.extend(caption_button_shapes(visuals, container, hovered, maximized));
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(crate) fn dock_preview_shapes(visuals: &Visuals, preview: &DockPreview) -> Vec<Shape> {
    let mut shapes = Vec::new();

    if let Some(region) = &preview.region
        && region.rect.is_positive()
    {
        let stroke = visuals.selection.stroke;
        let base = visuals.selection.bg_fill;
        let fill = with_alpha(base, ((base.a() as f32) * 0.45) as u8);
        shapes.push(Shape::Rect(RectShape::new(
            region.rect,
            1.0,
            fill,
            stroke,
            StrokeKind::Inside,
        )));
    }

    if let Some(insertion) = &preview.insertion
        && insertion.strip_rect.is_positive()
    {
        let stroke = Stroke::new(2.0, visuals.selection.stroke.color);
        let x = insertion
            .caret_x
            .clamp(insertion.strip_rect.left(), insertion.strip_rect.right());
        shapes.push(Shape::line_segment(
            [
                Pos2::new(x, insertion.strip_rect.top() + 2.0),
                Pos2::new(x, insertion.strip_rect.bottom() - 2.0),
            ],
            stroke,
        ));
    }

    if let Some(ghost) = &preview.ghost {
        let opacity = ghost.opacity.clamp(0.0, 1.0);
        let fill = visuals.window_fill().gamma_multiply(opacity);
        let stroke = Stroke::new(
            1.0,
            visuals.selection.stroke.color.gamma_multiply(opacity),
        );
        shapes.push(Shape::Rect(RectShape::new(
            ghost.rect,
            4.0,
            fill,
            stroke,
            StrokeKind::Inside,
        )));
    }

    shapes
}

pub(crate) fn caption_button_shapes<C: PageContent>(
    visuals: &Visuals,
    container: &DockContainer<C>,
    hovered: Option<CaptionButton>,
    maximized: bool,
) -> Vec<Shape> {
    let mut shapes = Vec::new();
    for (button, rect) in container.caption_buttons() {
        let is_hovered = hovered == Some(button);
        let widget = if is_hovered {
            &visuals.widgets.hovered
        } else {
            &visuals.widgets.inactive
        };
        if is_hovered {
            shapes.push(Shape::rect_filled(rect, 2.0, widget.weak_bg_fill));
        }
        let stroke = Stroke::new(1.0, widget.fg_stroke.color);
        let icon = rect.shrink(rect.width() * 0.25);
        paint_button_icon(&mut shapes, icon, button, maximized, stroke);
    }
    shapes
}

fn paint_button_icon(
    shapes: &mut Vec<Shape>,
    icon: Rect,
    button: CaptionButton,
    maximized: bool,
    stroke: Stroke,
) {
    match button {
        CaptionButton::Float => {
            // A small window lifted off a larger one.
            let back = Rect::from_min_max(icon.min, icon.center());
            let front = Rect::from_min_max(icon.center() - icon.size() * 0.25, icon.max);
            shapes.push(Shape::rect_stroke(back, 0.0, stroke, StrokeKind::Inside));
            shapes.push(Shape::rect_stroke(front, 0.0, stroke, StrokeKind::Inside));
        }
        CaptionButton::MaximizeRestore => {
            if maximized {
                let offset = icon.width() * 0.25;
                let back = Rect::from_min_max(
                    Pos2::new(icon.left() + offset, icon.top()),
                    Pos2::new(icon.right(), icon.bottom() - offset),
                );
                let front = Rect::from_min_max(
                    Pos2::new(icon.left(), icon.top() + offset),
                    Pos2::new(icon.right() - offset, icon.bottom()),
                );
                shapes.push(Shape::rect_stroke(back, 0.0, stroke, StrokeKind::Inside));
                shapes.push(Shape::rect_stroke(front, 0.0, stroke, StrokeKind::Inside));
            } else {
                shapes.push(Shape::rect_stroke(icon, 0.0, stroke, StrokeKind::Inside));
            }
        }
        CaptionButton::Minimize => {
            shapes.push(Shape::line_segment(
                [icon.left_bottom(), icon.right_bottom()],
                stroke,
            ));
        }
        CaptionButton::Close => {
            shapes.push(Shape::line_segment([icon.left_top(), icon.right_bottom()], stroke));
            shapes.push(Shape::line_segment([icon.right_top(), icon.left_bottom()], stroke));
        }
    }
}
