//! Canvas2D painter for a composed `Frame`.
//!
//! The `<canvas>` element covers the viewport; the frame is drawn in canvas
//! space shifted by the current scroll offset.

use spread_core::GuideAxis;
use spread_render::{Frame, Sprite};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Theme-dependent colors for the spread canvas.
pub struct CanvasTheme {
    pub bg: &'static str,
    pub area: &'static str,
    pub grid: &'static str,
    pub card_fill: &'static str,
    pub card_stroke: &'static str,
    pub card_text: &'static str,
    pub guide: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            bg: "#F5F5F7",
            area: "#FFFFFF",
            grid: "rgba(0, 0, 0, 0.06)",
            card_fill: "#FAFAFC",
            card_stroke: "#C7C7CC",
            card_text: "#3A3A3C",
            guide: "#FF2D92",
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "#1C1C1E",
            area: "#242426",
            grid: "rgba(255, 255, 255, 0.05)",
            card_fill: "#2C2C2E",
            card_stroke: "#48484A",
            card_text: "#E5E5EA",
            guide: "#FF375F",
        }
    }
}

const SELECTION: &str = "#4FC3F7";
const ACTIVE: &str = "#0A84FF";

/// Paint the whole frame into a viewport of `width` × `height` pixels.
pub fn render_frame(ctx: &CanvasRenderingContext2d, frame: &Frame, width: f64, height: f64, theme: &CanvasTheme) {
    ctx.set_fill_style_str(theme.bg);
    ctx.fill_rect(0.0, 0.0, width, height);

    ctx.save();
    let _ = ctx.translate(-frame.scroll_x, -frame.scroll_y);

    let (sw, sh) = (f64::from(frame.surface_width), f64::from(frame.surface_height));
    ctx.set_fill_style_str(theme.area);
    ctx.fill_rect(0.0, 0.0, sw, sh);
    draw_grid(ctx, frame, theme);

    // Bottom first; the frame is already in paint order.
    for sprite in &frame.sprites {
        draw_card(ctx, frame, sprite, theme);
    }

    for guide in &frame.guides {
        let p = f64::from(guide.position) + 0.5;
        let (x0, y0, x1, y1) = match guide.axis {
            GuideAxis::Vertical => (p, 0.0, p, sh),
            GuideAxis::Horizontal => (0.0, p, sw, p),
        };
        draw_guide(ctx, x0, y0, x1, y1, theme);
    }

    if let Some(m) = frame.marquee {
        draw_marquee_rect(
            ctx,
            f64::from(m.left),
            f64::from(m.top),
            f64::from(m.width()),
            f64::from(m.height()),
        );
    }

    ctx.restore();
}

fn draw_grid(ctx: &CanvasRenderingContext2d, frame: &Frame, theme: &CanvasTheme) {
    if frame.grid <= 0 {
        return;
    }
    // Every other grid step keeps the dot field readable.
    let spacing = f64::from(frame.grid * 2);
    ctx.set_fill_style_str(theme.grid);
    let (w, h) = (f64::from(frame.surface_width), f64::from(frame.surface_height));
    let mut x = 0.0;
    while x < w {
        let mut y = 0.0;
        while y < h {
            ctx.fill_rect(x, y, 1.0, 1.0);
            y += spacing;
        }
        x += spacing;
    }
}

fn draw_card(ctx: &CanvasRenderingContext2d, frame: &Frame, sprite: &Sprite, theme: &CanvasTheme) {
    let (w, h) = (f64::from(frame.card_width), f64::from(frame.card_height));
    let (cx, cy) = (f64::from(sprite.x) + w / 2.0, f64::from(sprite.y) + h / 2.0);

    ctx.save();
    // Rotate about the card centre; hit testing ignores rotation.
    let _ = ctx.translate(cx, cy);
    let _ = ctx.rotate(f64::from(sprite.rotation).to_radians());

    if sprite.dragging {
        ctx.set_shadow_color("rgba(0, 0, 0, 0.25)");
        ctx.set_shadow_blur(12.0);
        ctx.set_shadow_offset_y(4.0);
    }
    rounded_rect_path(ctx, -w / 2.0, -h / 2.0, w, h, 6.0);
    ctx.set_fill_style_str(theme.card_fill);
    ctx.fill();
    ctx.set_shadow_color("transparent");

    let (stroke, line) = if sprite.active {
        (ACTIVE, 2.5)
    } else if sprite.selected {
        (SELECTION, 2.0)
    } else {
        (theme.card_stroke, 1.0)
    };
    ctx.set_stroke_style_str(stroke);
    ctx.set_line_width(line);
    ctx.stroke();

    ctx.set_fill_style_str(theme.card_text);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("600 22px Inter, sans-serif");
    let _ = ctx.fill_text(&sprite.number.to_string(), 0.0, -12.0);
    ctx.set_font("500 11px Inter, sans-serif");
    let _ = ctx.fill_text_with_max_width(&sprite.name, 0.0, 14.0, w - 10.0);

    ctx.restore();
}

fn draw_guide(ctx: &CanvasRenderingContext2d, x0: f64, y0: f64, x1: f64, y1: f64, theme: &CanvasTheme) {
    ctx.save();
    ctx.set_stroke_style_str(theme.guide);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(x0, y0);
    ctx.line_to(x1, y1);
    ctx.stroke();
    ctx.restore();
}

/// Draw the marquee (rubber-band) selection rectangle.
fn draw_marquee_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64) {
    if w < 1.0 && h < 1.0 {
        return;
    }

    ctx.save();

    ctx.set_fill_style_str("rgba(79, 195, 247, 0.08)");
    ctx.fill_rect(x, y, w, h);

    ctx.set_stroke_style_str(SELECTION);
    ctx.set_line_width(1.0);
    let _ = ctx.set_line_dash(&js_sys::Array::of2(
        &JsValue::from_f64(4.0),
        &JsValue::from_f64(4.0),
    ));
    ctx.stroke_rect(x, y, w, h);

    ctx.restore();
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    let _ = ctx.arc_to(x + w, y, x + w, y + r, r);
    ctx.line_to(x + w, y + h - r);
    let _ = ctx.arc_to(x + w, y + h, x + w - r, y + h, r);
    ctx.line_to(x + r, y + h);
    let _ = ctx.arc_to(x, y + h, x, y + h - r, r);
    ctx.line_to(x, y + r);
    let _ = ctx.arc_to(x, y, x + r, y, r);
    ctx.close_path();
}
