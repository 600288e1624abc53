//! Interactive sticker panels: poll, quiz, slider and question.
//!
//! All geometry is in canvas pixels relative to the element's top-left `origin`.

use vello_cpu::kurbo::{Affine, BezPath, Circle, Rect, Shape};

use crate::foundation::core::{PixelPoint, Rgba8};
use crate::render::text::TextPainter;
use crate::scene::slide::{PollContent, QuestionContent, QuizContent, SliderContent};

pub(crate) const QUESTION_SIZE: u32 = 24;
pub(crate) const OPTION_SIZE: u32 = 18;
const HEADER_HEIGHT: u32 = 50;
const ROW_PITCH: u32 = 40;
const ROW_HEIGHT: u32 = 30;
const INSET: u32 = 10;

const PANEL_FILL: Rgba8 = Rgba8::WHITE.with_alpha(230);
const PANEL_OUTLINE: Rgba8 = Rgba8::opaque(0xcc, 0xcc, 0xcc);
const QUESTION_COLOR: Rgba8 = Rgba8::BLACK;
pub(crate) const ROW_FILL: Rgba8 = Rgba8::opaque(0xf0, 0xf0, 0xf0);
pub(crate) const CORRECT_ROW_FILL: Rgba8 = Rgba8::opaque(0xd4, 0xed, 0xda);
const CHECK_COLOR: Rgba8 = Rgba8::opaque(0x28, 0xa7, 0x45);
const OPTION_COLOR: Rgba8 = Rgba8::opaque(0x33, 0x33, 0x33);
const TRACK_COLOR: Rgba8 = Rgba8::opaque(0x9e, 0x9e, 0x9e);
const HANDLE_COLOR: Rgba8 = Rgba8::opaque(0x21, 0x96, 0xf3);
const LABEL_COLOR: Rgba8 = Rgba8::opaque(0x66, 0x66, 0x66);
const PLACEHOLDER_COLOR: Rgba8 = Rgba8::opaque(0x99, 0x99, 0x99);

const TRACK_OFFSET: u32 = 40;
const TRACK_THICKNESS: f64 = 4.0;
const HANDLE_RADIUS: f64 = 15.0;
const HANDLE_RING: f64 = 3.0;
const LABEL_OFFSET: u32 = 65;
const LABEL_RESERVE: u32 = 30;
const ANSWER_BOX_HEIGHT: u32 = 60;
const PLACEHOLDER: &str = "Type something...";

/// Panel height for `n` option rows.
pub(crate) fn panel_height(n: usize) -> u32 {
    HEADER_HEIGHT + ROW_PITCH * n as u32
}

/// Rectangle of option row `i` of a panel at `origin` that is `width` wide.
pub(crate) fn row_rect(origin: PixelPoint, width: u32, i: usize) -> Rect {
    let x = f64::from(origin.x);
    let y = f64::from(origin.y) + f64::from(HEADER_HEIGHT + ROW_PITCH * i as u32);
    Rect::new(
        x + f64::from(INSET),
        y,
        x + f64::from(width.saturating_sub(INSET)),
        y + f64::from(ROW_HEIGHT),
    )
}

fn paint(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn fill(ctx: &mut vello_cpu::RenderContext, r: Rect, c: Rgba8) {
    paint(ctx, c);
    ctx.fill_rect(&r);
}

/// One-pixel outline drawn inside `r`.
fn outline(ctx: &mut vello_cpu::RenderContext, r: Rect, c: Rgba8) {
    paint(ctx, c);
    ctx.fill_rect(&Rect::new(r.x0, r.y0, r.x1, r.y0 + 1.0));
    ctx.fill_rect(&Rect::new(r.x0, r.y1 - 1.0, r.x1, r.y1));
    ctx.fill_rect(&Rect::new(r.x0, r.y0 + 1.0, r.x0 + 1.0, r.y1 - 1.0));
    ctx.fill_rect(&Rect::new(r.x1 - 1.0, r.y0 + 1.0, r.x1, r.y1 - 1.0));
}

fn fill_circle(ctx: &mut vello_cpu::RenderContext, center: (f64, f64), radius: f64, c: Rgba8) {
    paint(ctx, c);
    ctx.fill_path(&Circle::new(center, radius).to_path(0.1));
}

fn panel(ctx: &mut vello_cpu::RenderContext, origin: PixelPoint, width: u32, height: u32) {
    let (x, y) = (f64::from(origin.x), f64::from(origin.y));
    let r = Rect::new(x, y, x + f64::from(width), y + f64::from(height));
    fill(ctx, r, PANEL_FILL);
    outline(ctx, r, PANEL_OUTLINE);
}

fn header(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextPainter,
    question: &str,
    origin: PixelPoint,
) {
    text.draw_line(
        ctx,
        question,
        f64::from(origin.x) + f64::from(INSET),
        f64::from(origin.y) + f64::from(INSET),
        QUESTION_SIZE,
        QUESTION_COLOR,
    );
}

fn option_label(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextPainter,
    label: &str,
    row: Rect,
) {
    text.draw_line(
        ctx,
        label,
        row.x0 + f64::from(INSET),
        row.y0 + 5.0,
        OPTION_SIZE,
        OPTION_COLOR,
    );
}

/// Check mark in a 20×20 box with its top-left at `(x, y)`.
fn check_mark(ctx: &mut vello_cpu::RenderContext, x: f64, y: f64) {
    let mut p = BezPath::new();
    p.move_to((1.0, 10.0));
    p.line_to((4.0, 7.0));
    p.line_to((8.0, 11.0));
    p.line_to((16.0, 2.0));
    p.line_to((19.0, 5.0));
    p.line_to((8.0, 17.0));
    p.close_path();
    paint(ctx, CHECK_COLOR);
    ctx.fill_path(&(Affine::translate((x, y)) * p));
}

pub(crate) fn draw_poll(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextPainter,
    poll: &PollContent,
    origin: PixelPoint,
    width: u32,
) {
    panel(ctx, origin, width, panel_height(poll.options().len()));
    header(ctx, text, poll.question(), origin);
    for (i, opt) in poll.options().iter().enumerate() {
        let row = row_rect(origin, width, i);
        fill(ctx, row, ROW_FILL);
        option_label(ctx, text, opt, row);
    }
}

pub(crate) fn draw_quiz(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextPainter,
    quiz: &QuizContent,
    origin: PixelPoint,
    width: u32,
) {
    panel(ctx, origin, width, panel_height(quiz.options().len()));
    header(ctx, text, quiz.question(), origin);
    for (i, opt) in quiz.options().iter().enumerate() {
        let row = row_rect(origin, width, i);
        if i == quiz.correct_index() {
            fill(ctx, row, CORRECT_ROW_FILL);
            check_mark(ctx, f64::from(origin.x) + f64::from(width) - 30.0, row.y0 + 5.0);
        } else {
            fill(ctx, row, ROW_FILL);
        }
        option_label(ctx, text, opt, row);
    }
}

pub(crate) fn draw_slider(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextPainter,
    slider: &SliderContent,
    origin: PixelPoint,
    width: u32,
) {
    let (x, y) = (f64::from(origin.x), f64::from(origin.y));
    let w = f64::from(width);
    text.draw_shadowed_line(ctx, slider.question(), x, y, QUESTION_SIZE, Rgba8::WHITE);

    let track_y = y + f64::from(TRACK_OFFSET);
    fill(
        ctx,
        Rect::new(
            x,
            track_y - TRACK_THICKNESS / 2.0,
            x + w,
            track_y + TRACK_THICKNESS / 2.0,
        ),
        TRACK_COLOR,
    );
    let center = (x + w / 2.0, track_y);
    fill_circle(ctx, center, HANDLE_RADIUS, Rgba8::WHITE);
    fill_circle(ctx, center, HANDLE_RADIUS - HANDLE_RING, HANDLE_COLOR);

    let label_y = y + f64::from(LABEL_OFFSET);
    text.draw_line(ctx, slider.min_label(), x, label_y, OPTION_SIZE, LABEL_COLOR);
    text.draw_line(
        ctx,
        slider.max_label(),
        x + f64::from(width.saturating_sub(LABEL_RESERVE)),
        label_y,
        OPTION_SIZE,
        LABEL_COLOR,
    );
}

pub(crate) fn draw_question(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextPainter,
    question: &QuestionContent,
    origin: PixelPoint,
    width: u32,
) {
    let height = HEADER_HEIGHT + ANSWER_BOX_HEIGHT + 2 * INSET;
    panel(ctx, origin, width, height);
    header(ctx, text, question.question(), origin);

    let (x, y) = (f64::from(origin.x), f64::from(origin.y));
    let answer = Rect::new(
        x + f64::from(INSET),
        y + f64::from(HEADER_HEIGHT),
        x + f64::from(width.saturating_sub(INSET)),
        y + f64::from(HEADER_HEIGHT + ANSWER_BOX_HEIGHT),
    );
    fill(ctx, answer, ROW_FILL);
    text.draw_line(
        ctx,
        PLACEHOLDER,
        answer.x0 + f64::from(INSET),
        answer.y0 + 20.0,
        OPTION_SIZE,
        PLACEHOLDER_COLOR,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/widgets.rs"]
mod tests;
