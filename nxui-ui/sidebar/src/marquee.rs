use nxui_core::{DrawFrame, TextAlign, ThemeEntry, Vec2, Vec4};

/// Frames the text rests at its start before scrolling.
pub const MARQUEE_DWELL_FRAMES: u32 = 90;

/// Separator drawn between the end of the text and its repeated start.
pub const MARQUEE_GAP: &str = "        ";

/// Horizontal scroll state for text wider than its box.
///
/// Cycle: rest at offset 0 for [`MARQUEE_DWELL_FRAMES`], advance by the
/// scroll speed until the whole loop (text plus [`MARQUEE_GAP`]) has passed,
/// then snap back to 0 and rest again.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Marquee {
    offset: f32,
    tick: u32,
}

impl Marquee {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.tick = 0;
    }

    /// Step one frame for a loop `loop_width` pixels wide.
    pub fn advance(&mut self, loop_width: f32, speed: f32) {
        if self.offset == 0.0 {
            self.tick += 1;
            if self.tick >= MARQUEE_DWELL_FRAMES {
                self.tick = 0;
                self.offset += speed;
            }
        } else if loop_width > self.offset {
            self.offset += speed.min(loop_width - self.offset);
        } else {
            self.offset = 0.0;
        }
    }
}

/// Single line of text that scrolls while focused and too wide to fit.
#[derive(Debug, Default, Clone)]
pub struct ScrollingText {
    marquee: Marquee,
    text: String,
}

impl ScrollingText {
    pub fn offset(&self) -> f32 {
        self.marquee.offset()
    }

    pub fn reset(&mut self) {
        self.marquee.reset();
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        frame: &mut DrawFrame<'_>,
        focus: bool,
        pos: Vec2,
        width: f32,
        font_size: f32,
        align: TextAlign,
        colour: ThemeEntry,
        text: &str,
    ) {
        if self.text != text {
            self.text = text.to_string();
            self.marquee.reset();
        }

        let text_w = frame.renderer.text_width(font_size, text);
        if !focus || text_w <= width {
            self.marquee.reset();
            frame.text(pos, font_size, align, colour, text);
            return;
        }

        let mut looped = format!("{text}{MARQUEE_GAP}");
        let loop_w = frame.renderer.text_width(font_size, &looped);
        self.marquee
            .advance(loop_w, frame.scroll_speed.pixels_per_frame());
        looped.push_str(text);

        frame.renderer.save();
        frame
            .renderer
            .intersect_scissor(Vec4::new(pos.x, pos.y, width, font_size * 1.5));
        frame.text(
            Vec2::new(pos.x - self.marquee.offset(), pos.y),
            font_size,
            align,
            colour,
            &looped,
        );
        frame.renderer.restore();
    }
}
