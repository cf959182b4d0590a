//! Cell-addressed drawing surface for game renderers
//!
//! Games draw text at (column, row) with a color role and never see
//! terminal colors. [`BufferCanvas`] implements this on a ratatui buffer,
//! clipping anything outside its area.

use arcade_core::themes::ColorRole;
use ratatui::{buffer::Buffer, layout::Rect, style::Modifier};

use super::themes::Palette;

pub trait Canvas {
    /// Draw `text` starting at (x, y) relative to the canvas origin
    fn draw(&mut self, x: u16, y: u16, text: &str, role: ColorRole);

    /// Like [`Canvas::draw`] with extra emphasis
    fn draw_bold(&mut self, x: u16, y: u16, text: &str, role: ColorRole) {
        self.draw(x, y, text, role);
    }

    /// Width and height in cells
    fn size(&self) -> (u16, u16);
}

pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    palette: &'a Palette,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, palette: &'a Palette) -> Self {
        Self { buf, area, palette }
    }

    fn put(&mut self, x: u16, y: u16, text: &str, role: ColorRole, modifier: Modifier) {
        if x >= self.area.width || y >= self.area.height {
            return;
        }
        let max_width = (self.area.width - x) as usize;
        let style = self.palette.style(role).add_modifier(modifier);
        self.buf
            .set_stringn(self.area.x + x, self.area.y + y, text, max_width, style);
    }
}

impl Canvas for BufferCanvas<'_> {
    fn draw(&mut self, x: u16, y: u16, text: &str, role: ColorRole) {
        self.put(x, y, text, role, Modifier::empty());
    }

    fn draw_bold(&mut self, x: u16, y: u16, text: &str, role: ColorRole) {
        self.put(x, y, text, role, Modifier::BOLD);
    }

    fn size(&self) -> (u16, u16) {
        (self.area.width, self.area.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::themes::builtin;

    #[test]
    fn test_draw_uses_role_color_and_clips() {
        let palette = Palette::from_theme(&builtin::classic());
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        {
            let mut canvas = BufferCanvas::new(&mut buf, area, &palette);
            canvas.draw(5, 0, "ENEMY", ColorRole::Enemy);
            canvas.draw(0, 5, "off-canvas", ColorRole::Text);
            assert_eq!(canvas.size(), (8, 2));
        }
        assert_eq!(buf[(5, 0)].symbol(), "E");
        assert_eq!(buf[(7, 0)].symbol(), "E");
        assert_eq!(buf[(5, 0)].fg, palette.color(ColorRole::Enemy));
        assert_eq!(buf[(0, 1)].symbol(), " ");
    }

    #[test]
    fn test_offset_area() {
        let palette = Palette::from_theme(&builtin::classic());
        let full = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(full);
        {
            let mut canvas = BufferCanvas::new(&mut buf, Rect::new(2, 1, 4, 2), &palette);
            canvas.draw_bold(0, 0, "ab", ColorRole::Player);
        }
        assert_eq!(buf[(2, 1)].symbol(), "a");
        assert!(buf[(2, 1)].modifier.contains(Modifier::BOLD));
    }
}
