//! Helpers for render tests

use ratatui::buffer::Buffer;

/// Buffer contents as plain text, one line per row
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .map(|x| buffer[(x, area.y + y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
