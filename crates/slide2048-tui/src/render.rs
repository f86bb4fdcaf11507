//! Terminal rendering: the colored grid, the key guide, and the status
//! message, centered in the current terminal size.
//!
//! Drawing queues crossterm commands and flushes once per frame. The engine
//! knows nothing about any of this; it only hands over a board snapshot.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use slide2048_core::{GameState, SIZE};

/// 256-color background for a tile value, plus whether the text is drawn
/// bold on the dark "beyond the palette" background.
fn tile_style(value: u32) -> (Color, bool) {
    let ansi = match value {
        2 => 231,
        4 => 230,
        8 => 216,
        16 => 209,
        32 => 167,
        64 => 203,
        128 => 222,
        256 => 221,
        512 | 1024 => 178,
        2048 => 214,
        _ => return (Color::AnsiValue(237), true),
    };
    (Color::AnsiValue(ansi), false)
}

/// Center `value` in a field of `width` digits; the odd leftover space goes
/// on the left. Empty cells are all spaces.
fn pad_cell(value: u32, width: usize) -> String {
    if value == 0 {
        return " ".repeat(width);
    }
    let num = value.to_string();
    let remaining = width - num.len();
    let side = remaining / 2;
    let mut padded = format!("{}{}{}", " ".repeat(side), num, " ".repeat(side));
    if remaining % 2 != 0 {
        padded.insert(0, ' ');
    }
    padded
}

fn guide_line(can_undo: bool) -> String {
    let mut guide = String::from("q - quit, arrows/vim keys/wasd - move, r - restart");
    if can_undo {
        guide.push_str(", b - undo");
    }
    guide
}

/// Redraw the whole screen for the current game state.
pub fn draw(out: &mut impl Write, game: &GameState) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let (cols, rows) = (cols as usize, rows as usize);

    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let board = game.board();
    // Cell width tracks the widest value on the board.
    let cell_width = board.max_tile().max(2).to_string().len();
    let grid_width = SIZE * (cell_width + 3) + 1;
    let grid_height = SIZE * 2 + 1;
    let guide = guide_line(game.can_undo());

    if grid_height + 3 > rows || grid_width.max(guide.len()) > cols {
        queue!(
            out,
            Print(format!(
                "Terminal too small to display game state, must be at least {}x{}",
                grid_width.max(guide.len()),
                grid_height + 3
            ))
        )?;
        return out.flush();
    }

    let left = ((cols - grid_width) / 2) as u16;
    let mut y = ((rows - grid_height - 3) / 2) as u16;
    let dashes = "-".repeat(grid_width);

    for row in 0..SIZE {
        queue!(out, MoveTo(left, y), Print(&dashes))?;
        y += 1;
        queue!(out, MoveTo(left, y))?;
        for col in 0..SIZE {
            queue!(out, Print("| "))?;
            let value = board.get(row, col);
            let text = pad_cell(value, cell_width);
            if value == 0 {
                queue!(out, Print(text))?;
            } else {
                let (bg, beyond_palette) = tile_style(value);
                if beyond_palette {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                } else {
                    queue!(out, SetForegroundColor(Color::Black))?;
                }
                queue!(out, SetBackgroundColor(bg), Print(text), ResetColor)?;
                if beyond_palette {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
            }
            queue!(out, Print(" "))?;
        }
        queue!(out, Print("|"))?;
        y += 1;
    }
    queue!(out, MoveTo(left, y), Print(&dashes))?;
    y += 2;

    let guide_left = ((cols - guide.len()) / 2) as u16;
    queue!(out, MoveTo(guide_left, y), Print(&guide))?;
    y += 1;

    let message = game.message();
    if !message.is_empty() {
        let msg_left = ((cols - message.len()) / 2) as u16;
        queue!(out, MoveTo(msg_left, y), Print(message))?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_pads_cells_to_width() {
        assert_eq!(pad_cell(0, 4), "    ");
        assert_eq!(pad_cell(2, 1), "2");
        assert_eq!(pad_cell(2, 4), "  2 ");
        assert_eq!(pad_cell(16, 4), " 16 ");
        assert_eq!(pad_cell(2048, 4), "2048");
        assert_eq!(pad_cell(8, 2), " 8");
    }

    #[test]
    fn it_styles_known_and_overflow_tiles() {
        assert_eq!(tile_style(2), (Color::AnsiValue(231), false));
        assert_eq!(tile_style(512), (Color::AnsiValue(178), false));
        assert_eq!(tile_style(1024), (Color::AnsiValue(178), false));
        assert_eq!(tile_style(2048), (Color::AnsiValue(214), false));
        assert_eq!(tile_style(4096), (Color::AnsiValue(237), true));
    }

    #[test]
    fn it_guide_mentions_undo_only_when_available() {
        assert!(!guide_line(false).contains("b - undo"));
        assert!(guide_line(true).ends_with(", b - undo"));
    }
}
