//! Virtual terminal backend for TUI rendering tests.
//!
//! Wraps a `vt100::Parser` so the form is rendered through real ANSI escape
//! sequences; tests then read back the screen text and per-cell colors.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use crossterm::style::{Attribute, Color as CColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{Command, cursor, terminal};
use ratatui::backend::{Backend, ClearType, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};
use ratatui::style::{Color as RColor, Modifier, Style};

pub struct VT100Backend {
    parser: vt100::Parser,
    width: u16,
    height: u16,
}

impl VT100Backend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            parser: vt100::Parser::new(height, width, 0),
            width,
            height,
        }
    }

    pub fn contents(&self) -> String {
        self.parser.screen().contents()
    }

    /// Screen rows, one string per row, without trailing padding.
    pub fn rows(&self) -> Vec<String> {
        self.parser.screen().rows(0, self.width).collect()
    }

    /// `(row, col)` of the first occurrence of `needle` on screen.
    pub fn find(&self, needle: &str) -> Option<(u16, u16)> {
        self.rows().iter().enumerate().find_map(|(row, text)| {
            let byte = text.find(needle)?;
            let col = text[..byte].chars().count();
            Some((row as u16, col as u16))
        })
    }

    pub fn fg_at(&self, row: u16, col: u16) -> Option<vt100::Color> {
        self.parser.screen().cell(row, col).map(vt100::Cell::fgcolor)
    }

    pub fn bg_at(&self, row: u16, col: u16) -> Option<vt100::Color> {
        self.parser.screen().cell(row, col).map(vt100::Cell::bgcolor)
    }

    pub fn bold_at(&self, row: u16, col: u16) -> bool {
        self.parser
            .screen()
            .cell(row, col)
            .is_some_and(vt100::Cell::bold)
    }
}

impl Write for VT100Backend {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.parser.process(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Display for VT100Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.contents())
    }
}

impl Backend for VT100Backend {
    type Error = io::Error;

    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        let mut buf = String::new();
        let mut last_pos: Option<(u16, u16)> = None;
        let mut last_style: Option<Style> = None;

        for (x, y, cell) in content {
            if last_pos != Some((x, y)) {
                let _ = cursor::MoveTo(x, y).write_ansi(&mut buf);
            }

            let cell_style = cell.style();
            if last_style != Some(cell_style) {
                let _ = SetAttribute(Attribute::Reset).write_ansi(&mut buf);
                if cell_style.add_modifier.contains(Modifier::BOLD) {
                    let _ = SetAttribute(Attribute::Bold).write_ansi(&mut buf);
                }
                if let Some(fg) = to_crossterm_color(cell_style.fg) {
                    let _ = SetForegroundColor(fg).write_ansi(&mut buf);
                }
                if let Some(bg) = to_crossterm_color(cell_style.bg) {
                    let _ = SetBackgroundColor(bg).write_ansi(&mut buf);
                }
                last_style = Some(cell_style);
            }

            let _ = write!(buf, "{}", cell.symbol());
            last_pos = Some((x + 1, y));
        }

        self.parser.process(buf.as_bytes());
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        let (row, col) = self.parser.screen().cursor_position();
        Ok(Position::new(col, row))
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        let pos = position.into();
        let mut buf = String::new();
        let _ = cursor::MoveTo(pos.x, pos.y).write_ansi(&mut buf);
        self.parser.process(buf.as_bytes());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        let mut buf = String::new();
        let _ = terminal::Clear(terminal::ClearType::All).write_ansi(&mut buf);
        self.parser.process(buf.as_bytes());
        Ok(())
    }

    fn clear_region(&mut self, _clear_type: ClearType) -> io::Result<()> {
        self.clear()
    }

    fn size(&self) -> io::Result<Size> {
        Ok(Size::new(self.width, self.height))
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        Ok(WindowSize {
            columns_rows: Size::new(self.width, self.height),
            pixels: Size::new(self.width * 8, self.height * 16),
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn to_crossterm_color(color: Option<RColor>) -> Option<CColor> {
    match color? {
        RColor::Reset => None,
        RColor::Black => Some(CColor::Black),
        RColor::Red => Some(CColor::DarkRed),
        RColor::Green => Some(CColor::DarkGreen),
        RColor::Yellow => Some(CColor::DarkYellow),
        RColor::Blue => Some(CColor::DarkBlue),
        RColor::Magenta => Some(CColor::DarkMagenta),
        RColor::Cyan => Some(CColor::DarkCyan),
        RColor::Gray => Some(CColor::Grey),
        RColor::DarkGray => Some(CColor::DarkGrey),
        RColor::LightRed => Some(CColor::Red),
        RColor::LightGreen => Some(CColor::Green),
        RColor::LightYellow => Some(CColor::Yellow),
        RColor::LightBlue => Some(CColor::Blue),
        RColor::LightMagenta => Some(CColor::Magenta),
        RColor::LightCyan => Some(CColor::Cyan),
        RColor::White => Some(CColor::White),
        RColor::Rgb(r, g, b) => Some(CColor::Rgb { r, g, b }),
        RColor::Indexed(i) => Some(CColor::AnsiValue(i)),
    }
}
