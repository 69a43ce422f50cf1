//! TerminalRenderer: draws a [`GameSnapshot`] to a real terminal.
//!
//! Each board cell is two terminal columns wide to compensate for the glyph
//! aspect ratio. Frames are only redrawn when the snapshot or the terminal size
//! changed since the previous draw.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::GameSnapshot;
use crate::types::{Rgb, BOARD_HEIGHT, BOARD_WIDTH};

const CELL_W: u16 = 2;
const EMPTY_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<(GameSnapshot, (u16, u16))>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let size = terminal::size().unwrap_or((80, 24));
        if self.last == Some((*snapshot, size)) {
            return Ok(());
        }

        let frame_w = BOARD_WIDTH as u16 * CELL_W + 2;
        let frame_h = BOARD_HEIGHT as u16 + 2;
        let origin_x = size.0.saturating_sub(frame_w + 24) / 2;
        let origin_y = size.1.saturating_sub(frame_h) / 2;

        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        // Border
        self.stdout.queue(SetForegroundColor(rgb_to_color(BORDER_FG)))?;
        let horizontal = "─".repeat((frame_w - 2) as usize);
        self.stdout.queue(cursor::MoveTo(origin_x, origin_y))?;
        self.stdout.queue(Print(format!("┌{}┐", horizontal)))?;
        self.stdout
            .queue(cursor::MoveTo(origin_x, origin_y + frame_h - 1))?;
        self.stdout.queue(Print(format!("└{}┘", horizontal)))?;
        for row in 1..frame_h - 1 {
            self.stdout.queue(cursor::MoveTo(origin_x, origin_y + row))?;
            self.stdout.queue(Print('│'))?;
            self.stdout
                .queue(cursor::MoveTo(origin_x + frame_w - 1, origin_y + row))?;
            self.stdout.queue(Print('│'))?;
        }

        // Board cells with the active piece on top
        for y in 0..BOARD_HEIGHT as usize {
            self.stdout
                .queue(cursor::MoveTo(origin_x + 1, origin_y + 1 + y as u16))?;
            for x in 0..BOARD_WIDTH as usize {
                let bg = snapshot
                    .cell_at(x, y)
                    .map(|kind| kind.color())
                    .unwrap_or(EMPTY_BG);
                self.stdout.queue(SetBackgroundColor(rgb_to_color(bg)))?;
                self.stdout.queue(Print("  "))?;
            }
        }
        self.stdout.queue(ResetColor)?;

        // Side panel
        let panel_x = origin_x + frame_w + 2;
        for (i, line) in panel_lines(snapshot).iter().enumerate() {
            self.stdout
                .queue(cursor::MoveTo(panel_x, origin_y + 1 + i as u16))?;
            self.stdout.queue(Print(line))?;
        }

        self.stdout.flush()?;
        self.last = Some((*snapshot, size));
        Ok(())
    }
}

/// Text shown next to the board
pub fn panel_lines(snapshot: &GameSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!("Score  {}", snapshot.score),
        format!("High   {}", snapshot.high_score),
        format!("Level  {}", snapshot.level),
        format!("Lines  {}", snapshot.lines),
        String::new(),
        format!("Next   {}", snapshot.next.as_str().to_uppercase()),
        String::new(),
    ];

    if snapshot.game_over {
        lines.push("GAME OVER".to_string());
        lines.push("r: restart  q: quit".to_string());
    } else if snapshot.paused {
        lines.push("PAUSED".to_string());
        lines.push("p: resume".to_string());
    } else {
        lines.push("←/→ move  ↑ rotate".to_string());
        lines.push("↓ soft  space hard".to_string());
        lines.push("p pause  q quit".to_string());
    }
    lines
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_panel_shows_stats() {
        let snapshot = GameSnapshot {
            score: 1200,
            high_score: 4000,
            level: 3,
            lines: 21,
            next: PieceKind::T,
            ..GameSnapshot::default()
        };
        let lines = panel_lines(&snapshot);
        assert_eq!(lines[0], "Score  1200");
        assert_eq!(lines[1], "High   4000");
        assert_eq!(lines[2], "Level  3");
        assert_eq!(lines[3], "Lines  21");
        assert_eq!(lines[5], "Next   T");
    }

    #[test]
    fn test_panel_status() {
        let over = GameSnapshot {
            game_over: true,
            ..GameSnapshot::default()
        };
        assert!(panel_lines(&over).iter().any(|l| l == "GAME OVER"));

        let paused = GameSnapshot {
            paused: true,
            ..GameSnapshot::default()
        };
        assert!(panel_lines(&paused).iter().any(|l| l == "PAUSED"));
    }
}
