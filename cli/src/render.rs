//! Terminal drawing with crossterm.
//!
//! Every frame is drawn from a read-only [`Snapshot`]; the renderer keeps no
//! game state of its own.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use tuinty_core::grid::SIZE;
use tuinty_core::{FinalScore, GameState, Snapshot};

use crate::palette::Palette;

pub const TITLE: &str = "A bad implementation of 2048";
const FOOTER: &str = "? help   r reset   arrows/wasd move   q quit";

const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 3;
const GAP: u16 = 1;
const GRID_TOP: u16 = 3;
const GRID_WIDTH: u16 = SIZE as u16 * (CELL_WIDTH + GAP) + GAP;
const GRID_HEIGHT: u16 = SIZE as u16 * (CELL_HEIGHT + GAP) + GAP;

/// Text shown in a cell: the tile value, or nothing for an empty cell.
pub fn cell_label(value: u32) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

pub fn game_over_message(final_score: &FinalScore) -> String {
    format!(
        "Uh oh it seems like you ran out of space :(\n\n\nScore: {}  High Score: {}",
        final_score.score, final_score.high_score
    )
}

pub struct Renderer<W: Write> {
    out: W,
    palette: Palette,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Renderer { out, palette }
    }

    /// Draw the header, the board, the key hints and the game-over banner if any.
    pub fn draw_game(
        &mut self,
        snapshot: &Snapshot,
        game_over: Option<&FinalScore>,
    ) -> io::Result<()> {
        let scores = format!(
            "Score: {}    High Score: {}",
            snapshot.score, snapshot.high_score
        );
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        queue!(
            self.out,
            MoveTo(0, 0),
            SetAttribute(Attribute::Bold),
            Print(TITLE),
            SetAttribute(Attribute::Reset),
            MoveTo(0, 1),
            Print(scores),
        )?;

        self.draw_grid(snapshot)?;

        let below = GRID_TOP + GRID_HEIGHT + 1;
        queue!(self.out, ResetColor, MoveTo(0, below), Print(FOOTER))?;

        if snapshot.state == GameState::GameOver {
            if let Some(final_score) = game_over {
                for (i, line) in game_over_message(final_score).lines().enumerate() {
                    queue!(self.out, MoveTo(0, below + 2 + i as u16), Print(line))?;
                }
            }
        }

        self.out.flush()
    }

    fn draw_grid(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let background: Color = self.palette.grid_background().into();
        let blank = " ".repeat(GRID_WIDTH as usize);
        queue!(self.out, SetBackgroundColor(background))?;
        for row in 0..GRID_HEIGHT {
            queue!(self.out, MoveTo(0, GRID_TOP + row), Print(&blank))?;
        }

        let fill = " ".repeat(CELL_WIDTH as usize);
        for (y, row) in snapshot.grid.rows().iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                let left = GAP + x as u16 * (CELL_WIDTH + GAP);
                let top = GRID_TOP + GAP + y as u16 * (CELL_HEIGHT + GAP);
                let color: Color = self.palette.tile_color(value).into();

                queue!(
                    self.out,
                    SetBackgroundColor(color),
                    SetForegroundColor(Color::White)
                )?;
                for line in 0..CELL_HEIGHT {
                    queue!(self.out, MoveTo(left, top + line), Print(&fill))?;
                }
                let label = format!("{:^width$}", cell_label(value), width = CELL_WIDTH as usize);
                queue!(self.out, MoveTo(left, top + CELL_HEIGHT / 2), Print(label))?;
            }
        }
        queue!(self.out, ResetColor)
    }

    /// Draw the help screen, or the error that kept it from loading.
    pub fn draw_help(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        for (i, line) in text.lines().enumerate() {
            queue!(self.out, MoveTo(0, i as u16), Print(line))?;
        }
        self.out.flush()
    }
}
