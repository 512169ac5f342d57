/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// current screen.  No game logic is performed; this module only translates
/// state into terminal commands.  The world (y grows upward) is scaled onto
/// whatever terminal size the caller passes in.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::assets::{Art, Sprites, Star};
use crate::entities::{GameState, Laser, Ship, Side};
use crate::screen::Screen;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BLUE: Color = Color::Blue;
const C_RED: Color = Color::Red;
const C_BLUE_LASER: Color = Color::Cyan;
const C_RED_LASER: Color = Color::Magenta;
const C_HUD: Color = Color::White;
const C_STAR: Color = Color::DarkGrey;
const C_STAR_BRIGHT: Color = Color::Grey;
const C_TITLE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

pub const CONTROLS_HINT: &str =
    "P1: ← → move, RShift/↑ fire   P2: A E move, LShift/Z fire   Q: quit";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world coordinates onto terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_width: f32,
    pub world_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: f32, world_height: f32) -> Self {
        Self {
            cols,
            rows,
            world_width,
            world_height,
        }
    }

    /// Cell (column, row) containing a world point.  May fall outside the
    /// terminal; drawing clips per character.
    pub fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let col = (x / self.world_width * self.cols as f32).floor() as i32;
        let row = ((self.world_height - y) / self.world_height * self.rows as f32).floor() as i32;
        (col, row)
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame of whichever screen is active.
pub fn render<W: Write>(
    out: &mut W,
    screen: &Screen,
    sprites: &Sprites,
    stars: &[Star],
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match screen {
        Screen::Title => draw_title(out, sprites, view)?,
        Screen::Game(state) => draw_game(out, state, sprites, stars, view)?,
        Screen::GameOver { winner } => draw_game_over(out, *winner, view)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Title ─────────────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, sprites: &Sprites, view: &Viewport) -> std::io::Result<()> {
    let cx = (view.cols / 2) as i32;
    let cy = (view.rows / 2) as i32;
    let art = &sprites.title;

    out.queue(style::SetForegroundColor(C_TITLE))?;
    draw_art(out, art, cx, cy - 2, view)?;

    let below = cy - 2 + art.height() as i32 / 2 + 2;
    out.queue(style::SetForegroundColor(C_HUD))?;
    draw_centered(out, "Press ENTER to start", below, view)?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    draw_centered(out, CONTROLS_HINT, below + 2, view)?;
    Ok(())
}

// ── Game ──────────────────────────────────────────────────────────────────────

fn draw_game<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &Sprites,
    stars: &[Star],
    view: &Viewport,
) -> std::io::Result<()> {
    for star in stars {
        let (col, row) = view.to_cell(star.x, star.y);
        if view.contains(col, row) {
            let color = if star.bright { C_STAR_BRIGHT } else { C_STAR };
            out.queue(style::SetForegroundColor(color))?;
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print('.'))?;
        }
    }

    for ship in [&state.blue, &state.red] {
        if ship.alive {
            draw_ship(out, ship, sprites, view)?;
        }
    }
    for laser in &state.lasers {
        draw_laser(out, laser, sprites, view)?;
    }

    draw_hud(out, state, view)
}

fn draw_ship<W: Write>(
    out: &mut W,
    ship: &Ship,
    sprites: &Sprites,
    view: &Viewport,
) -> std::io::Result<()> {
    let (art, color) = match ship.side {
        Side::Blue => (&sprites.blue_ship, C_BLUE),
        Side::Red => (&sprites.red_ship, C_RED),
    };
    let (col, row) = view.to_cell(ship.x, ship.y);
    out.queue(style::SetForegroundColor(color))?;
    draw_art(out, art, col, row, view)
}

fn draw_laser<W: Write>(
    out: &mut W,
    laser: &Laser,
    sprites: &Sprites,
    view: &Viewport,
) -> std::io::Result<()> {
    let (art, color) = match laser.side {
        Side::Blue => (&sprites.blue_laser, C_BLUE_LASER),
        Side::Red => (&sprites.red_laser, C_RED_LASER),
    };
    let (col, row) = view.to_cell(laser.x, laser.y);
    out.queue(style::SetForegroundColor(color))?;
    draw_art(out, art, col, row, view)
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Player 2's lives on the top row, player 1's on the bottom row.
fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HUD))?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(format!("P2 Lives: {}", state.red.health)))?;

    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(Print(format!("P1 Lives: {}", state.blue.health)))?;
    Ok(())
}

// ── Game-over ─────────────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, winner: Side, view: &Viewport) -> std::io::Result<()> {
    let winner_line = format!("{} WINS!", winner.label());
    let lines: &[(&str, Color)] = &[
        ("GAME OVER", C_HUD),
        (&winner_line, winner_color(winner)),
        ("(Press 'ENTER' to play again)", C_HUD),
    ];

    let start_row = (view.rows / 2) as i32 - lines.len() as i32 / 2;
    for (i, (msg, color)) in lines.iter().enumerate() {
        out.queue(style::SetForegroundColor(*color))?;
        draw_centered(out, msg, start_row + i as i32, view)?;
    }
    Ok(())
}

fn winner_color(side: Side) -> Color {
    match side {
        Side::Blue => C_BLUE,
        Side::Red => C_RED,
    }
}

// ── Primitives ────────────────────────────────────────────────────────────────

/// Draw `art` centred on cell (col, row), skipping cells outside the terminal.
fn draw_art<W: Write>(
    out: &mut W,
    art: &Art,
    col: i32,
    row: i32,
    view: &Viewport,
) -> std::io::Result<()> {
    let left = col - art.width() as i32 / 2;
    let top = row - art.height() as i32 / 2;

    for (dy, line) in art.lines.iter().enumerate() {
        let y = top + dy as i32;
        // Runs of visible characters are printed in one go; spaces stay transparent.
        let mut run = String::new();
        let mut run_start = 0;
        for (dx, ch) in line.chars().enumerate() {
            let x = left + dx as i32;
            if ch != ' ' && view.contains(x, y) {
                if run.is_empty() {
                    run_start = x;
                }
                run.push(ch);
            } else if !run.is_empty() {
                print_at(out, run_start, y, &run)?;
                run.clear();
            }
        }
        if !run.is_empty() {
            print_at(out, run_start, y, &run)?;
        }
    }
    Ok(())
}

fn draw_centered<W: Write>(out: &mut W, msg: &str, row: i32, view: &Viewport) -> std::io::Result<()> {
    if row < 0 || row >= view.rows as i32 {
        return Ok(());
    }
    let col = (view.cols / 2).saturating_sub(msg.chars().count() as u16 / 2);
    let visible: String = msg.chars().take(view.cols.saturating_sub(col) as usize).collect();
    print_at(out, col as i32, row, &visible)
}

fn print_at<W: Write>(out: &mut W, col: i32, row: i32, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(Print(text))?;
    Ok(())
}
