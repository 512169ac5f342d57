/// Text-art sprites loaded from disk, plus the procedurally scattered
/// background starfield.

use std::path::Path;

use log::info;
use rand::Rng;

use crate::error::GameError;

/// A block of text art.  Lines keep their leading spaces; trailing
/// whitespace is dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Art {
    pub lines: Vec<String>,
}

impl Art {
    pub fn parse(text: &str) -> Art {
        let mut lines: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        while lines.last().map_or(false, |l| l.is_empty()) {
            lines.pop();
        }
        Art { lines }
    }

    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Upside-down copy: rows reversed and direction glyphs swapped.
    pub fn flipped_vertically(&self) -> Art {
        let lines = self
            .lines
            .iter()
            .rev()
            .map(|line| line.chars().map(flip_glyph).collect())
            .collect();
        Art { lines }
    }
}

fn flip_glyph(c: char) -> char {
    match c {
        '^' => 'v',
        'v' => '^',
        '/' => '\\',
        '\\' => '/',
        '▲' => '▼',
        '▼' => '▲',
        '\'' => '.',
        '.' => '\'',
        '`' => ',',
        ',' => '`',
        '_' => '‾',
        '‾' => '_',
        other => other,
    }
}

#[derive(Clone, Debug)]
pub struct Sprites {
    pub title: Art,
    pub blue_ship: Art,
    /// Stored facing down, ready to draw at the top of the screen.
    pub red_ship: Art,
    pub blue_laser: Art,
    pub red_laser: Art,
}

impl Sprites {
    pub fn load(dir: &Path) -> Result<Sprites, GameError> {
        info!("loading sprites from {}", dir.display());
        Ok(Sprites {
            title: load_art(dir, "title.txt")?,
            blue_ship: load_art(dir, "blue_ship.txt")?,
            red_ship: load_art(dir, "red_ship.txt")?.flipped_vertically(),
            blue_laser: load_art(dir, "blue_laser.txt")?,
            red_laser: load_art(dir, "red_laser.txt")?,
        })
    }
}

fn load_art(dir: &Path, name: &str) -> Result<Art, GameError> {
    let path = dir.join(name);
    let text = std::fs::read_to_string(&path).map_err(|source| GameError::AssetRead {
        path: path.clone(),
        source,
    })?;
    let art = Art::parse(&text);
    if art.is_empty() {
        return Err(GameError::EmptyAsset(path));
    }
    Ok(art)
}

// ── Starfield ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// World coordinates.
    pub x: f32,
    pub y: f32,
    pub bright: bool,
}

pub fn starfield(rng: &mut impl Rng, count: usize, width: f32, height: f32) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            bright: rng.gen_bool(0.2),
        })
        .collect()
}
