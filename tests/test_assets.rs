use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use space_duel::assets::*;
use space_duel::config::GameConfig;
use space_duel::error::GameError;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("space_duel_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ── Art ───────────────────────────────────────────────────────────────────────

#[test]
fn parse_keeps_indent_and_trims_trailing_blank_lines() {
    let art = Art::parse("  ^  \n /#\\\n\n\n");
    assert_eq!(art.lines, vec!["  ^".to_string(), " /#\\".to_string()]);
    assert_eq!(art.width(), 4);
    assert_eq!(art.height(), 2);
}

#[test]
fn flipping_reverses_rows_and_glyphs() {
    let art = Art::parse("  ^\n /#\\\n<===>");
    let flipped = art.flipped_vertically();
    assert_eq!(
        flipped.lines,
        vec!["<===>".to_string(), " \\#/".to_string(), "  v".to_string()]
    );
    assert_eq!(flipped.flipped_vertically(), art);
}

#[test]
fn blank_art_is_empty() {
    assert!(Art::parse("   \n\n").is_empty());
    assert!(!Art::parse(".").is_empty());
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[test]
fn bundled_sprites_load() {
    let sprites = Sprites::load(&GameConfig::default().assets_dir()).unwrap();
    assert!(sprites.title.height() > 0);
    assert!(sprites.blue_ship.width() > 0);
    assert!(sprites.blue_laser.height() > 0);
    assert!(sprites.red_laser.height() > 0);
}

#[test]
fn red_ship_is_stored_facing_down() {
    let dir = GameConfig::default().assets_dir();
    let raw = Art::parse(&std::fs::read_to_string(dir.join("red_ship.txt")).unwrap());
    let sprites = Sprites::load(&dir).unwrap();
    assert_eq!(sprites.red_ship, raw.flipped_vertically());
}

#[test]
fn missing_asset_is_fatal() {
    let dir = scratch_dir("missing");
    let err = Sprites::load(&dir).unwrap_err();
    match err {
        GameError::AssetRead { path, .. } => assert_eq!(path, dir.join("title.txt")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn empty_asset_is_rejected() {
    let dir = scratch_dir("empty");
    for name in ["title.txt", "blue_ship.txt", "red_ship.txt", "blue_laser.txt"] {
        std::fs::write(dir.join(name), "#\n").unwrap();
    }
    std::fs::write(dir.join("red_laser.txt"), "\n  \n").unwrap();
    let err = Sprites::load(&dir).unwrap_err();
    assert!(matches!(err, GameError::EmptyAsset(path) if path == dir.join("red_laser.txt")));
}

// ── Starfield ─────────────────────────────────────────────────────────────────

#[test]
fn starfield_stays_inside_the_world() {
    let mut rng = StdRng::seed_from_u64(42);
    let stars = starfield(&mut rng, 200, 1000.0, 800.0);
    assert_eq!(stars.len(), 200);
    for star in &stars {
        assert!((0.0..1000.0).contains(&star.x));
        assert!((0.0..800.0).contains(&star.y));
    }
}

#[test]
fn starfield_is_reproducible_with_a_seed() {
    let a = starfield(&mut StdRng::seed_from_u64(7), 50, 1000.0, 800.0);
    let b = starfield(&mut StdRng::seed_from_u64(7), 50, 1000.0, 800.0);
    assert_eq!(a, b);
}
