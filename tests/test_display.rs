use space_duel::assets::{Art, Sprites, Star};
use space_duel::compute::init_state;
use space_duel::config::GameConfig;
use space_duel::display::{render, Viewport};
use space_duel::entities::{Laser, Side};
use space_duel::screen::Screen;

fn sprites() -> Sprites {
    Sprites {
        title: Art::parse("*DUEL*"),
        blue_ship: Art::parse(" ^\n<B>"),
        red_ship: Art::parse("<R>\n v"),
        blue_laser: Art::parse("!"),
        red_laser: Art::parse("¡"),
    }
}

fn view() -> Viewport {
    Viewport::new(100, 40, 1000.0, 800.0)
}

fn frame(screen: &Screen, stars: &[Star]) -> String {
    let mut out: Vec<u8> = Vec::new();
    render(&mut out, screen, &sprites(), stars, &view()).unwrap();
    String::from_utf8(out).unwrap()
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn world_origin_maps_to_bottom_left() {
    let v = view();
    assert_eq!(v.to_cell(0.0, 0.0), (0, 40));
    assert_eq!(v.to_cell(0.0, 799.0), (0, 0));
    assert_eq!(v.to_cell(500.0, 400.0), (50, 20));
    assert_eq!(v.to_cell(999.0, 35.0), (99, 38));
}

// ── Screens ───────────────────────────────────────────────────────────────────

#[test]
fn title_shows_art_and_prompt() {
    let text = frame(&Screen::Title, &[]);
    assert!(text.contains("*DUEL*"));
    assert!(text.contains("Press ENTER to start"));
}

#[test]
fn game_shows_both_health_counters() {
    let mut state = init_state(&GameConfig::default());
    state.red.health = 1;
    let text = frame(&Screen::Game(state), &[]);
    assert!(text.contains("P1 Lives: 3"));
    assert!(text.contains("P2 Lives: 1"));
}

#[test]
fn game_draws_ships_lasers_and_stars() {
    let mut state = init_state(&GameConfig::default());
    state.lasers.push(Laser { side: Side::Blue, x: 300.0, y: 400.0, vy: 10.0 });
    state.lasers.push(Laser { side: Side::Red, x: 700.0, y: 400.0, vy: -10.0 });
    let stars = [Star { x: 10.0, y: 10.0, bright: true }];
    let text = frame(&Screen::Game(state), &stars);
    assert!(text.contains("<B>"));
    assert!(text.contains("<R>"));
    assert!(text.contains('!'));
    assert!(text.contains('¡'));
    assert!(text.contains('.'));
}

#[test]
fn wrecked_ship_is_not_drawn() {
    let mut state = init_state(&GameConfig::default());
    state.red.alive = false;
    let text = frame(&Screen::Game(state), &[]);
    assert!(text.contains("<B>"));
    assert!(!text.contains("<R>"));
}

#[test]
fn game_over_names_the_winner() {
    let text = frame(&Screen::GameOver { winner: Side::Red }, &[]);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("RED PLAYER WINS!"));
    assert!(text.contains("(Press 'ENTER' to play again)"));
}

#[test]
fn sprites_off_screen_are_clipped() {
    let mut state = init_state(&GameConfig::default());
    state.lasers.push(Laser { side: Side::Blue, x: 300.0, y: 2000.0, vy: 10.0 });
    let text = frame(&Screen::Game(state), &[]);
    assert!(!text.contains('!'));
}
