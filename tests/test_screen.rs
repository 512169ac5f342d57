use space_duel::compute::init_state;
use space_duel::config::GameConfig;
use space_duel::entities::*;
use space_duel::input::Command;
use space_duel::screen::Screen;

fn config() -> GameConfig {
    GameConfig::default()
}

fn game_state(screen: &Screen) -> &GameState {
    match screen {
        Screen::Game(state) => state,
        other => panic!("expected the game screen, got {:?}", other),
    }
}

/// A game screen where Red is one hit from defeat and a Blue laser is about
/// to land.
fn red_about_to_lose() -> Screen {
    let mut state = init_state(&config());
    state.red.health = 1;
    state.lasers.push(Laser { side: Side::Blue, x: 500.0, y: 740.0, vy: 10.0 });
    Screen::Game(state)
}

// ── Title ─────────────────────────────────────────────────────────────────────

#[test]
fn title_confirm_starts_a_fresh_game() {
    let screen = Screen::Title.handle(Command::Confirm, &config());
    assert_eq!(screen, Screen::Game(init_state(&config())));
}

#[test]
fn title_ignores_gameplay_commands() {
    let cfg = config();
    assert_eq!(Screen::Title.handle(Command::Fire(Side::Blue), &cfg), Screen::Title);
    assert_eq!(
        Screen::Title.handle(Command::Steer(Side::Red, Steer::Left), &cfg),
        Screen::Title
    );
    assert_eq!(Screen::Title.update(&cfg), Screen::Title);
}

// ── Game ──────────────────────────────────────────────────────────────────────

#[test]
fn game_routes_steering_and_firing() {
    let cfg = config();
    let screen = Screen::Game(init_state(&cfg))
        .handle(Command::Steer(Side::Blue, Steer::Right), &cfg)
        .handle(Command::Fire(Side::Red), &cfg);
    let state = game_state(&screen);
    assert_eq!(state.blue.vx, 5.0);
    assert_eq!(state.lasers_of(Side::Red), 1);
}

#[test]
fn confirm_during_play_is_ignored() {
    let cfg = config();
    let before = Screen::Game(init_state(&cfg)).handle(Command::Fire(Side::Blue), &cfg);
    let after = before.clone().handle(Command::Confirm, &cfg);
    assert_eq!(after, before);
}

#[test]
fn update_advances_the_game() {
    let cfg = config();
    let screen = Screen::Game(init_state(&cfg)).update(&cfg);
    assert_eq!(game_state(&screen).frame, 1);
}

#[test]
fn decisive_hit_moves_to_game_over_with_winner() {
    let screen = red_about_to_lose().update(&config());
    assert_eq!(screen, Screen::GameOver { winner: Side::Blue });
}

#[test]
fn red_can_win_too() {
    let mut state = init_state(&config());
    state.blue.health = 1;
    state.lasers.push(Laser { side: Side::Red, x: 500.0, y: 60.0, vy: -10.0 });
    let screen = Screen::Game(state).update(&config());
    assert_eq!(screen, Screen::GameOver { winner: Side::Red });
}

#[test]
fn non_decisive_hit_stays_in_game() {
    let mut state = init_state(&config());
    state.lasers.push(Laser { side: Side::Blue, x: 500.0, y: 740.0, vy: 10.0 });
    let screen = Screen::Game(state).update(&config());
    assert_eq!(game_state(&screen).red.health, 2);
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn game_over_is_stable_until_confirmed() {
    let cfg = config();
    let screen = Screen::GameOver { winner: Side::Red };
    let screen = screen.update(&cfg).handle(Command::Fire(Side::Blue), &cfg);
    assert_eq!(screen, Screen::GameOver { winner: Side::Red });
}

#[test]
fn game_over_confirm_restarts_from_scratch() {
    let cfg = config();
    let over = red_about_to_lose().update(&cfg);
    let restarted = over.handle(Command::Confirm, &cfg);
    let state = game_state(&restarted);
    assert_eq!(state.red.health, 3);
    assert_eq!(state.blue.health, 3);
    assert!(state.lasers.is_empty());
    assert_eq!(state.frame, 0);
    assert_eq!(state.winner(), None);
}

#[test]
fn quit_is_left_to_the_caller() {
    let cfg = config();
    assert_eq!(Screen::Title.handle(Command::Quit, &cfg), Screen::Title);
    let game = Screen::Game(init_state(&cfg));
    assert_eq!(game.clone().handle(Command::Quit, &cfg), game);
}

#[test]
fn capped_variant_applies_through_the_screen() {
    let cfg = GameConfig {
        laser_cap: Some(3),
        ..GameConfig::default()
    };
    let mut screen = Screen::Title.handle(Command::Confirm, &cfg);
    for _ in 0..5 {
        screen = screen.handle(Command::Fire(Side::Blue), &cfg);
    }
    assert_eq!(game_state(&screen).lasers_of(Side::Blue), 3);
}
