use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::thread_rng;

use space_duel::assets::{starfield, Sprites, Star};
use space_duel::config::GameConfig;
use space_duel::display::{self, Viewport};
use space_duel::error::GameError;
use space_duel::input::{command_for, is_interrupt, normalize, Command, HeldKeys, KeyInput};
use space_duel::screen::Screen;

const STAR_COUNT: usize = 120;

// ── Run loop ──────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    sprites: &Sprites,
    reports_release: bool,
) -> Result<(), GameError> {
    let frame_budget = Duration::from_millis(config.frame_millis);
    let mut rng = thread_rng();
    let mut held = HeldKeys::new(reports_release);
    let mut screen = Screen::Title;
    let mut stars: Vec<Star> = Vec::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut inputs: Vec<KeyInput> = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if is_interrupt(code, modifiers) {
                info!("ctrl-c, quitting");
                return Ok(());
            }
            let code = normalize(code);
            match kind {
                KeyEventKind::Press => inputs.extend(held.press(code, frame)),
                KeyEventKind::Repeat => held.refresh(code, frame),
                KeyEventKind::Release => inputs.extend(held.release(code)),
            }
        }
        inputs.extend(held.expire(frame));

        // ── Dispatch commands through the screen machine ──────────────────────
        for input in inputs {
            let Some(command) = command_for(input) else {
                continue;
            };
            if command == Command::Quit {
                info!("quit requested");
                return Ok(());
            }
            let was_playing = matches!(screen, Screen::Game(_));
            screen = screen.handle(command, config);
            if !was_playing && matches!(screen, Screen::Game(_)) {
                stars = starfield(&mut rng, STAR_COUNT, config.width, config.height);
            }
        }

        screen = screen.update(config);

        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, config.width, config.height);
        display::render(out, &screen, sprites, &stars, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &GameConfig) -> Result<(), GameError> {
    let file = File::create(config.log_file())?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn play(config: &GameConfig) -> Result<(), GameError> {
    // Assets are loaded before the terminal is touched so a missing file
    // aborts with a readable message.
    let sprites = Sprites::load(&config.assets_dir())?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle("Space Duel"))?;

    // Key-release events and bare shift keys need the keyboard enhancement
    // protocol (kitty, Ghostty, foot, …).  Other terminals fall back to the
    // hold window and the Up / Z fire keys.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
            ))
            .is_ok();
    if keyboard_enhanced {
        info!("keyboard enhancement enabled");
    } else {
        warn!("keyboard enhancement unavailable, inferring key releases");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, config, &sprites, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn main() {
    let result = GameConfig::from_args(std::env::args().skip(1)).and_then(|config| {
        init_logging(&config)?;
        info!("starting with {:?}", config);
        play(&config)
    });

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("space_duel: {}", e);
        std::process::exit(1);
    }
}
