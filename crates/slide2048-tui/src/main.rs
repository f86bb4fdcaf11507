mod input;
mod render;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event},
    execute, terminal,
};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use slide2048_core::{GameState, Phase};

#[derive(Parser, Debug)]
#[command(name = "slide2048", about = "A terminal sliding-tile puzzle")]
struct Args {
    /// Seed the tile RNG for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
}

/// Raw mode + alternate screen, restored on drop so panics and early
/// returns leave the terminal usable.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .context("enter alternate screen")?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default()).init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => {
            info!("seeding RNG with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut game = GameState::new(&mut rng);

    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    render::draw(&mut stdout, &game).context("draw frame")?;

    loop {
        match event::read().context("read terminal event")? {
            Event::Key(key) => {
                let Some(command) = input::command_for(key) else {
                    continue;
                };
                if !game.apply(command, &mut rng) {
                    continue;
                }
                if game.phase() == Phase::Quit {
                    info!("quit");
                    break;
                }
                if game.is_game_over() {
                    debug!("no moves left");
                }
                render::draw(&mut stdout, &game).context("draw frame")?;
            }
            Event::Resize(_, _) => render::draw(&mut stdout, &game).context("draw frame")?,
            _ => {}
        }
    }

    Ok(())
}
