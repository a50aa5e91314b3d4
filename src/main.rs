//! Arcade Trio entry point
//!
//! Headless driver: builds one game session, replays a scripted input timeline
//! through the scheduler in frame-sized slices and prints the result.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow, bail};
    use clap::{Parser, Subcommand};

    use arcade_trio::game::{
        BoardInput, MinesweeperSession, PongInput, PongSession, SnakeInput, SnakeSession,
    };
    use arcade_trio::render::{TextFrame, TextRenderer};
    use arcade_trio::schedule::{Scheduler, Simulation};
    use arcade_trio::sim::{Direction, PaddleMove, Player};
    use arcade_trio::{Difficulty, Settings};

    /// Host frame length used to feed the scheduler
    const FRAME_MS: u64 = 16;

    #[derive(Parser, Debug)]
    #[command(version, about, long_about = None)]
    struct Args {
        /// What log level to use
        #[command(flatten)]
        verbose: clap_verbosity_flag::Verbosity,

        /// Force a seed instead of random
        #[arg(short, long, global = true)]
        seed: Option<u64>,

        /// JSON settings file
        #[arg(long, global = true)]
        settings: Option<PathBuf>,

        /// Print the final snapshot as JSON
        #[arg(long, global = true)]
        json: bool,

        /// Print every frame as it is drawn
        #[arg(long, global = true)]
        frames: bool,

        #[command(subcommand)]
        game: GameCommand,
    }

    #[derive(Subcommand, Debug)]
    enum GameCommand {
        /// Minesweeper
        Mines {
            /// beginner, intermediate, expert or ROWSxCOLS:MINES
            #[arg(short, long)]
            difficulty: Option<String>,

            /// Flag a cell (applied before any reveal)
            #[arg(long, value_name = "R,C", value_parser = parse_cell)]
            flag: Vec<(usize, usize)>,

            /// Reveal a cell
            #[arg(long, value_name = "R,C", value_parser = parse_cell)]
            reveal: Vec<(usize, usize)>,

            /// Keep the board clock running afterwards
            #[arg(long, default_value_t = 0)]
            duration_ms: u64,
        },
        /// Two-player Pong (w/s for the left paddle, up/down for the right)
        Pong {
            #[arg(long, default_value_t = 5000)]
            duration_ms: u64,

            /// Timed command: w, s, up, down, pause or restart
            #[arg(long, value_name = "T:CMD", value_parser = parse_timed)]
            input: Vec<(u64, String)>,
        },
        /// Snake
        Snake {
            #[arg(long, default_value_t = 3000)]
            duration_ms: u64,

            /// Timed command: up, down, left, right or restart
            #[arg(long, value_name = "T:CMD", value_parser = parse_timed)]
            input: Vec<(u64, String)>,
        },
    }

    fn parse_cell(s: &str) -> std::result::Result<(usize, usize), String> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL, got {:?}", s))?;
        let row = row.trim().parse().map_err(|e| format!("bad row: {}", e))?;
        let col = col.trim().parse().map_err(|e| format!("bad column: {}", e))?;
        Ok((row, col))
    }

    fn parse_timed(s: &str) -> std::result::Result<(u64, String), String> {
        let (at, command) = s
            .split_once(':')
            .ok_or_else(|| format!("expected TIME_MS:COMMAND, got {:?}", s))?;
        let at = at.trim().parse().map_err(|e| format!("bad time: {}", e))?;
        Ok((at, command.trim().to_lowercase()))
    }

    fn pong_input(command: &str) -> Result<PongInput> {
        let paddle = |player, direction| PongInput::MovePaddle { player, direction };
        Ok(match command {
            "w" => paddle(Player::One, PaddleMove::Up),
            "s" => paddle(Player::One, PaddleMove::Down),
            "up" => paddle(Player::Two, PaddleMove::Up),
            "down" => paddle(Player::Two, PaddleMove::Down),
            "pause" | "p" => PongInput::TogglePause,
            "restart" | "r" => PongInput::Restart,
            other => bail!("unknown pong command {:?}", other),
        })
    }

    fn snake_input(command: &str) -> Result<SnakeInput> {
        Ok(match command {
            "up" => SnakeInput::RequestDirection(Direction::Up),
            "down" => SnakeInput::RequestDirection(Direction::Down),
            "left" => SnakeInput::RequestDirection(Direction::Left),
            "right" => SnakeInput::RequestDirection(Direction::Right),
            "restart" | "r" => SnakeInput::Restart,
            other => bail!("unknown snake command {:?}", other),
        })
    }

    fn timeline<I>(
        script: Vec<(u64, String)>,
        parse: impl Fn(&str) -> Result<I>,
    ) -> Result<Vec<(u64, I)>> {
        script
            .into_iter()
            .map(|(at, command)| Ok((at, parse(&command)?)))
            .collect()
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        env_logger::Builder::new()
            .filter_level(args.verbose.log_level_filter())
            .init();

        let mut settings = match &args.settings {
            Some(path) => Settings::load(path)
                .with_context(|| format!("Could not load settings from {}", path.display()))?,
            None => Settings::default(),
        };
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        let seed = settings.session_seed();
        log::info!("Session seed: {}", seed);

        let output = Output {
            json: args.json,
            renderer: TextRenderer::new().echo(args.frames),
        };

        match args.game {
            GameCommand::Mines {
                difficulty,
                flag,
                reveal,
                duration_ms,
            } => {
                if let Some(name) = difficulty {
                    settings.difficulty = Difficulty::from_str(&name)
                        .ok_or_else(|| anyhow!("Unknown difficulty {:?}", name))?;
                }
                let session = MinesweeperSession::from_settings(&settings, seed)?;
                let flags = flag
                    .into_iter()
                    .map(|(row, col)| (0, BoardInput::SecondaryActivate { row, col }));
                let reveals = reveal
                    .into_iter()
                    .map(|(row, col)| (0, BoardInput::PrimaryActivate { row, col }));
                play(session, &settings, flags.chain(reveals).collect(), duration_ms, output)
            }
            GameCommand::Pong { duration_ms, input } => {
                let session = PongSession::from_settings(&settings, seed);
                play(session, &settings, timeline(input, pong_input)?, duration_ms, output)
            }
            GameCommand::Snake { duration_ms, input } => {
                let session = SnakeSession::from_settings(&settings, seed);
                play(session, &settings, timeline(input, snake_input)?, duration_ms, output)
            }
        }
    }

    struct Output {
        json: bool,
        renderer: TextRenderer,
    }

    /// Replay `inputs` against the scheduler, then print the final snapshot
    fn play<G>(
        game: G,
        settings: &Settings,
        mut inputs: Vec<(u64, G::Input)>,
        duration_ms: u64,
        mut output: Output,
    ) -> Result<()>
    where
        G: Simulation,
        G::Input: std::fmt::Debug,
        G::Snapshot: TextFrame,
    {
        let mut scheduler = Scheduler::new(game).with_max_catchup(settings.max_catchup_ticks);
        let renderer = &mut output.renderer;

        inputs.sort_by_key(|(at, _)| *at);
        let end = inputs.last().map_or(0, |(at, _)| *at).max(duration_ms);
        let mut inputs = inputs.into_iter().peekable();

        loop {
            while let Some((at, input)) = inputs.next_if(|(at, _)| *at <= scheduler.now_ms()) {
                log::debug!("t={} input {:?}", at, input);
                let handled = scheduler.dispatch(input, renderer)?;
                log::trace!("Handled as {:?}", handled);
            }
            if scheduler.now_ms() >= end {
                break;
            }
            let next_input = inputs.peek().map_or(end, |(at, _)| *at).min(end);
            let slice = FRAME_MS.min(next_input - scheduler.now_ms());
            scheduler.advance(slice, renderer);
        }

        log::info!(
            "Ran {} ticks and {} redraws over {} ms",
            scheduler.ticks(),
            scheduler.frames(),
            scheduler.now_ms()
        );

        let snapshot = scheduler.game().snapshot();
        if output.json {
            let json = serde_json::to_string_pretty(&snapshot)?;
            println!("{}", json);
        } else {
            print!("{}", snapshot.to_text());
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The driver is native only; wasm hosts use the library directly
}
