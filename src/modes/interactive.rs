//! Line-driven play over any async reader and writer
//!
//! Each input line is parsed by [`CommandParser`]; every response is one
//! JSON object on its own output line. The first line written is always the
//! full level state, later moves are sent as diffs.

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::game::{Action, GameConfig};
use crate::input::{Command, CommandParser};
use crate::metrics::GameMetrics;
use crate::session::{FullState, Session, StepReport};

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Message<'a> {
    State(&'a FullState),
    Step(&'a StepReport),
    Error { message: String },
}

pub struct InteractiveMode {
    session: Session,
    parser: CommandParser,
    metrics: GameMetrics,
    game_over_recorded: bool,
}

impl InteractiveMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let parser = CommandParser::new(config.n_dims);
        let session = Session::new(config).context("Failed to start game")?;
        Ok(Self {
            session,
            parser,
            metrics: GameMetrics::new(),
            game_over_recorded: false,
        })
    }

    /// Play on stdin and stdout until `q` or end of input
    pub async fn run(&mut self) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_with(stdin, stdout).await
    }

    pub async fn run_with<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let state = self.session.full_state();
        write_message(&mut writer, &Message::State(&state)).await?;

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            match self.parser.parse(&line) {
                Command::GameAction(action) => self.play(action, &mut writer).await?,
                Command::Restart => {
                    self.record_game_over();
                    let state = self
                        .session
                        .restart()
                        .context("Failed to restart game")?;
                    self.metrics.on_game_start();
                    self.game_over_recorded = false;
                    write_message(&mut writer, &Message::State(&state)).await?;
                }
                Command::Quit => break,
                Command::Unknown(input) => {
                    warn!(%input, "unrecognised command");
                    let message = format!("unrecognised command {input:?}");
                    write_message(&mut writer, &Message::Error { message }).await?;
                }
            }
        }

        self.record_game_over();
        self.metrics.update();
        info!(
            games = self.metrics.games_played,
            won = self.metrics.games_won,
            best_length = self.metrics.best_length,
            session_elapsed = %self.metrics.format_time(),
            "session closed"
        );
        Ok(())
    }

    async fn play<W: AsyncWrite + Unpin>(&mut self, action: Action, writer: &mut W) -> Result<()> {
        match self.session.advance(action) {
            Ok(report) => {
                write_message(writer, &Message::Step(&report)).await?;
                if report.status.is_terminal() {
                    self.record_game_over();
                }
            }
            Err(err) => {
                warn!(%err, "move rejected");
                let message = err.to_string();
                write_message(writer, &Message::Error { message }).await?;
            }
        }
        Ok(())
    }

    fn record_game_over(&mut self) {
        let game = self.session.game();
        if game.is_finished() && !self.game_over_recorded {
            info!(
                length = game.snake_length(),
                won = game.is_won(),
                game_secs = self.metrics.game_time().as_secs(),
                "game over"
            );
            self.metrics.on_game_over(game.snake_length(), game.is_won());
            self.game_over_recorded = true;
        }
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, message: &Message<'_>) -> Result<()> {
    let mut line = serde_json::to_vec(message).context("Failed to serialize message")?;
    line.push(b'\n');
    writer.write_all(&line).await.context("Failed to write output")?;
    writer.flush().await.context("Failed to flush output")
}
