use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GameSimulation, IntervalTicker, Phase, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at ~30 FPS, independent of the simulation tick rate
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive play in the terminal.
///
/// A single task owns the simulation and multiplexes key presses, simulation
/// ticks and redraws with `tokio::select!`, so input and ticks never interleave.
pub struct HumanMode {
    simulation: GameSimulation<IntervalTicker>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// Build the mode and start the first run. Needs a running tokio runtime.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut simulation = GameSimulation::new(config, IntervalTicker::new())
            .context("Invalid game configuration")?;
        simulation.init();

        Ok(Self {
            simulation,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(anyhow::Error::from(err).context("Failed to read terminal event"));
                        }
                        None => self.should_quit = true,
                    }
                }

                // Simulation tick; pending forever while paused or over
                _ = self.simulation.scheduler_mut().tick() => {
                    // Show moves right away instead of waiting for the next frame
                    if self.on_tick() {
                        self.draw(terminal)?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(score = self.simulation.score(), "quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                if !self.simulation.request_direction_change(direction) {
                    debug!(?direction, "turn ignored");
                }
            }
            KeyAction::PauseOrResume => match self.simulation.pause_or_resume() {
                Phase::Paused => self.metrics.on_pause(),
                Phase::Running => self.metrics.on_resume(),
                Phase::NotStarted | Phase::Over => {}
            },
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        let view = self.simulation.view();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &view, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    /// Run one simulation step. Returns true if the board changed and needs a redraw.
    fn on_tick(&mut self) -> bool {
        let outcome = self.simulation.tick();
        if let TickOutcome::GameOver(_) = outcome {
            self.metrics.on_game_over(self.simulation.score());
        }
        outcome.changed_state()
    }

    fn restart(&mut self) {
        // A paused run being abandoned still counts towards the session stats
        let abandoned_score = self
            .simulation
            .is_in_game()
            .then(|| self.simulation.score());

        if self.simulation.init() {
            if let Some(score) = abandoned_score {
                self.metrics.on_game_over(score);
            }
            self.metrics.on_game_start();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
