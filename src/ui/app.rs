use crate::ai::Agent;
use crate::config::AppConfig;
use crate::error::EngineError;
use crate::game::{GameState, Move, Outcome, Player};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::info;

pub struct App {
    config: AppConfig,
    initial: GameState,
    game_state: GameState,
    agents: [Option<Box<dyn Agent>>; 2],
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    last_move_at: Instant,
}

impl App {
    /// Build the app from a validated configuration. A seed makes computer
    /// players reproducible.
    pub fn new(config: AppConfig, seed: Option<u64>) -> Result<Self, EngineError> {
        let initial = config.game.new_state()?;
        let agent_for = |player: Player| {
            let seat = config.players.seat(player);
            (!seat.is_human()).then(|| {
                seat.difficulty
                    .agent(seed.map(|s| s.wrapping_add(player.number() as u64)))
            })
        };
        let agents = [agent_for(Player::One), agent_for(Player::Two)];

        Ok(App {
            selected_column: initial.cols() / 2, // Start in middle
            game_state: initial.clone(),
            initial,
            agents,
            config,
            should_quit: false,
            message: None,
            last_move_at: Instant::now(),
        })
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!(
            rows = self.game_state.rows(),
            cols = self.game_state.cols(),
            win_length = self.game_state.win_length(),
            "game started"
        );
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick();
        }
        Ok(())
    }

    fn agent_index(player: Player) -> usize {
        match player {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    fn is_computer_turn(&self) -> bool {
        self.agents[Self::agent_index(self.game_state.current_player())].is_some()
    }

    /// Let a computer player move once its thinking delay has passed
    fn tick(&mut self) {
        if self.game_state.is_terminal() || !self.is_computer_turn() {
            return;
        }
        let delay = Duration::from_millis(self.config.ui.computer_delay_ms);
        if self.last_move_at.elapsed() < delay {
            return;
        }

        let idx = Self::agent_index(self.game_state.current_player());
        if let Some(agent) = self.agents[idx].as_mut() {
            let mv = agent.select_move(&self.game_state);
            self.play(mv, false);
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.game_state.cols() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.human_move(Move::drop(self.selected_column));
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.human_move(Move::pop(self.selected_column));
            }
            KeyCode::Char('r') => {
                self.game_state = self.initial.clone();
                self.selected_column = self.game_state.cols() / 2;
                self.last_move_at = Instant::now();
                self.message = Some("New game started!".to_string());
                info!("game restarted");
            }
            _ => {}
        }
    }

    fn human_move(&mut self, mv: Move) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.is_computer_turn() {
            self.message = Some("Wait for the computer to move.".to_string());
            return;
        }
        self.play(mv, true);
    }

    /// Apply a move for the player to move and report what happened
    fn play(&mut self, mv: Move, human: bool) {
        let player = self.game_state.current_player();
        match self.game_state.apply(mv) {
            Ok(()) => {
                info!(player = player.number(), human, %mv, "move played");
                self.last_move_at = Instant::now();
                self.message = Some(if human {
                    format!("{} played {}", player.name(), mv)
                } else if mv.pop {
                    format!("Computer popped disc at column {}", mv.column)
                } else {
                    format!("Computer added new disc at column {}", mv.column)
                });

                let outcome = self.game_state.evaluate();
                if outcome != Outcome::InProgress {
                    info!(result = %outcome.message(), "game finished");
                    self.message = Some(outcome.message());
                }
            }
            Err(err) => {
                self.message = Some(format!("{err}, try again."));
            }
        }
    }

    /// Describe who is playing, e.g. "Human vs Computer (level 2)"
    fn mode_label(&self) -> String {
        let seat = |player: Player| {
            let seat = self.config.players.seat(player);
            if seat.is_human() {
                "Human".to_string()
            } else {
                format!("Computer (level {})", seat.difficulty)
            }
        };
        format!("{} vs {}", seat(Player::One), seat(Player::Two))
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            &self.mode_label(),
        );
    }
}
