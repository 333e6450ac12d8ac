use crate::game::{Board, Cell, GameState, Outcome, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: &Option<String>,
    game_mode: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                         // Header
            Constraint::Min(game_state.rows() as u16 + 4), // Board
            Constraint::Length(3),                         // Message
            Constraint::Length(3),                         // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, game_mode, chunks[0]);
    render_board(frame, game_state.board(), selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, game_mode: &str, area: Rect) {
    let (status, color) = match game_state.evaluate() {
        Outcome::InProgress => {
            let player = game_state.current_player();
            (
                format!(
                    "{} to move  |  connect {}  |  {}",
                    player.name(),
                    game_state.win_length(),
                    game_mode
                ),
                player_color(player),
            )
        }
        Outcome::Winner(player) => (
            format!("Game Over: {}  |  {}", Outcome::Winner(player).message(), game_mode),
            player_color(player),
        ),
        Outcome::Draw => (
            format!("Game Over: {}  |  {}", Outcome::Draw.message(), game_mode),
            Color::White,
        ),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Pop Connect"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, board: &Board, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();
    let width = board.cols() * 3 + 1;

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..board.cols() {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {col} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {col} ")));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(width))));

    // Top row first; row 0 rests on the bottom border
    for row in (0..board.rows()).rev() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..board.cols() {
            let (symbol, color) = match board.get(row, col) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::One => (" ● ", player_color(Player::One)),
                Cell::Two => (" ● ", player_color(Player::Two)),
            };
            row_spans.push(Span::styled(symbol, Style::default().fg(color)));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(width))));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..board.cols() {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(
        "←/→: Column  |  Enter: Drop  |  P: Pop  |  R: Restart  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Controls"),
    );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(state: &GameState, message: Option<String>) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render(f, state, 1, &message, "Human vs Human"))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_header_shows_player_to_move() {
        let state = GameState::new(6, 7, 4).unwrap();
        let text = rendered_text(&state, None);
        assert!(text.contains("Player 1 to move"));
        assert!(text.contains("connect 4"));
    }

    #[test]
    fn test_header_shows_result() {
        let board = Board::from_rows(&["....", "....", "....", "2222"]).unwrap();
        let state = GameState::from_board(board, 4, Player::One).unwrap();
        let text = rendered_text(&state, Some("Player 2 wins!".into()));
        assert!(text.contains("Game Over: Player 2 wins!"));
    }
}
