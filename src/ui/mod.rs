//! Terminal UI for playing a game: board view with a column selector, and
//! the event loop that drives human and computer turns.

mod app;
mod game_view;

pub use app::App;
