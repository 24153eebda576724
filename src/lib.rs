//! Movement, collision and scoring engine for a grid snake game.
//!
//! [`game::GameSession`] owns the whole session; everything else is either a
//! component it drives or a presentation collaborator that reads
//! [`view::SessionView`].

pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod movement;
pub mod progression;
pub mod renderer;
pub mod scheduler;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
pub mod view;
