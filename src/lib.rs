pub mod cli;
pub mod config;
pub mod error;
pub mod reader;
pub mod marks;
pub mod matcher;
pub mod leaderboard;
pub mod export;
pub mod interactive;
