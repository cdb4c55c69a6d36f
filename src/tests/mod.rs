#![warn(clippy::all, clippy::pedantic)]

pub mod board_tests;
