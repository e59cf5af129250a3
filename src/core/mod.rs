pub mod console;   // Line input seam (stdin or scripted)
pub mod engine;
pub mod game;
pub mod renderer;
pub mod rng;
pub mod terminal;  // Terminal context wrapper
