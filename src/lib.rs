pub mod assets;
pub mod defs;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod world;
