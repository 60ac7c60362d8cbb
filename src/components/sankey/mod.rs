mod component;
mod layout;
mod render;

pub use component::SankeyCanvas;
