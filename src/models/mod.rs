// src/models/mod.rs
pub mod model;
pub mod sine_cosine;

pub use model::{DiagonalSde, SdeSense};
pub use sine_cosine::SineCosine;
