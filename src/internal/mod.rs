//! Internal layer: the patch model, the line image, the delta decoder, and the apply engine.

pub mod apply;
pub mod delta;
pub mod image;
pub mod patch;
