pub mod badge;
pub mod batch;
pub mod box_blur;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod color_matrix;
pub mod effect;
pub mod geometry;
pub mod icon;
pub mod pixel;
pub mod text;
