//! CPU rasterization of slides.

pub(crate) mod background;
pub(crate) mod compositor;
pub(crate) mod config;
pub(crate) mod elements;
pub(crate) mod surface;
pub(crate) mod text;
pub(crate) mod widgets;
