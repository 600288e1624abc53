//! Raster encoding and storage.

pub(crate) mod sink;
