pub mod measure;
pub mod raster;
pub mod surface;
pub mod text;
