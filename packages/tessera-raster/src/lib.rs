//! Software rasteriser implementing [`tessera_core::Surface`].

mod error;
mod framebuffer;

pub use error::RasterError;
pub use framebuffer::Framebuffer;
