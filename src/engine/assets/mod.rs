// Asset references
//
// Loading and decoding live in the renderer; the actor core only passes
// texture handles around.

mod handle;

pub use handle::{AssetId, TextureHandle};
