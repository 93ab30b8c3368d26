// Opaque texture handles supplied by the asset provider

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create a new asset ID from a string path
    pub fn from_path(path: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Create an asset ID from a raw u64
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Handle to a texture owned by the renderer
///
/// Actors never look inside; they only carry handles so the renderer knows
/// what to draw for the current animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    id: AssetId,
    width: u32,
    height: u32,
}

impl TextureHandle {
    /// Describe a texture the asset provider has already loaded
    pub fn new(id: AssetId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Handle keyed by the texture's file name
    pub fn named(path: &str, width: u32, height: u32) -> Self {
        Self::new(AssetId::from_path(path), width, height)
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Texture width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_path() {
        let id1 = AssetId::from_path("textures/spaceship.png");
        let id2 = AssetId::from_path("textures/spaceship.png");
        let id3 = AssetId::from_path("textures/rock.png");

        assert_eq!(id1, id2, "Same paths should produce same IDs");
        assert_ne!(id1, id3, "Different paths should produce different IDs");
    }

    #[test]
    fn test_asset_id_roundtrip() {
        let id = AssetId::from_u64(12345);
        assert_eq!(id.as_u64(), 12345);
    }

    #[test]
    fn test_named_texture() {
        let rock = TextureHandle::named("rock.png", 64, 48);
        assert_eq!(rock.id(), AssetId::from_path("rock.png"));
        assert_eq!((rock.width(), rock.height()), (64, 48));
    }
}
