//! Drawing seam
//!
//! The core emits an ordered sprite list once per frame and expects nothing
//! back. Real sessions plug a stimulus-toolkit renderer in here; headless
//! runs use [`ConsoleRenderer`], which logs frames instead of drawing them.

use crate::sim::Sprite;

pub trait Renderer {
    /// Draw one frame. Sprites arrive back-to-front, player last.
    fn present(&mut self, sprites: &[Sprite<'_>]);
}

/// Logs each sprite at debug level. Useful for demos and soak runs.
#[derive(Debug, Default)]
pub struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn present(&mut self, sprites: &[Sprite<'_>]) {
        for sprite in sprites {
            match sprite.orientation {
                Some(ori) => log::debug!(
                    "draw {:?} at ({:.3}, {:.3}) ori {:.1}",
                    sprite.shape,
                    sprite.position.x,
                    sprite.position.y,
                    ori
                ),
                None => log::debug!(
                    "draw {:?} at ({:.3}, {:.3})",
                    sprite.shape,
                    sprite.position.x,
                    sprite.position.y
                ),
            }
        }
    }
}
