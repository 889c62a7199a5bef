//! Asset keys
//!
//! Textures and animations are loaded by the rendering collaborator; the
//! gameplay core only refers to them by key.

use serde::{Deserialize, Serialize};

/// Texture keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Texture {
    Sky,
    Ground,
    Star,
    Bomb,
    Dude,
    /// Closed (locked) scroll
    Scroll,
    /// Open scroll, shown once unlocked
    ScrollOpen,
    Letter,
    Background,
}

impl Texture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Texture::Sky => "sky",
            Texture::Ground => "ground",
            Texture::Star => "star",
            Texture::Bomb => "bomb",
            Texture::Dude => "dude",
            Texture::Scroll => "scroll",
            Texture::ScrollOpen => "scrollOpen",
            Texture::Letter => "letter",
            Texture::Background => "background",
        }
    }
}

/// Player animation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anim {
    Left,
    Right,
    /// Facing the camera (idle and hit)
    Turn,
}

impl Anim {
    pub fn as_str(&self) -> &'static str {
        match self {
            Anim::Left => "left",
            Anim::Right => "right",
            Anim::Turn => "turn",
        }
    }
}
