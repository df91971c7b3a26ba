pub mod anim;
pub mod flags;
pub mod scenery;

pub use self::{
    anim::AnimTag,
    flags::PropFlags,
    scenery::{SCENERYINFO, SceneryInfo},
};

use once_cell::sync::Lazy;
use std::collections::HashMap;

static BY_ID: Lazy<HashMap<&'static str, &'static SceneryInfo>> =
    Lazy::new(|| SCENERYINFO.iter().map(|info| (info.id, info)).collect());

pub fn by_id(id: &str) -> Option<&'static SceneryInfo> {
    BY_ID.get(id).copied()
}
