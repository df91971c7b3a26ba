mod handle;
mod pack;

pub use handle::Loading;
pub use pack::{
    AvatarDef, ClipDef, PatrolDef, PropPlacement, SCENE_PACK_MAGIC, SCENE_PACK_VERSION,
    ScenePack, ScenePackError,
};
