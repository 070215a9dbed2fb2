//! Detection of inventory slots in Minecraft-style GUI textures, plus the
//! tooling around it: item catalog lookup and composing item icons into the
//! detected slots.

pub mod gui_pipeline;
pub mod logger;
