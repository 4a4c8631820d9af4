pub mod animation;
pub mod context;
pub mod generator;
pub mod tags;


pub use animation::{is_animatable, motion_props, MotionProp, ANIMATABLE_TAGS};
pub use context::{CodegenOptions, Emitter};
pub use generator::{
    generate_markup, generate_module, GENERATION_PLACEHOLDER, NUMERIC_PROPS, VOID_TAGS,
};
pub use tags::{is_external_url, resolve_tag, ResolvedTag};
