pub mod stage0_tag;
pub mod stage1_classify;
pub mod stage2_aggregate;
pub mod stage3_render;

pub use stage0_tag::*;
pub use stage1_classify::*;
pub use stage2_aggregate::*;
pub use stage3_render::*;
