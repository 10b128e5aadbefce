pub mod category_kind;
pub mod lane;
pub mod lane_mix;
pub mod vector;
