//! 德卡斯特里奥构造的逐帧动画：插值金字塔、曲线轨迹、配色、中间层图元的生命周期，
//! 以及基于 macroquad 的窗口渲染。

pub mod animation;
pub mod basic_structs;
pub mod bezier;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod palette;
pub mod render;
pub mod seed_editor;
pub mod seeds;
pub mod viewer;
