//! # Vector Tank — Applied Maths for Games
//!
//! A single 2D tank drawn as line art, driven with W/S (move) and A/D
//! (rotate). The tank keeps a scalar pose (position, orientation, size) and
//! derives its translation, rotation and composed model matrices from it after
//! every update. The composed matrix is drawn through a line surface and
//! printed column by column in a text overlay.
//!
//! The core ([`tank`], [`math`], [`input`], [`object`]) never touches the GPU.
//! The window, wgpu renderer and font rasterizer live in [`app`], [`render`]
//! and [`render2d`], and only consume what the core exposes.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod math;
pub mod object;
pub mod overlay;
pub mod render;
pub mod render2d;
pub mod tank;
pub mod time;

pub use error::{Error, Result};
