// src/core/mod.rs

pub mod entities;
pub mod html;
pub mod sanitize;
