#![allow(dead_code)]

pub mod classifier;
pub mod completion;
pub mod loader;
pub mod speech;
