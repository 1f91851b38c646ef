pub mod espeak_engine;

pub use espeak_engine::EspeakEngine;
