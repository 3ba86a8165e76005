pub mod export;
pub mod normalizer;
pub mod ratios;
