pub mod providers;
pub mod ranking;
pub mod strategy;

pub use strategy::{GenerativeStrategy, OutfitRecommender, OutfitStrategy, StaticCatalogStrategy};
