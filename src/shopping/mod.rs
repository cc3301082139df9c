pub mod client;
pub mod models;

pub use client::{NaverShoppingClient, ProductSearch};
pub use models::{strip_highlight, ProductResult, SearchRequest, SearchResponse, ShopItem};
