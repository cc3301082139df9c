pub const NAVER_SHOPPING_ENDPOINT: &str = "https://openapi.naver.com/v1/search/shop.json";

pub const MIN_DISPLAY: u32 = 1;
pub const MAX_DISPLAY: u32 = 100;

pub fn default_endpoint() -> String {
    NAVER_SHOPPING_ENDPOINT.to_string()
}

pub fn default_timeout_secs() -> u64 {
    10
}

pub fn default_display() -> u32 {
    5
}

pub fn default_bind() -> String {
    "0.0.0.0:10000".to_string()
}
