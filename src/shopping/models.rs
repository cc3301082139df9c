use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two tokens Naver wraps around matched keywords in item titles.
pub const HIGHLIGHT_OPEN: &str = "<b>";
pub const HIGHLIGHT_CLOSE: &str = "</b>";

/// Sort mode sent upstream. `sim` is Naver's relevance ordering.
pub const SORT_BY_RELEVANCE: &str = "sim";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub display: u32,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

impl SearchRequest {
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.clone()),
            ("display", self.display.to_string()),
            ("sort", SORT_BY_RELEVANCE.to_string()),
        ];
        if let Some(min_price) = self.min_price {
            params.push(("lprice", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            params.push(("hprice", max_price.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub items: Option<Vec<ShopItem>>,
}

impl SearchResponse {
    /// A missing or null `items` key reads as an empty result set.
    pub fn items(&self) -> &[ShopItem] {
        self.items.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub lprice: u64,
    #[serde(rename = "mallName", default)]
    pub mall_name: Option<String>,
}

/// One product as presented to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductResult {
    pub title: String,
    pub price: u64,
    pub link: String,
    pub seller: Option<String>,
}

impl From<&ShopItem> for ProductResult {
    fn from(item: &ShopItem) -> Self {
        let seller = item
            .mall_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        ProductResult {
            title: strip_highlight(&item.title),
            price: item.lprice,
            link: item.link.clone(),
            seller,
        }
    }
}

/// Remove every `<b>` and `</b>` from a provider title, leaving all other
/// bytes untouched.
pub fn strip_highlight(title: &str) -> String {
    title.replace(HIGHLIGHT_OPEN, "").replace(HIGHLIGHT_CLOSE, "")
}

// `lprice` arrives as a string ("89000"), occasionally as a number, and is
// empty for some listings.
fn deserialize_price<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .ok_or_else(|| de::Error::custom(format!("invalid price: {}", n))),
        Value::String(s) => {
            let digits = s.trim().replace(',', "");
            if digits.is_empty() {
                return Ok(0);
            }
            digits
                .parse::<u64>()
                .map_err(|_| de::Error::custom(format!("invalid price: {:?}", s)))
        }
        other => Err(de::Error::custom(format!("invalid price: {}", other))),
    }
}
