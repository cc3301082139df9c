use crate::error::UpstreamError;
use crate::shopping::{ProductResult, SearchResponse};

use super::criteria::SearchCriteria;

/// At most this many products are rendered, whatever `display` asked for.
pub const SUMMARY_LIMIT: usize = 5;

pub const UNKNOWN_SELLER: &str = "Unknown seller";

const BLOCK_SEPARATOR: &str = "\n\n";

/// Ordered text blocks returned for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedResponse {
    pub blocks: Vec<String>,
    pub is_error: bool,
}

impl FormattedResponse {
    pub fn from_blocks(blocks: Vec<String>) -> Self {
        Self {
            blocks,
            is_error: false,
        }
    }

    pub fn error(block: String) -> Self {
        Self {
            blocks: vec![block],
            is_error: true,
        }
    }

    /// All blocks joined with blank lines.
    pub fn text(&self) -> String {
        self.blocks.join(BLOCK_SEPARATOR)
    }
}

/// Reduce a successful upstream response to text blocks.
pub fn summarize(response: &SearchResponse, criteria: &SearchCriteria) -> FormattedResponse {
    let products: Vec<ProductResult> = response
        .items()
        .iter()
        .take(SUMMARY_LIMIT)
        .map(ProductResult::from)
        .collect();

    if products.is_empty() {
        return FormattedResponse::from_blocks(vec![no_results(criteria)]);
    }

    let mut blocks: Vec<String> = products
        .iter()
        .enumerate()
        .map(|(index, product)| format_product(index + 1, product))
        .collect();

    if let Some(suggestion) = bundle_suggestion(&products, criteria.max_price) {
        blocks.push(suggestion);
    }

    FormattedResponse::from_blocks(blocks)
}

pub fn format_product(position: usize, product: &ProductResult) -> String {
    let seller = product.seller.as_deref().unwrap_or(UNKNOWN_SELLER);
    format!(
        "{}. 🛍️ {}\n   💰 Lowest price: {}\n   🏪 Seller: {}\n   🔗 {}",
        position,
        product.title,
        format_thousands(product.price),
        seller,
        product.link
    )
}

/// Pair the first two products when together they fit the budget. Only that
/// pair is ever considered.
pub fn bundle_suggestion(products: &[ProductResult], max_price: Option<u64>) -> Option<String> {
    let budget = max_price?;
    let [first, second, ..] = products else {
        return None;
    };

    let total = first.price.checked_add(second.price)?;
    if total > budget {
        return None;
    }

    Some(format!(
        "🎁 Bundle suggestion: \"{}\" + \"{}\" for {} in total, within your budget of {}.",
        first.title,
        second.title,
        format_thousands(total),
        format_thousands(budget)
    ))
}

pub fn no_results(criteria: &SearchCriteria) -> String {
    match (criteria.min_price, criteria.max_price) {
        (Some(min), Some(max)) => format!(
            "🔍 No products found (price range: {} to {}).",
            format_thousands(min),
            format_thousands(max)
        ),
        (None, Some(max)) => format!(
            "🔍 No products found (price range: up to {}).",
            format_thousands(max)
        ),
        _ => "🔍 No products found.".to_string(),
    }
}

pub fn upstream_failure(error: &UpstreamError) -> String {
    match error {
        UpstreamError::Status { status, body } => {
            format!("❌ Naver Shopping API error (HTTP {}): {}", status, body.trim())
        }
        UpstreamError::Network(message) => {
            format!("❌ Connection to the Naver Shopping API failed: {}", message)
        }
        UpstreamError::Timeout(after) => format!(
            "❌ Naver Shopping API did not respond within {} seconds.",
            after.as_secs()
        ),
        UpstreamError::Decode(message) => format!(
            "❌ Naver Shopping API returned an unreadable response: {}",
            message
        ),
    }
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
