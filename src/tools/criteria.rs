use crate::config::{MAX_DISPLAY, MIN_DISPLAY};
use crate::error::ToolError;
use crate::shopping::SearchRequest;
use serde_json::{Map, Value};
use tracing::warn;

/// Free-text fields in the order they are joined into the search string.
pub const TEXT_FIELDS: [&str; 5] = ["recipient", "occasion", "preference", "full_context", "query"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub query: String,
    pub display: u32,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

impl SearchCriteria {
    pub fn from_arguments(
        arguments: &Map<String, Value>,
        default_display: u32,
    ) -> Result<Self, ToolError> {
        let query = build_query(arguments)?;
        if query.is_empty() {
            return Err(ToolError::invalid("query", "query must not be empty"));
        }

        let display = match arguments.get("display").filter(|v| !v.is_null()) {
            Some(value) => coerce_display(value)?,
            None => default_display.clamp(MIN_DISPLAY, MAX_DISPLAY),
        };

        let min_price = coerce_price(arguments, "min_price")?;
        let mut max_price = coerce_price(arguments, "max_price")?;

        if let (Some(min), Some(max)) = (min_price, max_price) {
            if max < min {
                warn!(min_price = min, max_price = max, "max_price below min_price, ignoring upper bound");
                max_price = None;
            }
        }

        Ok(SearchCriteria {
            query,
            display,
            min_price,
            max_price,
        })
    }

    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            query: self.query.clone(),
            display: self.display,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

/// Join the trimmed, non-empty text fields with single spaces.
pub fn build_query(arguments: &Map<String, Value>) -> Result<String, ToolError> {
    let mut parts = Vec::new();

    for field in TEXT_FIELDS {
        match arguments.get(field) {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) => {
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            Some(_) => {
                return Err(ToolError::invalid(field, format!("{} must be a string", field)));
            }
        }
    }

    Ok(parts.join(" "))
}

fn coerce_display(value: &Value) -> Result<u32, ToolError> {
    let display = as_whole_number(value)
        .ok_or_else(|| ToolError::invalid("display", "display must be an integer"))?;

    if display < MIN_DISPLAY as u64 || display > MAX_DISPLAY as u64 {
        return Err(ToolError::invalid(
            "display",
            format!("display must be between {} and {}", MIN_DISPLAY, MAX_DISPLAY),
        ));
    }

    Ok(display as u32)
}

fn coerce_price(arguments: &Map<String, Value>, field: &str) -> Result<Option<u64>, ToolError> {
    let invalid = || ToolError::invalid(field, format!("{} must be a non-negative integer", field));

    match arguments.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => {
            let digits = text.trim().replace(',', "");
            if digits.is_empty() {
                return Ok(None);
            }
            digits.parse::<u64>().map(Some).map_err(|_| invalid())
        }
        Some(value) => as_whole_number(value).map(Some).ok_or_else(invalid),
    }
}

fn as_whole_number(value: &Value) -> Option<u64> {
    let Value::Number(number) = value else {
        return None;
    };
    number.as_u64().or_else(|| {
        number
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}
