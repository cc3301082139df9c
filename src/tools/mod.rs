mod criteria;
mod format;
mod handler;
mod registry;

pub use criteria::{build_query, SearchCriteria, TEXT_FIELDS};
pub use format::{
    bundle_suggestion, format_product, format_thousands, no_results, summarize, upstream_failure,
    FormattedResponse, SUMMARY_LIMIT, UNKNOWN_SELLER,
};
pub use handler::{ToolInvocationHandler, ToolSettings};
pub use registry::{ToolKind, ToolRegistry};
