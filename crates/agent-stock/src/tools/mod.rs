//! Stock tools exposed to an agent runtime
//!
//! Every tool answers with a status-tagged JSON object (see
//! [`ToolResponse`]). Only parameters that do not match the schema are
//! reported as `Err`.

pub mod analysis;
pub mod identify;
pub mod news;
pub mod price;
pub mod price_change;
mod response;

pub use analysis::TickerAnalysisTool;
pub use identify::IdentifyTickerTool;
pub use news::TickerNewsTool;
pub use price::TickerPriceTool;
pub use price_change::TickerPriceChangeTool;
pub use response::ToolResponse;
