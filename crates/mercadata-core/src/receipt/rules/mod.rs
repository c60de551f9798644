//! Rule-based line recognition for the Mercadona receipt layout.

pub mod amounts;
pub mod categories;
pub mod patterns;

pub use amounts::{find_prices, parse_comma_decimal, strip_trailing_prices};
pub use categories::CategoryClassifier;
pub use patterns::*;
