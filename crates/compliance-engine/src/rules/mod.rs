pub mod pii;
pub mod sox;

pub use pii::detect_pii;
pub use sox::detect_keyword_indicators;
