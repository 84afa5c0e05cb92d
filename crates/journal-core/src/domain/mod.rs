//! 매매일지 도메인 모델.

mod fundamentals;
mod indicator;
mod personality;
mod trade_record;

pub use fundamentals::*;
pub use indicator::*;
pub use personality::*;
pub use trade_record::*;
