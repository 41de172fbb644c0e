pub mod error;
pub mod filter;
pub mod paging;
pub mod session;
pub mod topics;
pub mod types;

pub use error::{Error, Result};
pub use filter::{filter, FilterState, ALL_TOPICS};
pub use paging::Pager;
pub use session::Session;
pub use topics::RuleTable;
pub use types::Article;

pub mod prelude {
    pub use crate::{Article, Error, FilterState, Pager, Result, RuleTable, Session};
}
