pub mod directive;
pub mod index;
pub mod ledger;
pub mod search;
pub mod tokenizer;

pub use directive::Directive;
pub use index::{build_index, DocId, FullTextIndex};
pub use ledger::Ledger;
pub use search::{search_accounts, search_directives};
