//! Feature modules for datascout

pub mod code_block;
pub mod scraper;
pub mod search;
pub mod source_card;
