mod parse_bad;
mod scenarios;
pub(crate) mod utils;
