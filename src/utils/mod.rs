pub mod helpers;

pub use helpers::{cell_reference, index_to_col_name, parse_column, round_to_one_decimal, title_case};
