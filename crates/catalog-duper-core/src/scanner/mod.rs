mod titles;

pub use titles::{build_title_groups, DuplicateGroup, TitleScan};
