pub mod deletion_plan;
pub mod retention;
