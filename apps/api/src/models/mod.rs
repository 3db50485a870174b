pub mod interview;
pub mod quiz;
pub mod study_plan;
pub mod summary;
pub mod user;
