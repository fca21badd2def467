pub mod action;
pub mod course_flow;

pub use action::{reduce, Action, GenerationOutcome};
pub use course_flow::CourseFlow;
