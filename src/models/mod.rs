pub mod course;

pub use course::{Course, CourseForm, CoursePayload, CourseType, ExecutionType};
