//! Data model of the form builder: templates, their sections and fields, and
//! the submissions filled against them.

pub mod field;
pub mod section;
pub mod submission;
pub mod template;
