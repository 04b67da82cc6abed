//! Section editor forms: one per collection plus personal info and design.

pub mod draft;
pub mod fields;
pub mod handlers;
pub mod section_forms;
