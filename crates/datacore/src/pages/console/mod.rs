//! Console counterparts of the pages that have one. Each reuses the shared
//! components and data hooks inside console panels.

pub mod dashboard;
pub mod infrastructure;
pub mod printer;
pub mod projects;
