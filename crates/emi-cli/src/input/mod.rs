pub mod file;
pub mod lenient;
pub mod stdin;
