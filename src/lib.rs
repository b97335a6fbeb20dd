//! extdoc — class documentation from annotated JavaScript sources.
//!
//! Pipeline, per processing unit (one source file):
//!
//! 1. [`parser::segment`] splits the text into doc comment / code pairs
//! 2. [`parser::tags`] parses each comment into a [`model::DocNode`]
//! 3. [`parser::merge`] fills missing names and types from the code
//!
//! Then, across units:
//!
//! 4. [`assemble`] folds each unit's nodes into class aggregates
//! 5. [`tree`] builds the namespace tree for navigation
//! 6. [`page`] resolves inherited members for each class page

pub mod assemble;
pub mod error;
pub mod logger;
pub mod model;
pub mod page;
pub mod parser;
pub mod render;
pub mod tree;

pub use error::{Diagnostic, Error};
