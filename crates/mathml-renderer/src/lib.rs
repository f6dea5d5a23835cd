//! Internal library for the `quizmath` crate for rendering MathML.
//!
//! This library allows you to construct an AST representing MathML and then render it to a string.
//!
//! # Example
//!
//! ```rust
//! use quizmath_renderer_internal::ast::{Node, Scripts};
//!
//! let ast = Node::row(vec![
//!     Node::UnderOver {
//!         base: Box::new(Node::operator("&sum;")),
//!         scripts: Scripts::Sub(Box::new(Node::identifier("i"))),
//!     },
//!     Node::identifier("i"),
//! ]);
//!
//! let mut output = String::new();
//! ast.emit(&mut output, 0).unwrap();
//! assert_eq!(
//!     output,
//!     "<mrow><munder><mo>&sum;</mo><mi>i</mi></munder><mi>i</mi></mrow>"
//! );
//! ```
pub mod ast;
pub mod attribute;
mod fmt;
pub mod table;
