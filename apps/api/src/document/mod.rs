pub mod assemble;
pub mod flow;
pub mod tree;

pub use assemble::{assemble, AssemblyError};
pub use flow::{layout, DrawOp, PageLayout};
pub use tree::{Align, Backdrop, Cell, Color, DocumentTree, ImageShape, Node, TextStyle};
