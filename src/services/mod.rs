pub mod recommendation;
pub mod recommendations;
