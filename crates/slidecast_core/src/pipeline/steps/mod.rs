//! Concrete pipeline steps.

mod assemble;
mod discover;
mod encode;
mod script;

pub use assemble::AssembleStep;
pub use discover::DiscoverStep;
pub use encode::EncodeStep;
pub use script::ParseScriptStep;
