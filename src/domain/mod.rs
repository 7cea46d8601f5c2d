//! Pure value types for the policy engine: branch classification, the
//! commit message grammar, and pre-push ref update tuples. Nothing in
//! this module touches a repository.

pub mod branch;
pub mod message;
pub mod refspec;

pub use branch::{classify, BranchClass};
pub use message::MessageGrammar;
pub use refspec::RefUpdate;
