pub mod alert;

pub use alert::{SymbolWatch, Symbol, Target, TargetId, UserId, WatchEntry};
