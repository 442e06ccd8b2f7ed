//! Rule model: conditions, weight sources, rule sets and the rule book.
//!
//! Each segment owns an ordered list of [`WeightingRule`]s evaluated
//! first-match, closed by an unconditional default. A rule fires only when
//! its [`Condition`] holds *and* its [`WeightSource`] resolves, so a rating
//! rule never fires for an unrated exposure.

mod book;
mod condition;
mod rule;
mod source;

pub use book::RuleBook;
pub use condition::{Condition, Flag};
pub use rule::{Priority, RuleMatch, RuleSet, WeightingRule};
pub use source::WeightSource;
