//! Custom detection rules: the user-authored definition, its validation,
//! match-mode resolution and pattern compilation.

pub mod custom_rule;
pub mod language;
pub mod levels;
pub mod match_mode;
pub mod policy;
pub mod rule_set;
pub mod validation;

pub use custom_rule::{compile_expressions, CustomRule, RawCustomRule};
pub use language::{Language, CUSTOM_RULE_LANGUAGES};
pub use levels::{Confidence, Severity};
pub use match_mode::MatchMode;
pub use policy::RulePolicy;
pub use rule_set::{RejectedRule, RuleSet};
pub use validation::{FieldError, ValidationErrors};
