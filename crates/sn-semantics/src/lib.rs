pub mod assembler;
pub mod evaluator;
pub mod lexicon;
pub mod numbers;
pub mod ordinal;
pub mod rules;
pub mod translator;

pub use assembler::assemble;
pub use evaluator::Evaluator;
pub use lexicon::{Lexicon, LexiconFn, DEFAULT_SOUND_NAMES};
pub use numbers::{NumberWords, NumeralWords};
pub use ordinal::ordinal_index;
pub use rules::{ComposeFn, RuleCall, RuleTable};
pub use translator::{Translation, Translator, TranslatorOptions};
