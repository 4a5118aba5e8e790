//! Slug generation engine.
//!
//! The engine turns an effective set of options into a [`Plan`] and runs it
//! over the input text. Everything that can fail happens while compiling the
//! plan; running it is infallible.
//!
//! ## How the parts work together
//!
//! ```text
//! SlugOptions (merged)
//!      │
//!      │  Plan::compile                          (plan.rs)
//!      ├─ CharClass::parse(valid / ignore)       (char_class.rs, escape.rs)
//!      └─ Pipeline::build                        (pipeline.rs)
//!           ├─ pre rules     RuleSet::parse      (rule.rs)
//!           ├─ main chain    TransformStep       (step.rs)
//!           └─ post rules    RuleSet::parse
//!      │
//!      v
//! input ── strip ignored ── Transliterate::compose
//!      │
//!      │  Pipeline::run
//!      │    for each step: TextTraits::scan      (trigger.rs)
//!      │      skip if the step cannot change the text, apply otherwise
//!      v
//! filter_and_collapse                            (filter.rs)
//!      │
//!      v
//!    slug
//! ```
//!
//! ## Responsibilities by module
//!
//! - `escape.rs`: escape sequences shared by the rule and class parsers.
//! - `rule.rs`: the `source > replacement;` rule language and its
//!   Aho-Corasick based application.
//! - `char_class.rs`: character-class specs (`a-z0-9`, `\p{Ll}`, `\d`).
//! - `step.rs`: one named or custom step, optionally scoped by a regex.
//! - `pipeline.rs`: stage ordering and the default main chain.
//! - `trigger.rs`: coarse text traits used to skip no-op steps.
//! - `filter.rs`: final allowed/ignored/invalid pass and delimiter collapsing.
//! - `metrics.rs`: optional per-step timing and trace data.
//! - `plan.rs`: ties the above together for one set of options.
//!
//! ## Debugging
//!
//! Pipeline construction is logged at `debug` level and every step at
//! `trace` level (`RUST_LOG=slugline=trace`).

#[path = "engine/char_class.rs"]
mod char_class;
#[path = "engine/escape.rs"]
mod escape;
#[path = "engine/filter.rs"]
mod filter;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pipeline.rs"]
mod pipeline;
#[path = "engine/plan.rs"]
mod plan;
#[path = "engine/rule.rs"]
mod rule;
#[path = "engine/step.rs"]
mod step;
#[path = "engine/trigger.rs"]
mod trigger;

pub use pipeline::Stage;
pub(crate) use plan::Plan;
pub use trigger::TextTraits;
