//! Pipeline construction and execution.
//!
//! ```text
//!  pre rules ──▶ main chain ──────────────────────────────▶ post rules
//!  (whole text)  (invalid runs only: [^<valid><ignore>]+)   (whole text)
//! ```
//!
//! The main chain is either the caller's explicit `transforms` list or the
//! default chain:
//!
//! ```text
//!  1. lowercase probe      on [\p{Lu}--[valid]]
//!  2. uppercase probe      on [\p{Ll}--[valid]]
//!  3. latin fold           on invalid runs
//!  4. ascii fold           on invalid runs
//!  5. lowercase probe      (as 1)
//!  6. uppercase probe      (as 2)
//! ```
//!
//! Probes only keep case mappings that turn one code point into one valid
//! code point. Everything is validated while building; a built pipeline
//! cannot fail.

use super::char_class::CharClass;
use super::metrics::{RunMetrics, StepMetrics};
use super::rule::RuleSet;
use super::step::{Mode, TransformStep};
use crate::error::SlugError;
use crate::translit::{Locale, Operation, Transliterate};
use log::{debug, trace};
use regex::Regex;
use std::fmt;
use std::time::Instant;

/// Where a step sits in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Pre,
    Main,
    Post,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Pre => "pre",
            Stage::Main => "main",
            Stage::Post => "post",
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PipelineStep {
    pub stage: Stage,
    pub step: TransformStep,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Pipeline {
    steps: Vec<PipelineStep>,
}

/// Scope patterns shared by the main-chain steps.
struct Scopes {
    invalid_runs: Regex,
    invalid_upper: Regex,
    invalid_lower: Regex,
}

impl Pipeline {
    pub fn build(
        locale: &Locale,
        valid: &CharClass,
        ignore: &CharClass,
        pre: &[String],
        transforms: Option<&[String]>,
        post: &[String],
    ) -> Result<Self, SlugError> {
        let scopes = Scopes::new(valid, ignore)?;
        let mut steps = Vec::new();

        for rule in pre {
            steps.push(PipelineStep { stage: Stage::Pre, step: custom_step(rule, locale, None)? });
        }

        match transforms {
            Some(descriptors) => {
                for descriptor in descriptors {
                    let step = main_step(descriptor, locale, &scopes)?;
                    steps.push(PipelineStep { stage: Stage::Main, step });
                }
            }
            None => {
                for step in default_chain(locale, valid, &scopes) {
                    steps.push(PipelineStep { stage: Stage::Main, step });
                }
            }
        }

        for rule in post {
            steps.push(PipelineStep { stage: Stage::Post, step: custom_step(rule, locale, None)? });
        }

        debug!("built pipeline with {} steps for locale {:?}", steps.len(), locale.tag());
        Ok(Pipeline { steps })
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    pub fn run(&self, text: &str, transliterator: &dyn Transliterate) -> String {
        let mut current = text.to_string();

        for PipelineStep { stage, step } in &self.steps {
            if !step.may_change(&current, transliterator) {
                trace!("[{stage}] skip {step}");
                continue;
            }
            current = step.apply(&current, transliterator);
            trace!("[{stage}] {step} -> {current:?}");
        }

        current
    }

    /// Like [`run`](Self::run), recording every step into `metrics`.
    pub fn run_with_metrics(&self, text: &str, transliterator: &dyn Transliterate, metrics: &mut RunMetrics) -> String {
        let mut current = text.to_string();

        for PipelineStep { stage, step } in &self.steps {
            let start = Instant::now();
            let skipped = !step.may_change(&current, transliterator);
            if !skipped {
                current = step.apply(&current, transliterator);
            }
            metrics.steps.push(StepMetrics {
                stage: *stage,
                label: step.to_string(),
                output: current.clone(),
                skipped,
                duration: start.elapsed(),
            });
        }

        current
    }
}

impl Scopes {
    fn new(valid: &CharClass, ignore: &CharClass) -> Result<Self, SlugError> {
        let body = format!("{}{}", valid.regex_body(), ignore.regex_body());
        let invalid_runs = if body.is_empty() { "(?s:.)+".to_string() } else { format!("[^{body}]+") };
        let cased = |category: &str| {
            if body.is_empty() { format!(r"\p{{{category}}}") } else { format!(r"[\p{{{category}}}--[{body}]]") }
        };

        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|err| SlugError::MalformedClassSpec {
                option: "valid",
                spec: valid.spec().to_string(),
                reason: err.to_string(),
            })
        };

        Ok(Scopes {
            invalid_runs: compile(invalid_runs)?,
            invalid_upper: compile(cased("Lu"))?,
            invalid_lower: compile(cased("Ll"))?,
        })
    }
}

fn default_chain(locale: &Locale, valid: &CharClass, scopes: &Scopes) -> Vec<TransformStep> {
    let probe = |operation, scope: &Regex| TransformStep::Named {
        operation,
        locale: locale.clone(),
        scope: Some(scope.clone()),
        mode: Mode::Probe(valid.clone()),
    };
    let fold = |operation| TransformStep::Named {
        operation,
        locale: locale.clone(),
        scope: Some(scopes.invalid_runs.clone()),
        mode: Mode::Replace,
    };

    vec![
        probe(Operation::Lower, &scopes.invalid_upper),
        probe(Operation::Upper, &scopes.invalid_lower),
        fold(Operation::Latin),
        fold(Operation::Ascii),
        probe(Operation::Lower, &scopes.invalid_upper),
        probe(Operation::Upper, &scopes.invalid_lower),
    ]
}

/// A `transforms` entry: a rule string if it contains `>`, an operation
/// name otherwise.
fn main_step(descriptor: &str, locale: &Locale, scopes: &Scopes) -> Result<TransformStep, SlugError> {
    if descriptor.contains('>') {
        return custom_step(descriptor, locale, Some(&scopes.invalid_runs));
    }

    let operation = Operation::from_name(descriptor)
        .ok_or_else(|| SlugError::UnknownTransform { name: descriptor.to_string(), locale: locale.tag().to_string() })?;

    Ok(TransformStep::Named {
        operation,
        locale: locale.clone(),
        scope: Some(scopes.invalid_runs.clone()),
        mode: Mode::Replace,
    })
}

fn custom_step(rule: &str, locale: &Locale, scope: Option<&Regex>) -> Result<TransformStep, SlugError> {
    let rules = RuleSet::parse(rule).map_err(|err| SlugError::MalformedRule {
        rule: rule.to_string(),
        locale: locale.tag().to_string(),
        fragment: err.fragment,
        reason: err.kind.to_string(),
    })?;
    trace!("parsed {} clauses from {rule:?}", rules.pairs().len());
    Ok(TransformStep::Custom { rules, scope: scope.cloned() })
}
