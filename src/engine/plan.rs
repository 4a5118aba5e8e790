//! A compiled, ready-to-run slug generation plan.

use super::char_class::{CharClass, ClassSyntaxError};
use super::filter;
use super::metrics::RunMetrics;
use super::pipeline::Pipeline;
use crate::api::{DEFAULT_DELIMITER, DEFAULT_VALID, SlugOptions};
use crate::error::SlugError;
use crate::translit::{Locale, Transliterate};
use log::debug;
use std::time::Instant;

/// Everything derived from one effective set of options.
///
/// Compiling a plan performs all validation; running one cannot fail.
#[derive(Debug, Clone)]
pub(crate) struct Plan {
    locale: Locale,
    valid: CharClass,
    ignore: CharClass,
    delimiter: String,
    pipeline: Pipeline,
}

impl Plan {
    pub fn compile(options: &SlugOptions) -> Result<Self, SlugError> {
        let locale = Locale::parse(options.locale.as_deref().unwrap_or(""));
        let valid = class("valid", options.valid.as_deref().unwrap_or(DEFAULT_VALID))?;
        let ignore = class("ignore", options.ignore.as_deref().unwrap_or(""))?;
        let delimiter = options.delimiter.clone().unwrap_or_else(|| DEFAULT_DELIMITER.to_string());

        let pipeline = Pipeline::build(
            &locale,
            &valid,
            &ignore,
            options.pre_transforms.as_deref().unwrap_or_default(),
            options.transforms.as_deref(),
            options.post_transforms.as_deref().unwrap_or_default(),
        )?;

        debug!(
            "compiled plan: locale={:?} valid={:?} ignore={:?} delimiter={:?} steps={}",
            locale.tag(),
            valid.spec(),
            ignore.spec(),
            delimiter,
            pipeline.steps().len()
        );
        Ok(Plan { locale, valid, ignore, delimiter, pipeline })
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn run(&self, text: &str, transliterator: &dyn Transliterate) -> String {
        let prepared = self.prepare(text, transliterator);
        let transformed = self.pipeline.run(&prepared, transliterator);
        filter::filter_and_collapse(&transformed, &self.valid, &self.ignore, &self.delimiter)
    }

    pub fn run_with_metrics(&self, text: &str, transliterator: &dyn Transliterate) -> (String, RunMetrics) {
        let start = Instant::now();
        let mut metrics = RunMetrics::default();

        let prepared = self.prepare(text, transliterator);
        let transformed = self.pipeline.run_with_metrics(&prepared, transliterator, &mut metrics);
        metrics.prepared = prepared;

        let filter_start = Instant::now();
        let slug = filter::filter_and_collapse(&transformed, &self.valid, &self.ignore, &self.delimiter);
        metrics.filter = filter_start.elapsed();
        metrics.total = start.elapsed();

        (slug, metrics)
    }

    /// Drop ignored code points and compose the text.
    fn prepare(&self, text: &str, transliterator: &dyn Transliterate) -> String {
        if self.ignore.is_empty() {
            return transliterator.compose(text).into_owned();
        }
        let stripped: String = text.chars().filter(|c| !self.ignore.contains(*c)).collect();
        transliterator.compose(&stripped).into_owned()
    }
}

fn class(option: &'static str, spec: &str) -> Result<CharClass, SlugError> {
    CharClass::parse(spec).map_err(|err: ClassSyntaxError| SlugError::MalformedClassSpec {
        option,
        spec: spec.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translit::UnicodeTransliterator;

    fn slug(text: &str, options: SlugOptions) -> String {
        Plan::compile(&options).unwrap().run(text, &UnicodeTransliterator)
    }

    #[test]
    fn default_options() {
        assert_eq!(slug("Hello World!", SlugOptions::default()), "hello-world");
        assert_eq!(slug("", SlugOptions::default()), "");
    }

    #[test]
    fn ignored_code_points_are_removed_before_transforming() {
        assert_eq!(slug("ABC", SlugOptions::new().ignore("b")), "ac");
        assert_eq!(slug("Don’t they're", SlugOptions::new().ignore("’'")), "dont-theyre");
    }

    #[test]
    fn malformed_classes_name_the_option() {
        let err = Plan::compile(&SlugOptions::new().ignore("z-a")).unwrap_err();
        assert!(matches!(err, SlugError::MalformedClassSpec { option: "ignore", .. }));

        let err = Plan::compile(&SlugOptions::new().valid("\\p{Nope}")).unwrap_err();
        assert!(matches!(err, SlugError::MalformedClassSpec { option: "valid", .. }));
    }

    #[test]
    fn metrics_cover_the_whole_run() {
        let plan = Plan::compile(&SlugOptions::new().locale("de")).unwrap();
        let (out, metrics) = plan.run_with_metrics("Fuß", &UnicodeTransliterator);
        assert_eq!(out, "fuss");
        assert_eq!(metrics.prepared, "Fuß");
        assert_eq!(metrics.steps.len(), 6);
        assert!(metrics.filter <= metrics.total);
        assert_eq!(plan.locale().tag(), "de");

        let plan = Plan::compile(&SlugOptions::new().ignore("'")).unwrap();
        let (out, metrics) = plan.run_with_metrics("Don't", &UnicodeTransliterator);
        assert_eq!(out, "dont");
        assert_eq!(metrics.prepared, "Dont");
        assert_eq!(metrics.steps[0].output, "dont");
    }
}
