use crate::engine::{Plan, Stage};
use crate::error::SlugError;
use crate::translit::{Transliterate, UnicodeTransliterator};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Characters allowed in a slug when no `valid` class is given.
pub const DEFAULT_VALID: &str = "a-z0-9";
/// Separator used for invalid runs when no `delimiter` is given.
pub const DEFAULT_DELIMITER: &str = "-";

static DEFAULT_PLAN: Lazy<Result<Plan, SlugError>> = Lazy::new(|| Plan::compile(&SlugOptions::default()));

/// Slug generation options.
///
/// Every field is optional. Unset fields fall back to the generator's
/// instance options and then to the built-in defaults:
///
/// | field             | default                      |
/// |-------------------|------------------------------|
/// | `locale`          | root (no locale rules)       |
/// | `valid`           | [`DEFAULT_VALID`]            |
/// | `ignore`          | nothing                      |
/// | `delimiter`       | [`DEFAULT_DELIMITER`]        |
/// | `pre_transforms`  | none                         |
/// | `transforms`      | the built-in default chain   |
/// | `post_transforms` | none                         |
///
/// Options deserialize from camelCase keys (`preTransforms`) as well as
/// snake_case ones (`pre_transforms`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SlugOptions {
    pub locale: Option<String>,
    pub valid: Option<String>,
    pub ignore: Option<String>,
    pub delimiter: Option<String>,
    #[serde(alias = "pre_transforms")]
    pub pre_transforms: Option<Vec<String>>,
    /// Main-chain descriptors. `Some(vec![])` disables the main chain.
    pub transforms: Option<Vec<String>>,
    #[serde(alias = "post_transforms")]
    pub post_transforms: Option<Vec<String>>,
}

impl SlugOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn valid(mut self, valid: impl Into<String>) -> Self {
        self.valid = Some(valid.into());
        self
    }

    pub fn ignore(mut self, ignore: impl Into<String>) -> Self {
        self.ignore = Some(ignore.into());
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Append a rule string applied before the main chain.
    pub fn pre_transform(mut self, rule: impl Into<String>) -> Self {
        self.pre_transforms.get_or_insert_with(Vec::new).push(rule.into());
        self
    }

    /// Append a main-chain descriptor, replacing the default chain.
    pub fn transform(mut self, descriptor: impl Into<String>) -> Self {
        self.transforms.get_or_insert_with(Vec::new).push(descriptor.into());
        self
    }

    /// Replace the main chain with `descriptors` (which may be empty).
    pub fn transforms<I, S>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transforms = Some(descriptors.into_iter().map(Into::into).collect());
        self
    }

    /// Append a rule string applied after the main chain.
    pub fn post_transform(mut self, rule: impl Into<String>) -> Self {
        self.post_transforms.get_or_insert_with(Vec::new).push(rule.into());
        self
    }

    /// Apply `overrides` field by field on top of `self`. Lists are replaced, not
    /// concatenated.
    pub fn merged(&self, overrides: &SlugOptions) -> SlugOptions {
        fn pick<T: Clone>(over: &Option<T>, base: &Option<T>) -> Option<T> {
            over.as_ref().or(base.as_ref()).cloned()
        }

        SlugOptions {
            locale: pick(&overrides.locale, &self.locale),
            valid: pick(&overrides.valid, &self.valid),
            ignore: pick(&overrides.ignore, &self.ignore),
            delimiter: pick(&overrides.delimiter, &self.delimiter),
            pre_transforms: pick(&overrides.pre_transforms, &self.pre_transforms),
            transforms: pick(&overrides.transforms, &self.transforms),
            post_transforms: pick(&overrides.post_transforms, &self.post_transforms),
        }
    }

    /// Parse options from a TOML document.
    ///
    /// ```
    /// use slugline::SlugOptions;
    ///
    /// let options = SlugOptions::from_toml_str("locale = \"de\"\npreTransforms = [\"& > and\"]").unwrap();
    /// assert_eq!(options.locale.as_deref(), Some("de"));
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, SlugError> {
        toml::from_str(source).map_err(|err| SlugError::InvalidOptions { reason: err.to_string() })
    }
}

/// Per-step trace returned by [`SlugGenerator::generate_verbose`].
#[derive(Debug, Clone)]
pub struct StepTrace {
    pub stage: Stage,
    pub label: String,
    /// Working text after the step.
    pub output: String,
    /// The step could not change the text and was not executed.
    pub skipped: bool,
    pub duration: Duration,
}

/// Result of [`SlugGenerator::generate_verbose`].
///
/// Meant for debugging rule sets and class specs; the plain
/// [`SlugGenerator::generate`] path does not collect any of this.
#[derive(Debug, Clone)]
pub struct SlugDetails {
    /// The input text.
    pub text: String,
    pub slug: String,
    /// Locale tag in effect.
    pub locale: String,
    /// Input after ignored code points were removed and the text was composed.
    pub prepared: String,
    pub steps: Vec<StepTrace>,
    /// Time spent in the final filter and collapse pass.
    pub filter: Duration,
    pub total: Duration,
}

/// Slug generator with instance-level default options.
///
/// The generator is immutable and `Send + Sync`; share it freely between
/// threads. Per-call options given to [`generate_with`](Self::generate_with)
/// override the instance options for that call only.
///
/// # Example
/// ```
/// use slugline::{SlugGenerator, SlugOptions};
///
/// let generator = SlugGenerator::new(SlugOptions::new().locale("de"));
/// assert_eq!(generator.generate("Öl & Äpfel").unwrap(), "oel-aepfel");
/// ```
#[derive(Clone)]
pub struct SlugGenerator {
    options: SlugOptions,
    transliterator: Arc<dyn Transliterate>,
}

impl Default for SlugGenerator {
    fn default() -> Self {
        Self::new(SlugOptions::default())
    }
}

impl fmt::Debug for SlugGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlugGenerator")
            .field("options", &self.options)
            .field("transliterator", &"<dyn Transliterate>")
            .finish()
    }
}

impl SlugGenerator {
    pub fn new(options: SlugOptions) -> Self {
        Self::with_transliterator(options, UnicodeTransliterator)
    }

    /// Use a custom transliteration backend.
    pub fn with_transliterator(options: SlugOptions, transliterator: impl Transliterate + 'static) -> Self {
        Self { options, transliterator: Arc::new(transliterator) }
    }

    pub fn options(&self) -> &SlugOptions {
        &self.options
    }

    pub fn generate(&self, text: &str) -> Result<String, SlugError> {
        self.generate_with(text, &SlugOptions::default())
    }

    /// Generate a slug with `overrides` applied on top of the instance options.
    pub fn generate_with(&self, text: &str, overrides: &SlugOptions) -> Result<String, SlugError> {
        let plan = Plan::compile(&self.options.merged(overrides))?;
        Ok(plan.run(text, self.transliterator.as_ref()))
    }

    /// Like [`generate_with`](Self::generate_with) for raw bytes, which must
    /// be valid UTF-8.
    pub fn generate_bytes(&self, bytes: &[u8], overrides: Option<&SlugOptions>) -> Result<String, SlugError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|err| SlugError::InvalidEncoding { expected: "UTF-8", offset: err.valid_up_to() })?;
        match overrides {
            Some(overrides) => self.generate_with(text, overrides),
            None => self.generate(text),
        }
    }

    /// Generate a slug and return a per-step trace with timings.
    pub fn generate_verbose(&self, text: &str, overrides: &SlugOptions) -> Result<SlugDetails, SlugError> {
        let plan = Plan::compile(&self.options.merged(overrides))?;
        let (slug, metrics) = plan.run_with_metrics(text, self.transliterator.as_ref());

        let steps = metrics
            .steps
            .into_iter()
            .map(|s| StepTrace {
                stage: s.stage,
                label: s.label,
                output: s.output,
                skipped: s.skipped,
                duration: s.duration,
            })
            .collect();

        Ok(SlugDetails {
            text: text.to_string(),
            slug,
            locale: plan.locale().tag().to_string(),
            prepared: metrics.prepared,
            steps,
            filter: metrics.filter,
            total: metrics.total,
        })
    }
}

/// Slugify `text` with the default options and transliterator.
///
/// # Example
/// ```
/// use slugline::slugify;
///
/// assert_eq!(slugify("Hello World!").unwrap(), "hello-world");
/// ```
pub fn slugify(text: &str) -> Result<String, SlugError> {
    match &*DEFAULT_PLAN {
        Ok(plan) => Ok(plan.run(text, &UnicodeTransliterator)),
        Err(err) => Err(err.clone()),
    }
}

/// Slugify `text` with `options` and the default transliterator.
pub fn slugify_with(text: &str, options: &SlugOptions) -> Result<String, SlugError> {
    Ok(Plan::compile(options)?.run(text, &UnicodeTransliterator))
}
