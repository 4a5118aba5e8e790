use crate::{SlugError, SlugGenerator, SlugOptions, slugify};
use proptest::prelude::*;

fn options(pairs: &[(&str, &str)]) -> SlugOptions {
    pairs.iter().fold(SlugOptions::new(), |options, &(key, value)| match key {
        "locale" => options.locale(value),
        "valid" => options.valid(value),
        "ignore" => options.ignore(value),
        "delimiter" => options.delimiter(value),
        "pre" => options.pre_transform(value),
        "transform" => options.transform(value),
        "post" => options.post_transform(value),
        other => panic!("unknown option key {other:?}"),
    })
}

#[test]
fn generate_examples() {
    // (input, expected, options)
    let cases: &[(&str, &str, &[(&str, &str)])] = &[
        ("föobär", "foobar", &[]),
        ("föobär", "foeobaer", &[("locale", "de")]),
        ("föobär", "foobar", &[("locale", "en_US")]),
        ("Ö Äpfel-Fuß", "OE-Aepfel-Fuss", &[("valid", "a-zA-Z"), ("locale", "de")]),
        (
            "Ö Ä Ü ẞ ÖX ÄX ÜX ẞX Öx Äx Üx ẞx Öö Ää Üü ẞß",
            "OE-AE-UE-SS-OEX-AEX-UEX-SSX-Oex-Aex-Uex-SSx-Oeoe-Aeae-Ueue-SSss",
            &[("valid", "a-zA-Z"), ("locale", "de")],
        ),
        (
            "O\u{308} A\u{308} U\u{308} O\u{308}X A\u{308}X U\u{308}X O\u{308}x A\u{308}x U\u{308}x O\u{308}o\u{308} A\u{308}a\u{308} U\u{308}u\u{308}",
            "OE-AE-UE-OEX-AEX-UEX-Oex-Aex-Uex-Oeoe-Aeae-Ueue",
            &[("valid", "a-zA-Z"), ("locale", "de")],
        ),
        ("Ö Äpfel-Fuß", "ö-äpfel-fuß", &[("valid", "a-zäöüß")]),
        ("ö-äpfel-fuß", "OE__AEPFEL__FUSS", &[("valid", "A-Z"), ("delimiter", "__"), ("locale", "de")]),
        ("İNATÇI", "inatci", &[]),
        ("inatçı", "INATCI", &[("valid", "A-Z")]),
        ("İNATÇI", "inatçı", &[("valid", "a-pr-vyzçğıöşü"), ("locale", "tr")]),
        ("inatçı", "İNATÇI", &[("valid", "A-PR-VYZÇĞİÖŞÜ"), ("locale", "tr")]),
        ("Καλημέρα", "kalimera", &[("locale", "el")]),
        ("國語", "guo-yu", &[]),
        ("富士山", "fu-shi-shan", &[("locale", "ja")]),
        ("富士山", "fù-shì-shān", &[("valid", "\\p{Latin}")]),
        (
            "Exämle <!-- % {{BR}} --> <a href=\"http://example.com\">",
            "exämle-br-a-href-http-example-com",
            &[("valid", "\\p{Ll}")],
        ),
        (
            "Exämle <!-- % {{BR}} --> <a href=\"http://example.com\">",
            "EXÄMLE-BR-A-HREF-HTTP-EXAMPLE-COM",
            &[("valid", "\\p{Lu}")],
        ),
        ("ǈ ǋ ǲ", "lj-nj-dz", &[("valid", "\\p{Ll}")]),
        ("ǈ ǋ ǲ", "LJ-NJ-DZ", &[("valid", "\\p{Lu}")]),
        ("ABC", "ac", &[("ignore", "b")]),
        ("Don’t they're", "dont-theyre", &[("ignore", "’'")]),
        ("фильм", "film", &[]),
        ("Україна", "ukraina", &[]),
        ("Č Ć Ž Š Đ č ć ž š đ", "c-c-z-s-d-c-c-z-s-d", &[]),
        ("Ą Č Ę Ė Į Š Ų Ū Ž ą č ę ė į š ų ū ž", "a-c-e-e-i-s-u-u-z-a-c-e-e-i-s-u-u-z", &[]),
        ("abc", "1b3", &[("valid", "b\\d"), ("transform", "a > 1; b > 1; c > 3;")]),
        ("o ö", "o-x", &[("pre", "ö > ä"), ("pre", "ä > x")]),
        ("o ö", "o-o", &[("post", "ö > ä"), ("post", "ä > x")]),
        ("김, 국삼", "gim-gugsam", &[]),
        ("Καλημέρα", "kalemera", &[]),
        ("０ １ ９ ⑽ ⒒ ¼ Ⅻ", "0-1-9-10-11-1-4-xii", &[]),
        ("Damn 💩!!", "damn-chocolate-ice-cream", &[("pre", "💩 > Chocolate \\u0020 Ice \\u0020 Cream")]),
        ("-A B C-", "abc", &[("delimiter", "")]),
    ];

    for &(input, expected, pairs) in cases {
        let options = options(pairs);

        let instance = SlugGenerator::new(options.clone());
        assert_eq!(instance.generate(input).unwrap(), expected, "instance options, input {input:?}");

        let per_call = SlugGenerator::default();
        assert_eq!(per_call.generate_with(input, &options).unwrap(), expected, "per-call options, input {input:?}");
    }
}

#[test]
fn explicit_transform_chains() {
    let generator = SlugGenerator::default();

    let upper = SlugOptions::new().valid("A-Z").transform("upper");
    assert_eq!(generator.generate_with("abc def", &upper).unwrap(), "ABC-DEF");

    let no_chain = SlugOptions::new().transforms(Vec::<String>::new());
    assert_eq!(generator.generate_with("Abc Ä", &no_chain).unwrap(), "bc");

    let ascii_then_lower = SlugOptions::new().locale("de").transforms(["ASCII", "Lower"]);
    assert_eq!(generator.generate_with("Grüße", &ascii_then_lower).unwrap(), "gruesse");
}

#[test]
fn non_utf8_input_is_rejected() {
    let err = SlugGenerator::default().generate_bytes(b"\x80", None).unwrap_err();
    assert!(matches!(err, SlugError::InvalidEncoding { offset: 0, .. }));
    assert!(err.to_string().to_ascii_lowercase().contains("utf-8"));
}

#[test]
fn unknown_transform_names_rule_and_locale() {
    let options = SlugOptions::new().transform("invalid rule").locale("de_AT");
    let err = SlugGenerator::default().generate_with("foö", &options).unwrap_err();
    let message = err.to_string();
    let rule = message.find("\"invalid rule\"").unwrap();
    let locale = message.find("\"de_AT\"").unwrap();
    assert!(rule < locale);
}

#[test]
fn malformed_rules_fail_before_any_output() {
    let generator = SlugGenerator::default();
    for rule in ["a > b > c", "> b", "a \\u12", "'a > b"] {
        let err = generator.generate_with("abc", &SlugOptions::new().pre_transform(rule)).unwrap_err();
        assert!(matches!(err, SlugError::MalformedRule { .. }), "rule {rule:?} gave {err:?}");
    }

    let err = generator.generate_with("abc", &SlugOptions::new().valid("z-a")).unwrap_err();
    assert!(matches!(err, SlugError::MalformedClassSpec { option: "valid", .. }));
}

#[test]
fn generator_is_shareable_between_threads() {
    let generator = std::sync::Arc::new(SlugGenerator::new(SlugOptions::new().locale("de")));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let generator = generator.clone();
            std::thread::spawn(move || generator.generate(&format!("Äpfel {i}")).unwrap())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("aepfel-{i}"));
    }
}

proptest! {
    #[test]
    fn default_chain_on_ascii_lowercases_and_joins(text in "[ -~]{0,40}") {
        let runs = regex::Regex::new("[^a-z0-9]+").unwrap();
        let expected = runs.replace_all(&text.to_ascii_lowercase(), "-").trim_matches('-').to_string();
        prop_assert_eq!(slugify(&text).unwrap(), expected);
    }

    #[test]
    fn default_slugs_are_lowercase_ascii(text in "\\PC{0,40}") {
        let slug = slugify(&text).unwrap();
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn slugs_are_fixed_points(text in "[a-zA-Z0-9 ,.!?-]{0,40}") {
        let once = slugify(&text).unwrap();
        prop_assert_eq!(slugify(&once).unwrap(), once.clone());
    }

    #[test]
    fn ignored_code_points_do_not_matter(text in "[a-zA-Z ]{0,20}", marks in "[’']{0,5}") {
        let options = SlugOptions::new().ignore("’'");
        let generator = SlugGenerator::default();
        let mut marked = text.clone();
        marked.insert_str(marked.len() / 2, &marks);
        let expected = generator.generate_with(&text, &options).unwrap();
        prop_assert_eq!(generator.generate_with(&marked, &options).unwrap(), expected);
    }
}
