use slugline::{SlugDetails, Stage, StepTrace};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            self.wrap(s.as_ref(), color)
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.wrap(s.as_ref(), BOLD)
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.wrap(s.as_ref(), DIM)
        }

        fn wrap(&self, s: &str, code: &str) -> String {
            if self.enabled { format!("{code}{s}{RESET}") } else { s.to_string() }
        }
    }
}

pub fn print_run(details: &SlugDetails, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Slugging: {:?}", details.text), ansi::CYAN)));
    if !details.locale.is_empty() {
        println!("  {} {}", palette.dim("locale:"), palette.paint(&details.locale, ansi::BLUE));
    }
    if details.prepared != details.text {
        println!("  {} {:?}", palette.dim("prepared:"), details.prepared);
    }

    println!("\n{}", palette.paint("━━━ Pipeline ━━━", ansi::GRAY));
    if details.steps.is_empty() {
        println!("{}", palette.dim("  No steps"));
    }
    for (idx, step) in details.steps.iter().enumerate() {
        print_step(idx, step, &palette);
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    if details.slug.is_empty() {
        println!("  {}", palette.paint("(empty slug)", ansi::YELLOW));
        println!("{}", palette.dim("  Tip: check --valid; every character was treated as invalid"));
    } else {
        println!("  {}", palette.bold(palette.paint(&details.slug, ansi::GREEN)));
    }

    let steps_total: std::time::Duration = details.steps.iter().map(|s| s.duration).sum();
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Steps: {}  │  Filter: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(format!("{steps_total:?}"), ansi::CYAN),
        palette.dim(format!("{:?}", details.filter)),
    );
    println!();
}

fn print_step(idx: usize, step: &StepTrace, palette: &ansi::Palette) {
    let stage = match step.stage {
        Stage::Pre => palette.paint("pre ", ansi::MAGENTA),
        Stage::Main => palette.paint("main", ansi::BLUE),
        Stage::Post => palette.paint("post", ansi::MAGENTA),
    };

    if step.skipped {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            stage,
            palette.dim(&step.label),
            palette.dim("(skipped)")
        );
        return;
    }

    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{idx}]"), ansi::GRAY),
        stage,
        palette.paint(&step.label, ansi::CYAN),
        palette.dim(format!("{:?}", step.duration))
    );
    println!("      {} {}", palette.dim("→"), palette.paint(format!("{:?}", step.output), ansi::YELLOW));
}
