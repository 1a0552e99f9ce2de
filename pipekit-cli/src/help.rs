//! Long-form help text: the boxed banner shown before the options and the
//! examples epilog shown after them.

use crate::style::TermStyle;

const BOX_WIDTH: usize = 78;

/// Text shown above the generated option list
pub struct Banner<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub description: &'a [&'a str],
    pub workflow: &'a [&'a str],
}

impl Banner<'_> {
    pub fn render(&self, style: TermStyle) -> String {
        let rule = "═".repeat(BOX_WIDTH);
        let boxed = [
            format!("╔{rule}╗"),
            format!("║{:^width$}║", self.title, width = BOX_WIDTH),
            format!("║{:^width$}║", self.subtitle, width = BOX_WIDTH),
            format!("╚{rule}╝"),
        ]
        .join("\n");

        let mut out = style.banner(&boxed);
        out.push_str("\n\n");
        out.push_str(&style.bold("Description:"));
        out.push('\n');
        for line in self.description {
            out.push_str(&format!("  {line}\n"));
        }
        out.push('\n');
        out.push_str(&style.bold("Workflow:"));
        out.push('\n');
        for (i, step) in self.workflow.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, step));
        }
        out
    }
}

/// A titled group of commented example invocations
pub struct ExampleGroup<'a> {
    pub heading: &'a str,
    /// `(comment, command)` pairs; commands may span lines
    pub examples: &'a [(&'a str, &'a str)],
}

/// Builder for the epilog printed after the option list
pub struct Epilog {
    style: TermStyle,
    out: String,
}

impl Epilog {
    pub fn new(style: TermStyle) -> Self {
        Epilog {
            style,
            out: String::new(),
        }
    }

    fn section(&mut self, title: &str) {
        let rule = "═".repeat(BOX_WIDTH + 1);
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(&self.style.banner(&rule));
        self.out.push('\n');
        self.out.push_str(&self.style.bold(title));
        self.out.push('\n');
        self.out.push_str(&self.style.success(&rule));
        self.out.push_str("\n\n");
    }

    pub fn examples(mut self, groups: &[ExampleGroup<'_>]) -> Self {
        self.section("EXAMPLES");
        for group in groups {
            self.out.push_str(&self.style.bold(group.heading));
            self.out.push_str("\n\n");
            for (comment, command) in group.examples {
                self.out
                    .push_str(&format!("  {}\n", self.style.comment(&format!("# {comment}"))));
                for line in command.lines() {
                    self.out.push_str(&format!("  {line}\n"));
                }
                self.out.push('\n');
            }
        }
        self
    }

    /// A name/description table followed by a note
    pub fn definitions(mut self, title: &str, entries: &[(&str, &str)], note: &str) -> Self {
        self.section(title);
        for (name, description) in entries {
            // Pad before painting so escape codes don't skew the column
            let padded = format!("{name:<14}");
            self.out
                .push_str(&format!("  {} {}\n", self.style.term(&padded), description));
        }
        self.out.push('\n');
        self.out
            .push_str(&format!("{} {}\n", self.style.bold("Note:"), note));
        self
    }

    pub fn more_information(mut self, homepage: &str, version: &str) -> Self {
        self.section("MORE INFORMATION");
        self.out
            .push_str(&format!("  Documentation:  {homepage}\n"));
        self.out
            .push_str(&format!("  Report Issues:  {homepage}/issues\n"));
        self.out.push_str(&format!("  Version:        {version}\n"));
        self
    }

    pub fn build(self) -> String {
        self.out
    }
}
