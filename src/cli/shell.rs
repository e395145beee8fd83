use std::io::{BufRead, Write};

use crate::editor::editor::SelectorEditor;
use crate::editor::editor_model::{GenerateOutcome, NotificationKind};
use crate::selector::selector_model::SelectorPair;
use crate::source::selector_source::SelectorSource;
use crate::viewer::console::{SavedFormsViewer, format_form, truncate};

pub const HELP: &str = "\
Commands:
  name <text>                   set the form name
  url <url>                     set the page URL
  generate [url]                request generated selectors
  list                          show the working selector list
  suggestions                   show label/value suggestions
  add <label> <value>           append a selector
  draft-label <text>            set the new-pair draft label
  draft-value <text>            set the new-pair draft value
  add-draft                     append the draft
  edit-label <value> <label>    relabel the selector with this value
  edit-value <label> <value>    change the value of the selector with this label
  delete <label> <value>        remove a selector
  save                          save the form and start over
  forms                         show saved forms
  show <fingerprint>            show one saved form
  status                        show editor state
  help                          this text
  quit                          leave the session
Arguments containing spaces go in double quotes.
";

/// Result of one shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Continue(String),
    Quit,
}

// ============================================================================
// Line-oriented editing session
// ============================================================================

pub struct Shell {
    pub editor: SelectorEditor,
    pub viewer: SavedFormsViewer,
    source: Box<dyn SelectorSource>,
}

impl Shell {
    pub fn new(
        editor: SelectorEditor,
        viewer: SavedFormsViewer,
        source: Box<dyn SelectorSource>,
    ) -> Self {
        Self {
            editor,
            viewer,
            source,
        }
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> std::io::Result<()> {
        for line in input.lines() {
            match self.execute(&line?) {
                ShellOutcome::Continue(text) => {
                    if !text.is_empty() {
                        write!(output, "{}", text)?;
                    }
                }
                ShellOutcome::Quit => break,
            }
        }
        output.flush()
    }

    /// Run one command line, returning what to print.
    pub fn execute(&mut self, line: &str) -> ShellOutcome {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return ShellOutcome::Continue(String::new());
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        let mut out = match command {
            "quit" | "exit" => return ShellOutcome::Quit,
            "help" => HELP.to_string(),
            "name" => {
                self.editor.set_name(rest);
                String::new()
            }
            "url" => {
                self.editor.set_url(rest);
                String::new()
            }
            "generate" => self.generate(rest),
            "list" => self.list(),
            "suggestions" => self.suggestions(),
            "status" => self.status(),
            "draft-label" => {
                self.editor.set_draft_label(rest);
                String::new()
            }
            "draft-value" => {
                self.editor.set_draft_value(rest);
                String::new()
            }
            "add-draft" => {
                self.editor.add_draft();
                self.list()
            }
            "add" | "delete" | "edit-label" | "edit-value" => match pair_args(rest) {
                Ok((first, second)) => self.edit(command, first, second),
                Err(e) => format!("{}: {}\n", command, e),
            },
            "save" => match self.editor.commit() {
                Some(form) => format!("Saved [{}] {}\n", form.fingerprint(), form.name),
                None => "Nothing to save: generate selectors first\n".to_string(),
            },
            "forms" => self.viewer.render(),
            "show" => self.show(rest),
            other => format!("Unknown command '{}' (try 'help')\n", other),
        };

        if let Some(notification) = self.editor.notification() {
            let tag = match notification.kind {
                NotificationKind::Success => "ok",
                NotificationKind::Error => "error",
            };
            out.push_str(&format!("[{}] {}\n", tag, notification.message));
            self.editor.dismiss_notification();
        }

        ShellOutcome::Continue(out)
    }

    fn generate(&mut self, url: &str) -> String {
        if !url.is_empty() {
            self.editor.set_url(url);
        }
        match self.editor.generate(self.source.as_ref()) {
            GenerateOutcome::Applied => self.list(),
            GenerateOutcome::Failed | GenerateOutcome::Discarded => String::new(),
        }
    }

    fn edit(&mut self, command: &str, first: String, second: String) -> String {
        match command {
            "add" => self.editor.add_selector(SelectorPair::new(first, second)),
            "delete" => self.editor.delete_selector(&SelectorPair::new(first, second)),
            // edit-label <value> <new label>
            "edit-label" => self.editor.edit_selector_label(SelectorPair::new(second, first)),
            _ => self.editor.edit_selector_value(SelectorPair::new(first, second)),
        }
        self.list()
    }

    fn list(&self) -> String {
        let selectors = self.editor.selectors();
        if selectors.is_empty() {
            return "(no selectors)\n".to_string();
        }
        let width = self.viewer.truncate_at;
        selectors
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{:>3}. {} = {}\n", i + 1, s.label, truncate(&s.value, width)))
            .collect()
    }

    fn suggestions(&self) -> String {
        format!(
            "labels: {}\nvalues: {}\n",
            self.editor.label_suggestions().join(", "),
            self.editor.value_suggestions().join(", ")
        )
    }

    fn status(&self) -> String {
        let draft = self.editor.draft();
        format!(
            "phase: {:?}\nname: {}\nurl: {}\nselectors: {}\ndraft: {} = {}\nsaved forms: {}\n",
            self.editor.phase(),
            self.editor.name(),
            self.editor.url(),
            self.editor.selectors().len(),
            draft.label,
            draft.value,
            self.editor.store().len()
        )
    }

    fn show(&self, fingerprint: &str) -> String {
        if fingerprint.is_empty() {
            return "show: expected a fingerprint\n".to_string();
        }
        let found = self
            .viewer
            .forms()
            .into_iter()
            .find(|f| f.fingerprint().starts_with(fingerprint));
        match found {
            Some(form) => format_form(&form, 0),
            None => format!("No saved form matches '{}'\n", fingerprint),
        }
    }
}

/// Exactly two arguments.
fn pair_args(rest: &str) -> Result<(String, String), String> {
    let mut args = tokenize(rest)?;
    if args.len() != 2 {
        return Err(format!("expected 2 arguments, got {}", args.len()));
    }
    let second = args.pop().unwrap_or_default();
    let first = args.pop().unwrap_or_default();
    Ok((first, second))
}

/// Split on whitespace, keeping double-quoted runs together.
///
/// Single quotes are literal so selectors like `input[name='q']` need no
/// escaping. Inside double quotes `\"` and `\\` are escapes.
pub fn tokenize(input: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return Err("unterminated quote".to_string()),
                        },
                        Some(other) => current.push(other),
                        None => return Err("unterminated quote".to_string()),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            other => {
                in_token = true;
                current.push(other);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
