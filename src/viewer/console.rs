use crate::selector::selector_model::Form;
use crate::store::selector_store::SelectorStore;

pub const DEFAULT_TRUNCATE_AT: usize = 48;

// ============================================================================
// Saved forms viewer: read-only projection of the store
// ============================================================================

/// Renders the store's forms, in store order. Never writes to the store.
#[derive(Debug, Clone)]
pub struct SavedFormsViewer {
    store: SelectorStore,
    /// Display width for names, urls and selector values. 0 disables truncation.
    pub truncate_at: usize,
}

impl SavedFormsViewer {
    pub fn new(store: SelectorStore) -> Self {
        Self {
            store,
            truncate_at: DEFAULT_TRUNCATE_AT,
        }
    }

    pub fn with_truncate_at(mut self, width: usize) -> Self {
        self.truncate_at = width;
        self
    }

    pub fn forms(&self) -> Vec<Form> {
        self.store.forms()
    }

    /// Format the store for terminal output.
    ///
    /// ```text
    /// === Saved Forms ===
    ///
    /// [3f0a9c1b2d4e] Name: Contact
    ///     URL: https://example.com/contact
    ///     user_name: input[name='name']
    ///     user_email: input[type='email']
    /// ```
    pub fn render(&self) -> String {
        let forms = self.store.forms();
        let mut out = String::from("=== Saved Forms ===\n\n");

        if forms.is_empty() {
            out.push_str("(no saved forms)\n");
            return out;
        }

        for (i, form) in forms.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format_form(form, self.truncate_at));
        }

        out
    }
}

/// One saved form as a block of lines.
pub fn format_form(form: &Form, width: usize) -> String {
    let mut out = format!(
        "[{}] Name: {}\n    URL: {}\n",
        form.fingerprint(),
        truncate(&form.name, width),
        truncate(&form.url, width)
    );
    for selector in &form.selectors {
        out.push_str(&format!(
            "    {}: {}\n",
            selector.label,
            truncate(&selector.value, width)
        ));
    }
    out
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}\u{2026}", kept)
}
