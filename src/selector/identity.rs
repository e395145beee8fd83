use crate::selector::selector_model::Form;

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 12;

/// Canonical text a form is hashed over.
pub fn form_key(form: &Form) -> String {
    let pairs = form
        .selectors
        .iter()
        .map(|p| format!("{}={}", p.label, p.value))
        .collect::<Vec<_>>()
        .join("\u{1f}");

    format!("{}\u{1e}{}\u{1e}{}", form.name, form.url, pairs)
}

/// Short content digest used as a display handle for saved forms.
///
/// Identical forms share a fingerprint.
pub fn form_fingerprint(form: &Form) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(form_key(form).as_bytes());
    let full = format!("{:x}", hasher.finalize());
    full[..FINGERPRINT_LEN].to_string()
}

impl Form {
    pub fn fingerprint(&self) -> String {
        form_fingerprint(self)
    }
}
