use form_automation::cli::shell::{Shell, ShellOutcome, tokenize};
use form_automation::editor::editor::SelectorEditor;
use form_automation::editor::editor_model::EditorPhase;
use form_automation::source::selector_source::MockSelectorSource;
use form_automation::store::selector_store::SelectorStore;
use form_automation::viewer::console::SavedFormsViewer;

use crate::common::fixtures::{CONTACT_URL, contact_source, pair};

mod common;

fn shell_with(source: MockSelectorSource) -> (SelectorStore, Shell) {
    let store = SelectorStore::new();
    let editor = SelectorEditor::new(store.clone());
    let viewer = SavedFormsViewer::new(store.clone());
    (store, Shell::new(editor, viewer, Box::new(source)))
}

fn output(shell: &mut Shell, line: &str) -> String {
    match shell.execute(line) {
        ShellOutcome::Continue(text) => text,
        ShellOutcome::Quit => panic!("unexpected quit on '{}'", line),
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

#[test]
fn tokenize_plain_words() {
    assert_eq!(tokenize("a  b\tc").unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn tokenize_double_quotes_group() {
    assert_eq!(
        tokenize(r#""first name" "form > input[name='first']""#).unwrap(),
        vec!["first name", "form > input[name='first']"]
    );
}

#[test]
fn tokenize_single_quotes_are_literal() {
    assert_eq!(
        tokenize("email input[type='email']").unwrap(),
        vec!["email", "input[type='email']"]
    );
}

#[test]
fn tokenize_empty_quotes_give_empty_token() {
    assert_eq!(tokenize(r#"p """#).unwrap(), vec!["p", ""]);
}

#[test]
fn tokenize_escapes_inside_quotes() {
    assert_eq!(tokenize(r#""a \"b\"""#).unwrap(), vec![r#"a "b""#]);
}

#[test]
fn tokenize_unterminated_quote_fails() {
    assert!(tokenize(r#""open"#).is_err());
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn full_session_saves_form() {
    let (store, mut shell) = shell_with(contact_source());

    output(&mut shell, "name Contact us");
    output(&mut shell, &format!("url {}", CONTACT_URL));
    let listed = output(&mut shell, "generate");
    assert!(listed.contains("1. h1 = .title"));
    assert!(listed.contains("2. p = "));

    output(&mut shell, r#"add submit "button[type='submit']""#);
    output(&mut shell, "edit-value p .lead");
    output(&mut shell, "edit-label .title heading");
    output(&mut shell, "delete submit button[type='submit']");

    let saved = output(&mut shell, "save");
    assert!(saved.starts_with("Saved ["));
    assert!(saved.contains("[ok] Form saved successfully"));

    let forms = store.forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].name, "Contact us");
    assert_eq!(forms[0].url, CONTACT_URL);
    assert_eq!(forms[0].selectors, vec![pair("heading", ".title"), pair("p", ".lead")]);
    assert_eq!(shell.editor.phase(), EditorPhase::Idle);
}

#[test]
fn generate_with_inline_url() {
    let (_, mut shell) = shell_with(contact_source());
    output(&mut shell, &format!("generate {}", CONTACT_URL));
    assert_eq!(shell.editor.url(), CONTACT_URL);
    assert_eq!(shell.editor.selectors().len(), 2);
}

#[test]
fn failed_generate_prints_error_once() {
    let (_, mut shell) = shell_with(MockSelectorSource::failing("backend offline"));
    let out = output(&mut shell, "generate https://a.test");
    assert_eq!(out, "[error] Error fetching data: backend offline\n");
    assert!(shell.editor.notification().is_none());
    assert_eq!(shell.editor.phase(), EditorPhase::Failed);
}

#[test]
fn save_before_generate_is_refused() {
    let (store, mut shell) = shell_with(contact_source());
    let out = output(&mut shell, "save");
    assert!(out.contains("Nothing to save"));
    assert!(store.is_empty());
}

#[test]
fn draft_commands_build_a_pair() {
    let (_, mut shell) = shell_with(contact_source());
    output(&mut shell, &format!("generate {}", CONTACT_URL));
    output(&mut shell, "draft-label email address");
    output(&mut shell, "draft-value input[type='email']");
    let out = output(&mut shell, "add-draft");

    assert!(out.contains("3. email address = input[type='email']"));
    assert!(shell.editor.draft().is_blank());
}

#[test]
fn wrong_argument_count_is_reported() {
    let (_, mut shell) = shell_with(contact_source());
    let out = output(&mut shell, "add only-one");
    assert_eq!(out, "add: expected 2 arguments, got 1\n");
}

#[test]
fn show_finds_form_by_fingerprint_prefix() {
    let (store, mut shell) = shell_with(contact_source());
    output(&mut shell, "name Contact");
    output(&mut shell, &format!("generate {}", CONTACT_URL));
    output(&mut shell, "save");

    let fingerprint = store.forms()[0].fingerprint();
    let out = output(&mut shell, &format!("show {}", &fingerprint[..6]));
    assert!(out.contains("Name: Contact"));
    assert!(out.contains("h1: .title"));

    assert!(output(&mut shell, "show ffffffffffff").contains("No saved form matches"));
}

#[test]
fn forms_command_renders_store() {
    let (_, mut shell) = shell_with(contact_source());
    assert!(output(&mut shell, "forms").contains("(no saved forms)"));
}

#[test]
fn unknown_and_blank_lines() {
    let (_, mut shell) = shell_with(contact_source());
    assert!(output(&mut shell, "frobnicate").contains("Unknown command 'frobnicate'"));
    assert_eq!(output(&mut shell, "   "), "");
    assert_eq!(output(&mut shell, "# comment"), "");
}

#[test]
fn quit_ends_session() {
    let (_, mut shell) = shell_with(contact_source());
    assert_eq!(shell.execute("quit"), ShellOutcome::Quit);
    assert_eq!(shell.execute("exit"), ShellOutcome::Quit);
}

#[test]
fn run_reads_script_until_quit() {
    let (store, mut shell) = shell_with(contact_source());
    let script = format!(
        "name Scripted\nurl {}\ngenerate\nsave\nquit\nname ignored\n",
        CONTACT_URL
    );
    let mut out = Vec::new();
    shell.run(script.as_bytes(), &mut out).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(shell.editor.name(), "");
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Saved ["));
}
