use std::io::BufReader;
use std::time::Duration;

use crate::cli::shell::Shell;
use crate::editor::editor::SelectorEditor;
use crate::editor::editor_model::{GenerateOutcome, GeneratePolicy};
use crate::source::selector_source::{HttpSelectorSource, MockSelectorSource, SelectorSource};
use crate::store::selector_store::SelectorStore;
use crate::trace::logger::TraceLogger;
use crate::viewer::console::{SavedFormsViewer, truncate};

// ============================================================================
// generate subcommand
// ============================================================================

/// Generate selectors for one URL and print them. Returns whether the
/// request succeeded.
pub fn cmd_generate(
    url: &str,
    source_name: &str,
    api_url: &str,
    timeout: Option<Duration>,
    truncate_at: usize,
) -> Result<bool, Box<dyn std::error::Error>> {
    let source = build_source(source_name, api_url, timeout)?;
    let mut editor = SelectorEditor::new(SelectorStore::new());
    editor.set_url(url);

    if editor.generate(source.as_ref()) != GenerateOutcome::Applied {
        let message = editor
            .notification()
            .map(|n| n.message.clone())
            .unwrap_or_else(|| "Error fetching data".to_string());
        eprintln!("{}", message);
        return Ok(false);
    }

    println!("Generated {} selectors for {}", editor.selectors().len(), url);
    for pair in editor.selectors() {
        println!("  {}: {}", pair.label, truncate(&pair.value, truncate_at));
    }
    if !editor.value_suggestions().is_empty() {
        println!("Value suggestions: {}", editor.value_suggestions().join(", "));
    }

    Ok(true)
}

// ============================================================================
// session subcommand
// ============================================================================

pub struct SessionOptions<'a> {
    pub source_name: &'a str,
    pub api_url: &'a str,
    pub timeout: Option<Duration>,
    pub script: Option<&'a str>,
    pub format: &'a str,
    pub truncate_at: usize,
    pub policy: GeneratePolicy,
    pub trace_path: Option<&'a str>,
}

/// Run an interactive (or scripted) editing session, then print the
/// saved forms in the requested format.
pub fn cmd_session(options: &SessionOptions<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let source = build_source(options.source_name, options.api_url, options.timeout)?;
    let store = SelectorStore::new();
    store.subscribe(|forms| log::debug!("store now holds {} forms", forms.len()));

    let mut editor = SelectorEditor::new(store.clone()).with_policy(options.policy);
    if let Some(path) = options.trace_path {
        editor = editor.with_tracer(TraceLogger::new(path));
    }
    let viewer = SavedFormsViewer::new(store).with_truncate_at(options.truncate_at);

    let mut shell = Shell::new(editor, viewer, source);
    let mut stdout = std::io::stdout();

    match options.script {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            shell.run(BufReader::new(file), &mut stdout)?;
        }
        None => {
            println!("Form automation session. Type 'help' for commands.");
            shell.run(std::io::stdin().lock(), &mut stdout)?;
        }
    }

    print!("{}", shell.viewer.render_as(options.format)?);
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Build the selector source by name.
pub fn build_source(
    name: &str,
    api_url: &str,
    timeout: Option<Duration>,
) -> Result<Box<dyn SelectorSource>, Box<dyn std::error::Error>> {
    match name {
        "mock" => Ok(Box::new(MockSelectorSource::demo())),
        _ => Ok(Box::new(HttpSelectorSource::new(api_url, timeout)?)),
    }
}
