use crate::{
    editor::editor_model::{
        EditorPhase, GenerateOutcome, GeneratePolicy, GenerateTicket, Notification, SAVED_MESSAGE,
    },
    selector::selector_model::{
        Form, SelectorMap, SelectorPair, label_suggestions, pairs_from_map, value_suggestions,
    },
    source::{error::GenerateError, selector_source::SelectorSource},
    store::selector_store::SelectorStore,
    trace::{logger::TraceLogger, trace::EditorEvent},
};

// ============================================================================
// Selector editor: authoring of one form
// ============================================================================

/// Owns the transient state of one authoring cycle: inputs, the working
/// selector list, autocomplete suggestions, the new-pair draft and the
/// notification. Committed forms go to the shared `SelectorStore`.
pub struct SelectorEditor {
    store: SelectorStore,

    name: String,
    url: String,

    phase: EditorPhase,
    data_fetched: bool,

    label_suggestions: Vec<String>,
    value_suggestions: Vec<String>,
    selectors: Vec<SelectorPair>,
    draft: SelectorPair,

    notification: Option<Notification>,

    policy: GeneratePolicy,
    tickets_issued: u64,

    step: u64,
    tracer: Option<TraceLogger>,
}

impl SelectorEditor {
    pub fn new(store: SelectorStore) -> Self {
        Self {
            store,
            name: String::new(),
            url: String::new(),
            phase: EditorPhase::Idle,
            data_fetched: false,
            label_suggestions: Vec::new(),
            value_suggestions: Vec::new(),
            selectors: Vec::new(),
            draft: SelectorPair::default(),
            notification: None,
            policy: GeneratePolicy::default(),
            tickets_issued: 0,
            step: 0,
            tracer: None,
        }
    }

    pub fn with_policy(mut self, policy: GeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = Some(tracer);
        self
    }

    // ------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------

    pub fn store(&self) -> &SelectorStore {
        &self.store
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == EditorPhase::Loading
    }

    pub fn is_data_fetched(&self) -> bool {
        self.data_fetched
    }

    pub fn selectors(&self) -> &[SelectorPair] {
        &self.selectors
    }

    pub fn label_suggestions(&self) -> &[String] {
        &self.label_suggestions
    }

    pub fn value_suggestions(&self) -> &[String] {
        &self.value_suggestions
    }

    pub fn draft(&self) -> &SelectorPair {
        &self.draft
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_draft_label(&mut self, label: impl Into<String>) {
        self.draft.label = label.into();
    }

    pub fn set_draft_value(&mut self, value: impl Into<String>) {
        self.draft.value = value.into();
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    // ------------------------------------------------------------------
    // Generate
    // ------------------------------------------------------------------

    /// Enter `Loading` for the current URL.
    ///
    /// Outstanding tickets are not cancelled.
    pub fn begin_generate(&mut self) -> GenerateTicket {
        self.tickets_issued += 1;
        self.phase = EditorPhase::Loading;

        let ticket = GenerateTicket {
            id: self.tickets_issued,
            url: self.url.clone(),
        };
        log::info!("generating selectors for {} (request #{})", ticket.url, ticket.id);
        self.record("begin_generate", Some(ticket.url.as_str()), None);
        ticket
    }

    /// Apply the result of a Generate request.
    pub fn finish_generate(
        &mut self,
        ticket: GenerateTicket,
        result: Result<SelectorMap, GenerateError>,
    ) -> GenerateOutcome {
        if self.policy == GeneratePolicy::LatestRequestOnly && ticket.id < self.tickets_issued {
            log::debug!(
                "dropping stale response #{} for {} (latest is #{})",
                ticket.id,
                ticket.url,
                self.tickets_issued
            );
            self.record("discard_generate", Some(ticket.url.as_str()), None);
            return GenerateOutcome::Discarded;
        }

        match result {
            Ok(map) => {
                self.selectors = pairs_from_map(&map);
                self.label_suggestions = label_suggestions(&map);
                self.value_suggestions = value_suggestions(&map);
                self.data_fetched = true;
                self.phase = EditorPhase::Ready;

                log::info!("received {} selectors for {}", self.selectors.len(), ticket.url);
                self.record("generated", Some(ticket.url.as_str()), None);
                GenerateOutcome::Applied
            }
            Err(e) => {
                let message = e.user_message();
                log::error!("{}", message);

                self.selectors.clear();
                self.label_suggestions.clear();
                self.value_suggestions.clear();
                self.data_fetched = false;
                self.phase = EditorPhase::Failed;
                self.notification = Some(Notification::error(message.clone()));

                self.record("generate_failed", Some(ticket.url.as_str()), Some(message.as_str()));
                GenerateOutcome::Failed
            }
        }
    }

    /// Blocking Generate for the current URL through `source`.
    pub fn generate(&mut self, source: &dyn SelectorSource) -> GenerateOutcome {
        let ticket = self.begin_generate();
        let result = source.fetch(&ticket.url);
        self.finish_generate(ticket, result)
    }

    // ------------------------------------------------------------------
    // Working list edits
    // ------------------------------------------------------------------

    /// Append `pair` and clear the draft.
    pub fn add_selector(&mut self, pair: SelectorPair) {
        log::debug!("add selector {:?}", pair);
        self.selectors.push(pair);
        self.draft = SelectorPair::default();
        self.record("add_selector", None, None);
    }

    /// Append the current draft.
    pub fn add_draft(&mut self) {
        let pair = std::mem::take(&mut self.draft);
        self.add_selector(pair);
    }

    /// Remove the entries matching `pair` on label AND value.
    ///
    /// An entry sharing only one field with `pair` is kept.
    pub fn delete_selector(&mut self, pair: &SelectorPair) {
        let before = self.selectors.len();
        self.selectors
            .retain(|s| !(s.label == pair.label && s.value == pair.value));
        log::debug!(
            "delete selector {:?}: {} -> {} entries",
            pair,
            before,
            self.selectors.len()
        );
        self.record("delete_selector", None, None);
    }

    /// Replace every entry whose value equals `pair.value` with `pair`.
    pub fn edit_selector_label(&mut self, pair: SelectorPair) {
        for s in self.selectors.iter_mut().filter(|s| s.value == pair.value) {
            *s = pair.clone();
        }
        self.record("edit_selector_label", None, None);
    }

    /// Replace every entry whose label equals `pair.label` with `pair`.
    pub fn edit_selector_value(&mut self, pair: SelectorPair) {
        for s in self.selectors.iter_mut().filter(|s| s.label == pair.label) {
            *s = pair.clone();
        }
        self.record("edit_selector_value", None, None);
    }

    // ------------------------------------------------------------------
    // Commit
    // ------------------------------------------------------------------

    /// Save `{name, url, selectors}` into the store and reset the editor.
    ///
    /// Only available once selectors have been fetched; otherwise nothing
    /// happens and `None` is returned. A Generate in flight does not hide
    /// it: the selectors from the last successful fetch are saved.
    pub fn commit(&mut self) -> Option<Form> {
        if !self.data_fetched {
            log::debug!("commit ignored in phase {:?}: no data fetched", self.phase);
            return None;
        }

        let form = Form::new(
            std::mem::take(&mut self.name),
            std::mem::take(&mut self.url),
            std::mem::take(&mut self.selectors),
        );
        self.store.append(form.clone());

        self.label_suggestions.clear();
        self.value_suggestions.clear();
        self.data_fetched = false;
        self.draft = SelectorPair::default();
        self.phase = EditorPhase::Idle;
        self.notification = Some(Notification::success(SAVED_MESSAGE));

        log::info!(
            "saved form '{}' ({} selectors), {} forms stored",
            form.name,
            form.selectors.len(),
            self.store.len()
        );
        self.record("commit", Some(form.url.as_str()), Some(SAVED_MESSAGE));
        Some(form)
    }

    fn record(&mut self, action: &str, url: Option<&str>, message: Option<&str>) {
        self.step += 1;
        let tracer = match &self.tracer {
            Some(t) => t,
            None => return,
        };

        let mut event = EditorEvent::now(self.step, self.phase, action)
            .with_selector_count(self.selectors.len());
        if let Some(url) = url {
            event = event.with_url(url);
        }
        if let Some(message) = message {
            event = event.with_message(message);
        }
        tracer.log(&event);
    }
}
