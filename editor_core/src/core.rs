//! PlaygroundCore state machine
//!
//! Owns the document, the active facet, the selection, history, the
//! suggestion store and the debounce timer. Hosts feed it key presses (or
//! whole-buffer changes from their own text surface) and render what it
//! returns.

use alloc::string::String;
use alloc::vec::Vec;

use markup_assist::{complete, detect, rename, EnterTrigger, Suggestion};

use crate::{
    buffer::{self, Motion, Mutation, Selection},
    config::EditorConfig,
    debounce::DebounceTimer,
    facet::{Document, Facet},
    history::History,
    key::{Key, KeyPress},
    skeleton,
    snapshot::EditorSnapshot,
    suggest::{PopupPosition, SuggestionStore},
};

/// Core-driven edit that replaced default key handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    Undo,
    Duplicate,
    Boilerplate,
    Comment,
    Emmet,
    BetweenTags,
    AutoClose,
    Suggestion,
    RenameSync,
    Skeleton,
}

/// Outcome from applying a key or change to the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Nothing changed
    Continue,
    /// Caret or suggestion state changed, buffer untouched
    Changed,
    /// Plain edit of the active buffer
    Edited(Mutation),
    /// A core action rewrote the active buffer and committed history
    Applied { action: EditAction, mutation: Mutation },
}

impl CoreOutcome {
    /// The buffer mutation carried by this outcome, if any
    pub fn mutation(&self) -> Option<&Mutation> {
        match self {
            CoreOutcome::Edited(mutation) | CoreOutcome::Applied { mutation, .. } => Some(mutation),
            CoreOutcome::Continue | CoreOutcome::Changed => None,
        }
    }

    pub fn action(&self) -> Option<EditAction> {
        match self {
            CoreOutcome::Applied { action, .. } => Some(*action),
            _ => None,
        }
    }
}

/// Editing session for one project
pub struct PlaygroundCore {
    config: EditorConfig,
    document: Document,
    facet: Facet,
    selection: Selection,
    pending_cursor: Option<Selection>,
    history: History,
    suggestions: SuggestionStore,
    debounce: DebounceTimer,
    now_ms: u64,
}

impl PlaygroundCore {
    /// Create an editor with empty facets, markup active
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            document: Document::new(),
            facet: Facet::Markup,
            selection: Selection::default(),
            pending_cursor: None,
            history: History::new(Document::new(), config.history_capacity),
            suggestions: SuggestionStore::new(),
            debounce: DebounceTimer::new(),
            now_ms: 0,
        }
    }

    /// Apply a key-down and return the outcome
    pub fn apply_key(&mut self, press: impl Into<KeyPress>) -> CoreOutcome {
        let press = press.into();

        if press.is_undo() {
            return self.undo();
        }
        if press.is_duplicate_line() {
            let mutation = buffer::duplicate(self.text(), self.selection);
            return self.apply_action(EditAction::Duplicate, mutation);
        }
        if self.suggestions.is_active() && self.config.predictions {
            if let Some(outcome) = self.handle_suggestion_key(press.key) {
                return outcome;
            }
        }
        if press.key == Key::Enter && self.facet == Facet::Markup && self.selection.is_collapsed() {
            if let Some(outcome) = self.try_enter_trigger() {
                return outcome;
            }
        }
        if press.key == Key::Char('>') && self.facet == Facet::Markup && self.config.auto_close {
            if let Some(outcome) = self.try_auto_close() {
                return outcome;
            }
        }

        self.handle_default_key(press)
    }

    /// Change pipeline for a new active-buffer value and selection
    ///
    /// Runs rename sync, stores the buffer, reschedules the debounce commit
    /// and refreshes suggestions.
    pub fn apply_change(&mut self, new_text: String, selection: Selection) -> CoreOutcome {
        let selection = Selection::clamped(&new_text, selection.start, selection.end);
        let renamed = if self.facet == Facet::Markup {
            rename::sync_renamed_tag(self.text(), &new_text, selection.start)
        } else {
            None
        };

        let outcome = match renamed {
            Some(text) => {
                let mutation = Mutation::new(text, selection);
                self.install(&mutation);
                self.commit_now();
                CoreOutcome::Applied {
                    action: EditAction::RenameSync,
                    mutation,
                }
            }
            None => {
                let mutation = Mutation::new(new_text, selection);
                self.install(&mutation);
                self.debounce.schedule(self.now_ms, self.config.debounce_ms);
                CoreOutcome::Edited(mutation)
            }
        };

        self.refresh_suggestions();
        outcome
    }

    /// Make `facet` the edited buffer; caret goes to its end
    pub fn switch_facet(&mut self, facet: Facet) -> Selection {
        self.facet = facet;
        self.suggestions.clear();
        let cursor = Selection::collapsed(self.text().len());
        self.selection = cursor;
        self.pending_cursor = Some(cursor);
        log::debug!("switched to {} facet", facet);
        cursor
    }

    /// Advance the logical clock; returns true if a debounced commit fired
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.now_ms = self.now_ms.max(now_ms);
        if self.debounce.fire_if_due(self.now_ms) {
            let committed = self.history.commit(self.document.clone());
            log::trace!("debounce fired at {}ms, committed: {}", self.now_ms, committed);
            committed
        } else {
            false
        }
    }

    /// Advance the logical clock by `delta_ms`
    pub fn advance(&mut self, delta_ms: u64) -> bool {
        self.tick(self.now_ms.saturating_add(delta_ms))
    }

    /// Highlight the suggestion under the pointer
    pub fn hover_suggestion(&mut self, index: usize) -> bool {
        self.suggestions.hover(index)
    }

    /// Apply the suggestion at `index`
    pub fn click_suggestion(&mut self, index: usize) -> CoreOutcome {
        if !self.suggestions.hover(index) {
            return CoreOutcome::Continue;
        }
        self.accept_suggestion()
    }

    /// Move the selection; suggestions are not refreshed
    pub fn set_selection(&mut self, start: usize, end: usize) -> Selection {
        self.selection = Selection::clamped(self.text(), start, end);
        self.selection
    }

    /// Append a built-in template to the markup and style facets
    pub fn inject_skeleton(&mut self, id: &str) -> bool {
        let Some(template) = skeleton::find(id) else {
            log::debug!("unknown skeleton {:?}", id);
            return false;
        };

        for (facet, addition) in [(Facet::Markup, template.markup), (Facet::Style, template.style)] {
            let mut text = String::from(self.document.get(facet));
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(addition);
            self.document.set(facet, text);
        }

        self.suggestions.clear();
        let cursor = Selection::clamped(self.text(), self.selection.start, self.selection.end);
        self.selection = cursor;
        self.pending_cursor = Some(cursor);
        self.commit_now();
        log::debug!("{:?} applied: skeleton {}", EditAction::Skeleton, id);
        true
    }

    /// Replace the whole document and restart history from it
    pub fn load_document(&mut self, document: Document) {
        self.history.reset(document.clone());
        self.document = document;
        self.debounce.cancel();
        self.suggestions.clear();
        self.selection = Selection::collapsed(self.text().len());
        self.pending_cursor = None;
    }

    /// Second phase of the cursor restore: returns the selection the host
    /// must apply after rendering the last mutation
    pub fn finish_render(&mut self) -> Option<Selection> {
        let cursor = self.pending_cursor.take()?;
        self.selection = Selection::clamped(self.text(), cursor.start, cursor.end);
        Some(self.selection)
    }

    /// Commit the live document now if a debounced commit is pending
    pub fn flush(&mut self) -> bool {
        if self.debounce.is_pending() {
            self.commit_now()
        } else {
            false
        }
    }

    pub fn set_auto_close(&mut self, enabled: bool) {
        self.config.auto_close = enabled;
    }

    pub fn set_predictions(&mut self, enabled: bool) {
        self.config.predictions = enabled;
        if !enabled {
            self.suggestions.clear();
        }
    }

    /// Get a complete snapshot of editor state
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            facet: self.facet,
            document: self.document.clone(),
            selection: self.selection,
            history_len: self.history.len(),
            history_step: self.history.step(),
            suggestions: self.suggestions.items().to_vec(),
            highlighted: self.suggestions.index(),
            now_ms: self.now_ms,
        }
    }

    // Public accessors for rendering/testing

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn facet(&self) -> Facet {
        self.facet
    }

    /// Active buffer
    pub fn text(&self) -> &str {
        self.document.get(self.facet)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn suggestions(&self) -> &SuggestionStore {
        &self.suggestions
    }

    /// Where the suggestion popup goes, while suggestions are shown
    pub fn popup_position(&self) -> Option<PopupPosition> {
        if !self.suggestions.is_active() {
            return None;
        }
        Some(self.config.popup.position(&self.text()[..self.selection.start]))
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn has_pending_commit(&self) -> bool {
        self.debounce.is_pending()
    }

    // Private handlers

    fn install(&mut self, mutation: &Mutation) {
        self.document.set(self.facet, mutation.text.clone());
        self.selection = mutation.cursor;
        self.pending_cursor = Some(mutation.cursor);
    }

    fn commit_now(&mut self) -> bool {
        self.debounce.cancel();
        self.history.commit(self.document.clone())
    }

    fn apply_action(&mut self, action: EditAction, mutation: Mutation) -> CoreOutcome {
        self.install(&mutation);
        self.suggestions.clear();
        self.commit_now();
        log::debug!(
            "{:?} applied in {} facet, cursor {}..{}",
            action,
            self.facet,
            mutation.cursor.start,
            mutation.cursor.end
        );
        CoreOutcome::Applied { action, mutation }
    }

    fn undo(&mut self) -> CoreOutcome {
        // Typing not yet committed becomes its own entry so undo lands
        // right before it
        self.flush();

        let Some(previous) = self.history.undo() else {
            return CoreOutcome::Continue;
        };
        self.document = previous.clone();
        self.suggestions.clear();

        let text = String::from(self.text());
        let mutation = Mutation::collapsed(text, self.text().len());
        self.selection = mutation.cursor;
        self.pending_cursor = Some(mutation.cursor);
        log::debug!("undo to step {}", self.history.step());
        CoreOutcome::Applied {
            action: EditAction::Undo,
            mutation,
        }
    }

    fn handle_suggestion_key(&mut self, key: Key) -> Option<CoreOutcome> {
        match key {
            Key::Down => {
                self.suggestions.next();
                Some(CoreOutcome::Changed)
            }
            Key::Up => {
                self.suggestions.prev();
                Some(CoreOutcome::Changed)
            }
            Key::Enter | Key::Tab => Some(self.accept_suggestion()),
            Key::Escape => {
                self.suggestions.clear();
                Some(CoreOutcome::Changed)
            }
            _ => None,
        }
    }

    fn accept_suggestion(&mut self) -> CoreOutcome {
        let Some(suggestion) = self.suggestions.highlighted().cloned() else {
            return CoreOutcome::Continue;
        };
        let completion = complete::apply_suggestion(self.text(), self.selection.start, &suggestion);
        self.apply_action(EditAction::Suggestion, completion.into())
    }

    fn try_enter_trigger(&mut self) -> Option<CoreOutcome> {
        let text = self.text();
        let cursor = self.selection.start;
        let (action, completion) = match detect::enter_trigger(text, cursor)? {
            EnterTrigger::Boilerplate => (EditAction::Boilerplate, complete::expand_boilerplate(text, cursor)),
            EnterTrigger::Comment => (EditAction::Comment, complete::expand_comment(text, cursor)),
            EnterTrigger::Emmet(token) => (EditAction::Emmet, complete::expand_emmet(text, token)),
            EnterTrigger::BetweenTags => (EditAction::BetweenTags, complete::expand_between_tags(text, cursor)),
        };
        Some(self.apply_action(action, completion.into()))
    }

    fn try_auto_close(&mut self) -> Option<CoreOutcome> {
        let text = self.text();
        let Selection { start, end } = self.selection;
        let name = detect::auto_close_candidate(text.get(..start)?)?;
        let completion = complete::auto_close(text, start, end, name);
        Some(self.apply_action(EditAction::AutoClose, completion.into()))
    }

    fn handle_default_key(&mut self, press: KeyPress) -> CoreOutcome {
        let text = self.text();
        let selection = self.selection;
        let mutation = match press.key {
            Key::Char(_) if press.is_chord() => None,
            Key::Char(ch) => {
                let mut utf8 = [0u8; 4];
                Some(buffer::insert(text, selection, ch.encode_utf8(&mut utf8)))
            }
            Key::Enter => Some(buffer::insert(text, selection, "\n")),
            Key::Backspace => buffer::backspace(text, selection),
            Key::Delete => buffer::delete_forward(text, selection),
            Key::Left => return self.move_caret(Motion::Left),
            Key::Right => return self.move_caret(Motion::Right),
            Key::Up => return self.move_caret(Motion::Up),
            Key::Down => return self.move_caret(Motion::Down),
            Key::Home => return self.move_caret(Motion::Home),
            Key::End => return self.move_caret(Motion::End),
            Key::Tab | Key::Escape => None,
        };

        match mutation {
            Some(mutation) => self.apply_change(mutation.text, mutation.cursor),
            None => CoreOutcome::Continue,
        }
    }

    fn move_caret(&mut self, motion: Motion) -> CoreOutcome {
        let at = buffer::move_caret(self.text(), self.selection, motion);
        let moved = Selection::collapsed(at);
        if moved == self.selection {
            return CoreOutcome::Continue;
        }
        self.selection = moved;
        CoreOutcome::Changed
    }

    fn refresh_suggestions(&mut self) {
        if self.facet != Facet::Markup || !self.config.predictions {
            self.suggestions.clear();
            return;
        }
        let text_before = &self.text()[..self.selection.start];
        let found: Vec<Suggestion> = complete::suggest(text_before, self.config.max_suggestions);
        self.suggestions.show(found);
    }
}

impl Default for PlaygroundCore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
