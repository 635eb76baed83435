//! Dialog session state.
//!
//! A dialog session pairs a form draft with an optional editing token (the
//! id or name of the record being edited). Create mode has no token; edit
//! mode carries the original key so a renamed form field cannot retarget
//! the mutation. Closing the dialog discards both, so a reopened dialog
//! always starts clean.

/// Open add/edit dialog for one entity type.
#[derive(Debug)]
pub struct DialogSession<F> {
    form: F,
    /// Key of the record being edited; `None` in create mode.
    editing: Option<String>,
    open: bool,
}

impl<F: Default> DialogSession<F> {
    #[must_use]
    pub fn closed() -> Self {
        Self {
            form: F::default(),
            editing: None,
            open: false,
        }
    }

    /// Open the dialog with a blank form (create mode).
    pub fn open_create(&mut self) -> &mut F {
        self.form = F::default();
        self.editing = None;
        self.open = true;
        &mut self.form
    }

    /// Open the dialog pre-filled from an existing record (edit mode).
    pub fn open_edit(&mut self, key: impl Into<String>, form: F) -> &mut F {
        self.form = form;
        self.editing = Some(key.into());
        self.open = true;
        &mut self.form
    }

    /// Close the dialog, discarding the draft and the editing token.
    pub fn close(&mut self) {
        self.form = F::default();
        self.editing = None;
        self.open = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Key of the record under edit, `None` in create mode.
    #[must_use]
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    #[must_use]
    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }
}

impl<F: Default> Default for DialogSession<F> {
    fn default() -> Self {
        Self::closed()
    }
}

/// Two-phase delete confirmation.
///
/// A delete is requested first and performed only once confirmed; cancel
/// (or confirming a different target in between) clears the pending
/// request. `take_confirmed` hands out the target at most once.
#[derive(Debug, Default)]
pub struct DeleteConfirm {
    pending: Option<String>,
}

impl DeleteConfirm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a delete request for the given key, replacing any previous
    /// pending request.
    pub fn request(&mut self, key: impl Into<String>) {
        self.pending = Some(key.into());
    }

    /// Drop the pending request without deleting.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Consume the pending request, returning the key to delete.
    pub fn take_confirmed(&mut self) -> Option<String> {
        self.pending.take()
    }
}
