//! Shared, observable application state.
//!
//! `AppState` is a cheap handle to the single source of truth for the active
//! theme and the user's profile. Screens keep a clone of the handle, read it
//! on every render and subscribe to change notifications. The state is
//! single-threaded (`Rc`, not `Send`): every mutation happens on the UI's
//! event loop, last writer wins.
//!
//! Profile changes go through an edit transaction:
//!
//! ```text
//! Viewing --begin_profile_edit--> Editing
//! Editing --commit_profile_edit--> Viewing   (live profile replaced)
//! Editing --cancel_profile_edit--> Viewing   (draft discarded)
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::config::HabitualConfig;
use crate::error::{HabitualError, HabitualResult};
use crate::profile::{ProfileDraft, UserProfile};
use crate::theme::{Palette, Theme};

/// What changed, delivered to every subscriber after the change is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    ThemeChanged(Theme),
    ProfileEditStarted,
    ProfileCommitted,
    ProfileEditCancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&StateChange)>;

enum EditSession {
    Viewing,
    Editing(ProfileDraft),
}

struct StateData {
    theme: Theme,
    profile: UserProfile,
    session: EditSession,
}

#[derive(Default)]
struct Observers {
    next_id: Cell<u64>,
    list: RefCell<Vec<(SubscriptionId, Observer)>>,
}

#[derive(Clone)]
pub struct AppState {
    data: Rc<RefCell<StateData>>,
    observers: Rc<Observers>,
}

impl AppState {
    pub fn new(theme: Theme, profile: UserProfile) -> Self {
        AppState {
            data: Rc::new(RefCell::new(StateData {
                theme,
                profile,
                session: EditSession::Viewing,
            })),
            observers: Rc::new(Observers::default()),
        }
    }

    /// Configured theme and the placeholder profile, joined `today`.
    pub fn from_config(config: &HabitualConfig, today: NaiveDate) -> Self {
        AppState::new(config.theme, UserProfile::placeholder(today))
    }

    // THEME:

    pub fn theme(&self) -> Theme {
        self.data.borrow().theme
    }

    pub fn palette(&self) -> Palette {
        self.theme().palette()
    }

    /// Make `theme` the active theme. Re-selecting the active theme is a no-op.
    pub fn select_theme(&self, theme: Theme) {
        {
            let mut data = self.data.borrow_mut();
            if data.theme == theme {
                return;
            }
            data.theme = theme;
        }
        tracing::debug!(%theme, "theme selected");
        self.notify(&StateChange::ThemeChanged(theme));
    }

    // PROFILE:

    /// Snapshot of the live profile. Never reflects an uncommitted draft.
    pub fn profile(&self) -> UserProfile {
        self.data.borrow().profile.clone()
    }

    pub fn edit_mode(&self) -> EditMode {
        match self.data.borrow().session {
            EditSession::Viewing => EditMode::Viewing,
            EditSession::Editing(_) => EditMode::Editing,
        }
    }

    /// The staged draft, if an edit is in progress.
    pub fn draft(&self) -> Option<ProfileDraft> {
        match &self.data.borrow().session {
            EditSession::Viewing => None,
            EditSession::Editing(draft) => Some(draft.clone()),
        }
    }

    /// Start editing: copy the live profile into the draft buffer.
    pub fn begin_profile_edit(&self) -> HabitualResult<ProfileDraft> {
        let draft = {
            let mut data = self.data.borrow_mut();
            if let EditSession::Editing(_) = data.session {
                return Err(HabitualError::AlreadyEditing);
            }
            let draft = ProfileDraft::from(&data.profile);
            data.session = EditSession::Editing(draft.clone());
            draft
        };
        self.notify(&StateChange::ProfileEditStarted);
        Ok(draft)
    }

    /// Change the staged draft in place.
    pub fn update_draft<F>(&self, edit: F) -> HabitualResult<()>
    where
        F: FnOnce(&mut ProfileDraft),
    {
        match &mut self.data.borrow_mut().session {
            EditSession::Viewing => Err(HabitualError::NotEditing),
            EditSession::Editing(draft) => {
                edit(draft);
                Ok(())
            }
        }
    }

    /// Replace the live profile with `draft` and stop editing.
    ///
    /// If the draft is invalid nothing changes and the edit stays open.
    pub fn commit_profile_edit(&self, draft: ProfileDraft) -> HabitualResult<()> {
        {
            let mut data = self.data.borrow_mut();
            if let EditSession::Viewing = data.session {
                return Err(HabitualError::NotEditing);
            }
            draft.validate()?;
            data.profile.apply(draft);
            data.session = EditSession::Viewing;
        }
        tracing::debug!("profile edit committed");
        self.notify(&StateChange::ProfileCommitted);
        Ok(())
    }

    /// Commit whatever is currently staged.
    pub fn commit_staged_edit(&self) -> HabitualResult<()> {
        let draft = self.draft().ok_or(HabitualError::NotEditing)?;
        self.commit_profile_edit(draft)
    }

    /// Drop the draft without touching the live profile.
    pub fn cancel_profile_edit(&self) -> HabitualResult<()> {
        {
            let mut data = self.data.borrow_mut();
            if let EditSession::Viewing = data.session {
                return Err(HabitualError::NotEditing);
            }
            data.session = EditSession::Viewing;
        }
        self.notify(&StateChange::ProfileEditCancelled);
        Ok(())
    }

    // OBSERVERS:

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + 'static,
    {
        let id = SubscriptionId(self.observers.next_id.get());
        self.observers.next_id.set(id.0 + 1);
        self.observers.list.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers.list.borrow_mut().retain(|(sub, _)| *sub != id);
    }

    // Observers run with no borrow held, so they may read the state or
    // (un)subscribe.
    fn notify(&self, change: &StateChange) {
        let observers: Vec<Observer> = self
            .observers
            .list
            .borrow()
            .iter()
            .map(|(_, o)| Rc::clone(o))
            .collect();

        for observer in observers {
            observer(change);
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("theme", &self.theme())
            .field("edit_mode", &self.edit_mode())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
    }

    fn state() -> AppState {
        AppState::new(Theme::Sunset, UserProfile::placeholder(joined()))
    }

    fn record(state: &AppState) -> Rc<RefCell<Vec<StateChange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        seen
    }

    // --- theme ---

    #[test]
    fn select_theme_round_trips_for_every_variant() {
        let state = state();
        for theme in Theme::ALL {
            state.select_theme(theme);
            assert_eq!(state.theme(), theme);
            assert_eq!(state.palette(), theme.palette());
        }
    }

    #[test]
    fn select_theme_notifies_once_per_change() {
        let state = state();
        let seen = record(&state);

        state.select_theme(Theme::Ocean);
        state.select_theme(Theme::Ocean);

        assert_eq!(*seen.borrow(), vec![StateChange::ThemeChanged(Theme::Ocean)]);
    }

    #[test]
    fn clones_share_state() {
        let state = state();
        let screen = state.clone();

        state.select_theme(Theme::Dark);

        assert_eq!(screen.theme(), Theme::Dark);
    }

    #[test]
    fn observer_can_read_state() {
        let state = state();
        let seen_theme = Rc::new(Cell::new(Theme::Light));
        let reader = state.clone();
        let sink = Rc::clone(&seen_theme);
        state.subscribe(move |_| sink.set(reader.theme()));

        state.select_theme(Theme::Dark);

        assert_eq!(seen_theme.get(), Theme::Dark);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let state = state();
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        let id = state.subscribe(move |_| sink.set(sink.get() + 1));

        state.select_theme(Theme::Light);
        state.unsubscribe(id);
        state.select_theme(Theme::Dark);

        assert_eq!(count.get(), 1);
    }

    // --- profile edit ---

    #[test]
    fn cancel_leaves_profile_untouched() {
        let state = state();
        let before = state.profile();

        let mut draft = state.begin_profile_edit().unwrap();
        draft.name = "Ada Lovelace".into();
        state
            .update_draft(|d| d.email = "ada@example.com".into())
            .unwrap();
        assert_eq!(state.profile(), before);

        state.cancel_profile_edit().unwrap();

        assert_eq!(state.profile(), before);
        assert_eq!(state.edit_mode(), EditMode::Viewing);
        assert_eq!(state.draft(), None);
    }

    #[test]
    fn commit_replaces_profile_but_keeps_join_date() {
        let state = state();

        let mut draft = state.begin_profile_edit().unwrap();
        draft.name = "Ada Lovelace".into();
        draft.bio = "Analytical".into();
        draft.birthday = NaiveDate::from_ymd_opt(1815, 12, 10);
        state.commit_profile_edit(draft.clone()).unwrap();

        let profile = state.profile();
        assert_eq!(ProfileDraft::from(&profile), draft);
        assert_eq!(profile.join_date(), joined());
        assert_eq!(profile.initials(), "AL");
        assert_eq!(state.edit_mode(), EditMode::Viewing);
    }

    #[test]
    fn commit_staged_edit_uses_draft_buffer() {
        let state = state();
        state.begin_profile_edit().unwrap();
        state.update_draft(|d| d.quote = "Onward".into()).unwrap();

        state.commit_staged_edit().unwrap();

        assert_eq!(state.profile().quote, "Onward");
    }

    #[test]
    fn invalid_commit_keeps_editing() {
        let state = state();
        let before = state.profile();

        let mut draft = state.begin_profile_edit().unwrap();
        draft.name = " ".into();

        assert!(matches!(
            state.commit_profile_edit(draft),
            Err(HabitualError::Validation(_))
        ));
        assert_eq!(state.profile(), before);
        assert_eq!(state.edit_mode(), EditMode::Editing);
    }

    #[test]
    fn no_nested_or_stray_transitions() {
        let state = state();

        assert!(matches!(state.cancel_profile_edit(), Err(HabitualError::NotEditing)));
        assert!(matches!(
            state.commit_profile_edit(ProfileDraft::default()),
            Err(HabitualError::NotEditing)
        ));
        assert!(matches!(state.update_draft(|_| {}), Err(HabitualError::NotEditing)));

        state.begin_profile_edit().unwrap();
        assert!(matches!(state.begin_profile_edit(), Err(HabitualError::AlreadyEditing)));
    }

    #[test]
    fn edit_flow_notifications() {
        let state = state();
        let seen = record(&state);

        let draft = state.begin_profile_edit().unwrap();
        state.cancel_profile_edit().unwrap();
        state.begin_profile_edit().unwrap();
        state.commit_profile_edit(draft).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                StateChange::ProfileEditStarted,
                StateChange::ProfileEditCancelled,
                StateChange::ProfileEditStarted,
                StateChange::ProfileCommitted,
            ]
        );
    }

    #[test]
    fn from_config_uses_configured_theme() {
        let config = HabitualConfig {
            theme: Theme::Ocean,
            ..HabitualConfig::default()
        };
        let state = AppState::from_config(&config, joined());

        assert_eq!(state.theme(), Theme::Ocean);
        assert_eq!(state.profile().join_date(), joined());
    }
}
