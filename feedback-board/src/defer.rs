//! Defer workflow: archive an item together with a future reactivation date
//!
//! Dropping on the defer zone does not mutate status. It opens a prompt the
//! host renders as a modal; the item's status only changes when the prompt
//! is confirmed with a valid date, via a single atomic commit.

use crate::error::{BoardError, Result};
use crate::types::{ItemId, Status};
use chrono::NaiveDate;
use serde::Serialize;

/// An open defer prompt for one item.
///
/// The prompt is plain data: the host binds its date picker and notes field
/// to it and calls the coordinator's `confirm_defer` when the user commits.
/// A failed confirmation leaves the prompt (and the item) untouched.
#[derive(Debug, Clone, Serialize)]
pub struct DeferPrompt {
    pub item: ItemId,
    pub origin: Status,
    date: Option<NaiveDate>,
    notes: Option<String>,
}

impl DeferPrompt {
    /// Open a prompt for the given item
    pub fn new(item: ItemId, origin: Status) -> Self {
        Self {
            item,
            origin,
            date: None,
            notes: None,
        }
    }

    /// The chosen reactivation date, if any
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Choose a reactivation date
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    /// Clear the chosen date
    pub fn clear_date(&mut self) {
        self.date = None;
    }

    /// Optional notes to store with the deferral
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Set the notes field (empty input clears it)
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.notes = if notes.is_empty() { None } else { Some(notes) };
    }

    /// Validate the prompt for confirmation: a date must be chosen and must
    /// be today or later. No state is changed on failure.
    pub fn validated_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        let date = self.date.ok_or(BoardError::DeferDateRequired)?;
        if date < today {
            return Err(BoardError::DeferDateInPast { date });
        }
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn test_confirm_without_date_fails() {
        let prompt = DeferPrompt::new("item-b".into(), Status::New);
        let err = prompt.validated_date(today()).unwrap_err();
        assert!(matches!(err, BoardError::DeferDateRequired));
    }

    #[test]
    fn test_past_date_fails() {
        let mut prompt = DeferPrompt::new("item-b".into(), Status::New);
        prompt.set_date(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap());
        let err = prompt.validated_date(today()).unwrap_err();
        assert!(matches!(err, BoardError::DeferDateInPast { .. }));
    }

    #[test]
    fn test_today_and_future_are_valid() {
        let mut prompt = DeferPrompt::new("item-b".into(), Status::New);
        prompt.set_date(today());
        assert_eq!(prompt.validated_date(today()).unwrap(), today());

        let future = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        prompt.set_date(future);
        assert_eq!(prompt.validated_date(today()).unwrap(), future);
    }

    #[test]
    fn test_notes_normalization() {
        let mut prompt = DeferPrompt::new("item-b".into(), Status::New);
        assert_eq!(prompt.notes(), None);
        prompt.set_notes("waiting on upstream fix");
        assert_eq!(prompt.notes(), Some("waiting on upstream fix"));
        prompt.set_notes("");
        assert_eq!(prompt.notes(), None);
    }
}
