//! The user's profile and its edit draft.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HabitualError, HabitualResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub birthday: Option<NaiveDate>,
    pub bio: String,
    pub quote: String,
    join_date: NaiveDate,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, join_date: NaiveDate) -> Self {
        UserProfile {
            name: name.into(),
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            birthday: None,
            bio: String::new(),
            quote: String::new(),
            join_date,
        }
    }

    /// The sample user shown before anyone edits the profile.
    pub fn placeholder(join_date: NaiveDate) -> Self {
        UserProfile {
            name: "Random Subject".into(),
            username: "@random_sub".into(),
            email: "random.user@gmail.com".into(),
            phone: "+1 123 456 7890".into(),
            birthday: NaiveDate::from_ymd_opt(2005, 1, 1),
            bio: "Hello! I'm a new user and I'm excited to join the community!".into(),
            quote: "Be the change you want to see.".into(),
            join_date,
        }
    }

    /// Set once at creation; drafts cannot change it.
    pub fn join_date(&self) -> NaiveDate {
        self.join_date
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    /// Overwrite every editable field with the draft's values.
    pub fn apply(&mut self, draft: ProfileDraft) {
        let ProfileDraft {
            name,
            username,
            email,
            phone,
            birthday,
            bio,
            quote,
        } = draft;

        self.name = name;
        self.username = username;
        self.email = email;
        self.phone = phone;
        self.birthday = birthday;
        self.bio = bio;
        self.quote = quote;
    }
}

/// Scratch copy of the editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub birthday: Option<NaiveDate>,
    pub bio: String,
    pub quote: String,
}

impl ProfileDraft {
    /// Only the name is required. Email and phone are accepted as typed.
    pub fn validate(&self) -> HabitualResult<()> {
        if self.name.trim().is_empty() {
            return Err(HabitualError::Validation("Please enter your name.".into()));
        }
        Ok(())
    }
}

impl From<&UserProfile> for ProfileDraft {
    fn from(profile: &UserProfile) -> Self {
        ProfileDraft {
            name: profile.name.clone(),
            username: profile.username.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            birthday: profile.birthday,
            bio: profile.bio.clone(),
            quote: profile.quote.clone(),
        }
    }
}

/// First letter of the first word plus first letter of the last word, uppercased.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();

    let first = words.first().and_then(|w| w.chars().next());
    let last = if words.len() > 1 {
        words.last().and_then(|w| w.chars().next())
    } else {
        None
    };

    first
        .into_iter()
        .chain(last)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
    }

    #[test]
    fn initials_of_names() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("Madonna"), "M");
        assert_eq!(initials(""), "");
        assert_eq!(initials("   "), "");
        assert_eq!(initials("grace brewster murray hopper"), "GH");
        assert_eq!(initials("  émile   zola "), "ÉZ");
    }

    #[test]
    fn placeholder_initials() {
        assert_eq!(UserProfile::placeholder(joined()).initials(), "RS");
    }

    #[test]
    fn apply_keeps_join_date() {
        let mut profile = UserProfile::placeholder(joined());
        let mut draft = ProfileDraft::from(&profile);
        draft.name = "Ada Lovelace".into();
        draft.birthday = None;

        profile.apply(draft.clone());

        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.birthday, None);
        assert_eq!(profile.join_date(), joined());
        assert_eq!(ProfileDraft::from(&profile), draft);
    }

    #[test]
    fn blank_name_fails_validation() {
        let draft = ProfileDraft {
            name: "  ".into(),
            ..ProfileDraft::default()
        };
        assert!(matches!(draft.validate(), Err(HabitualError::Validation(_))));

        let draft = ProfileDraft {
            name: "Ada".into(),
            email: "not an email".into(),
            ..ProfileDraft::default()
        };
        assert!(draft.validate().is_ok());
    }
}
