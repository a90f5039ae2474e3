use anyhow::Result;
use clap::Args;
use dialoguer::{Confirm, Input};
use habitual_core::profile::ProfileDraft;
use habitual_core::{AppState, HabitualError, StateChange};
use owo_colors::OwoColorize;

use crate::parse::parse_day;
use crate::render::{Painter, Render, format_birthday};
use crate::session::Session;

#[derive(Args, Default)]
pub struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// Birthday (YYYY-MM-DD), or "none" to clear it
    #[arg(long)]
    birthday: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long)]
    quote: Option<String>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.birthday.is_none()
            && self.bio.is_none()
            && self.quote.is_none()
    }

    fn apply_to(self, draft: &mut ProfileDraft) -> Result<()> {
        if let Some(birthday) = self.birthday {
            draft.birthday = parse_birthday(&birthday)?;
        }
        let fields = [
            (self.name, &mut draft.name),
            (self.username, &mut draft.username),
            (self.email, &mut draft.email),
            (self.phone, &mut draft.phone),
            (self.bio, &mut draft.bio),
            (self.quote, &mut draft.quote),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        Ok(())
    }
}

pub fn show(session: &Session) -> Result<()> {
    let painter = Painter::new(session.state.theme());
    println!("{}", session.state.profile().render(&painter));
    println!();
    println!(
        "  {}",
        painter.paint("habitual profile edit", painter.palette().edit_action)
    );
    Ok(())
}

pub fn edit(session: &Session, args: EditArgs) -> Result<()> {
    let state = &session.state;

    // Re-render the profile card once a commit lands
    let viewer = state.clone();
    state.subscribe(move |change| {
        if *change == StateChange::ProfileCommitted {
            let painter = Painter::new(viewer.theme());
            println!();
            println!("{}", viewer.profile().render(&painter));
        }
    });

    if args.is_empty() {
        edit_interactive(state)
    } else {
        let mut draft = state.begin_profile_edit()?;
        if let Err(e) = args.apply_to(&mut draft) {
            state.cancel_profile_edit()?;
            return Err(e);
        }
        match state.commit_profile_edit(draft) {
            Ok(()) => Ok(()),
            Err(e) => {
                state.cancel_profile_edit()?;
                Err(e.into())
            }
        }
    }
}

/// Prompt for every field, then Save or Cancel.
fn edit_interactive(state: &AppState) -> Result<()> {
    state.begin_profile_edit()?;

    loop {
        let Some(current) = state.draft() else {
            return Err(HabitualError::NotEditing.into());
        };
        let edited = prompt_draft(current)?;
        state.update_draft(|draft| *draft = edited)?;

        let save = Confirm::new()
            .with_prompt("  Save changes?")
            .default(true)
            .interact()?;

        if !save {
            state.cancel_profile_edit()?;
            println!("{}", "  Changes discarded".dimmed());
            return Ok(());
        }

        match state.commit_staged_edit() {
            Ok(()) => return Ok(()),
            Err(HabitualError::Validation(msg)) => eprintln!("  {}", msg.red()),
            Err(e) => return Err(e.into()),
        }
    }
}

fn prompt_draft(current: ProfileDraft) -> Result<ProfileDraft> {
    let text = |prompt: &str, value: String| -> Result<String> {
        Ok(Input::new()
            .with_prompt(format!("  {}", prompt))
            .with_initial_text(value)
            .allow_empty(true)
            .interact_text()?)
    };

    let name = text("Full Name", current.name)?;
    let bio = text("Bio", current.bio)?;
    let quote = text("Quote", current.quote)?;
    let username = text("Username", current.username)?;
    let email = text("Email", current.email)?;
    let phone = text("Phone", current.phone)?;

    let birthday = loop {
        let initial = current
            .birthday
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let input = text("Birthday (YYYY-MM-DD)", initial)?;
        match parse_birthday(&input) {
            Ok(birthday) => break birthday,
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    };

    Ok(ProfileDraft {
        name,
        username,
        email,
        phone,
        birthday,
        bio,
        quote,
    })
}

fn parse_birthday(input: &str) -> Result<Option<chrono::NaiveDate>> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    Ok(Some(parse_day(input)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use habitual_core::Theme;
    use habitual_core::profile::UserProfile;

    fn state() -> AppState {
        AppState::new(
            Theme::Sunset,
            UserProfile::placeholder(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()),
        )
    }

    #[test]
    fn edit_args_only_touch_given_fields() {
        let state = state();
        let mut draft = state.begin_profile_edit().unwrap();
        let args = EditArgs {
            name: Some("Ada Lovelace".into()),
            birthday: Some("none".into()),
            ..EditArgs::default()
        };

        args.apply_to(&mut draft).unwrap();
        state.commit_profile_edit(draft).unwrap();

        let profile = state.profile();
        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.birthday, None);
        assert_eq!(profile.email, "random.user@gmail.com");
        assert_eq!(format_birthday(profile.birthday), "-");
    }

    #[test]
    fn empty_args() {
        assert!(EditArgs::default().is_empty());
        let args = EditArgs {
            quote: Some(String::new()),
            ..EditArgs::default()
        };
        assert!(!args.is_empty());
    }

    #[test]
    fn birthday_parsing() {
        assert_eq!(parse_birthday("").unwrap(), None);
        assert_eq!(
            parse_birthday("2005-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2005, 1, 1)
        );
        assert!(parse_birthday("not a date at all xyz").is_err());
    }
}
