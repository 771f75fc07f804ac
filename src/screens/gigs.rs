use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::error;

use super::{Phase, Prompt, STORAGE_NOTICE};
use crate::db::gigs::{Gig, NewGig};
use crate::error::AppError;
use crate::repository::GigRepository;
use crate::validation::{require_text, validate_calendar_date, DateCheck};

/// Contents of the add-gig form. The date is only set once day, month and
/// year have all been picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GigForm {
    pub title: String,
    pub venue: String,
    pub city: String,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl GigForm {
    /// Build the row to insert, checking the title and the picked date
    pub fn to_new_gig(&self, today: NaiveDate) -> Result<NewGig, AppError> {
        let title = require_text(&self.title, "Title is required")?;

        let date = match (self.day, self.month, self.year) {
            (Some(day), Some(month), Some(year)) => {
                match validate_calendar_date(day, month, year, today) {
                    DateCheck::Valid(date) => date.format("%Y-%m-%d").to_string(),
                    DateCheck::InvalidCombination => {
                        return Err(AppError::validation("Please select a valid date"))
                    }
                    DateCheck::InPast => {
                        return Err(AppError::validation("Gig date cannot be in the past"))
                    }
                }
            }
            _ => String::new(),
        };

        Ok(NewGig {
            title,
            date,
            venue: self.venue.trim().to_string(),
            city: self.city.trim().to_string(),
        })
    }
}

pub struct GigsScreen {
    repo: GigRepository,
    pub form: GigForm,
    gigs: Vec<Gig>,
    phase: Phase,
}

impl GigsScreen {
    pub fn new(repo: GigRepository) -> Self {
        Self {
            repo,
            form: GigForm::default(),
            gigs: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn gigs(&self) -> &[Gig] {
        &self.gigs
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Banner text when gigs cannot be stored on this platform
    pub fn storage_notice(&self) -> Option<&'static str> {
        (!self.repo.is_available()).then_some(STORAGE_NOTICE)
    }

    /// Reload the list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        match self.repo.list().await {
            Ok(gigs) => {
                self.gigs = gigs;
                Ok(())
            }
            Err(e) => {
                error!("Error loading gigs: {}", e);
                Err(e)
            }
        }
    }

    /// Add the gig in the form, using the local date as "today"
    pub async fn submit(&mut self) -> Result<i64, Prompt> {
        self.submit_on(Local::now().date_naive()).await
    }

    /// Add the gig in the form. Validation runs before any storage call;
    /// on success the form is cleared and the list reloaded.
    pub async fn submit_on(&mut self, today: NaiveDate) -> Result<i64, Prompt> {
        let gig = self.form.to_new_gig(today)?;

        self.phase = Phase::Submitting;
        let result = self.repo.add(gig).await;
        self.phase = Phase::Idle;

        let id = result?;
        self.form = GigForm::default();
        let _ = self.refresh().await;
        Ok(id)
    }

    pub fn request_delete(&self, _id: i64) -> Prompt {
        Prompt::confirm(
            "Delete Gig",
            "Are you sure you want to delete this gig?",
            "Delete",
        )
    }

    /// Delete after the user confirmed
    pub async fn delete(&mut self, id: i64) -> Result<(), Prompt> {
        self.repo.delete(id).await?;
        let _ = self.refresh().await;
        Ok(())
    }
}
