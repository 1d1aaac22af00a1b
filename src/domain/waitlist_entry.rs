use chrono::{NaiveDate, Utc};

use crate::domain::cleaned_text::CleanedText;
use crate::domain::countries::{CountrySelection, EU_COUNTRIES, SellToday};
use crate::routes::SubmissionForm;

/// Status given to every freshly submitted entry.
pub const NEW_ENTRY_STATUS: &str = "New";

/// A validated, cleaned waitlist submission, ready to be stored.
#[derive(Debug, Clone)]
pub struct WaitlistEntry {
    pub first_name: CleanedText,
    pub last_name: CleanedText,
    pub email: CleanedText,
    pub company: CleanedText,
    pub website: CleanedText,
    pub countries: CountrySelection,
    pub revenue: CleanedText,
    pub customers: CleanedText,
    pub commit_bratislava: CleanedText,
    pub commit_amsterdam: CleanedText,
    pub expectations: CleanedText,
    pub additional_info: CleanedText,
    pub submission_date: NaiveDate,
}

/// Names of the required form fields that were absent or empty,
/// in the order the form declares them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl std::fmt::Display for MissingFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Missing required fields: {}", self.0.join(", "))
    }
}

impl std::error::Error for MissingFields {}

impl TryFrom<SubmissionForm> for WaitlistEntry {
    type Error = MissingFields;

    fn try_from(form: SubmissionForm) -> Result<Self, Self::Error> {
        WaitlistEntry::parse(form, Utc::now().date_naive())
    }
}

impl WaitlistEntry {
    /// Checks that every required field is filled in, then cleans all of them.
    /// Nothing is cleaned unless the whole form is complete.
    pub fn parse(form: SubmissionForm, submission_date: NaiveDate) -> Result<Self, MissingFields> {
        let required = [
            ("firstName", is_filled(&form.first_name)),
            ("lastName", is_filled(&form.last_name)),
            ("email", is_filled(&form.email)),
            ("company", is_filled(&form.company)),
            ("website", is_filled(&form.website)),
            (
                "sellToday",
                form.sell_today.as_ref().is_some_and(SellToday::is_present),
            ),
            ("revenue", is_filled(&form.revenue)),
            ("customers", is_filled(&form.customers)),
            ("commitBratislava", is_filled(&form.commit_bratislava)),
            ("commitAmsterdam", is_filled(&form.commit_amsterdam)),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, filled)| !filled)
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(MissingFields(missing));
        }

        let countries = form
            .sell_today
            .as_ref()
            .map(|sell_today| CountrySelection::partition(sell_today, &EU_COUNTRIES))
            .unwrap_or_default();

        Ok(Self {
            first_name: clean(form.first_name),
            last_name: clean(form.last_name),
            email: clean(form.email),
            company: clean(form.company),
            website: clean(form.website),
            countries,
            revenue: clean(form.revenue),
            customers: clean(form.customers),
            commit_bratislava: clean(form.commit_bratislava),
            commit_amsterdam: clean(form.commit_amsterdam),
            expectations: clean(form.expectations),
            additional_info: clean(form.additional_info),
            submission_date,
        })
    }
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn clean(value: Option<String>) -> CleanedText {
    value
        .as_deref()
        .map(CleanedText::parse)
        .unwrap_or_default()
}
