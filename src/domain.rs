pub mod cleaned_text;
pub mod countries;
pub mod waitlist_entry;

pub use cleaned_text::CleanedText;
pub use countries::{CountrySelection, EU_COUNTRIES, SellToday};
pub use waitlist_entry::{MissingFields, NEW_ENTRY_STATUS, WaitlistEntry};
