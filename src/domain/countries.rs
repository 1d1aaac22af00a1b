use super::CleanedText;

/// The countries offered as checkboxes on the waitlist form.
pub const EU_COUNTRIES: [&str; 27] = [
    "Austria",
    "Belgium",
    "Bulgaria",
    "Croatia",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Ireland",
    "Italy",
    "Latvia",
    "Lithuania",
    "Luxembourg",
    "Malta",
    "Netherlands",
    "Poland",
    "Portugal",
    "Romania",
    "Slovakia",
    "Slovenia",
    "Spain",
    "Sweden",
];

/// Sentinel sent by the form when the "other" checkbox is ticked.
const OTHER_SENTINEL: &str = "other";

/// The raw `sellToday` value: either the checkbox values as a list or
/// a single comma separated string.
#[derive(serde::Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum SellToday {
    List(Vec<String>),
    Text(String),
}

impl SellToday {
    pub fn is_present(&self) -> bool {
        match self {
            SellToday::List(_) => true,
            SellToday::Text(text) => !text.is_empty(),
        }
    }

    fn cleaned_items(&self) -> Vec<CleanedText> {
        let items: Vec<&str> = match self {
            SellToday::List(items) => items.iter().map(String::as_str).collect(),
            SellToday::Text(text) => text.split(',').collect(),
        };
        items
            .into_iter()
            .map(CleanedText::parse)
            .filter(|item| !item.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountrySelection {
    pub recognized: Vec<String>,
    pub other: Vec<String>,
}

impl CountrySelection {
    /// Splits the selection into names found in `known` and free-text
    /// entries, in order of appearance. The "other" sentinel is dropped.
    pub fn partition(sell_today: &SellToday, known: &[&str]) -> Self {
        let mut selection = Self::default();
        for item in sell_today.cleaned_items() {
            let item = item.into_inner();
            if known.contains(&item.as_str()) {
                selection.recognized.push(item);
            } else if item != OTHER_SENTINEL {
                selection.other.push(item);
            }
        }
        selection
    }

    /// Free-text countries as stored in the record: comma separated.
    pub fn other_joined(&self) -> String {
        self.other.join(", ")
    }
}
