//! Month and weekday names for calendar rendering.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

const EN_WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const RU_WEEKDAYS: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const RU_MONTHS: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
    "Октябрь", "Ноябрь", "Декабрь",
];
// Genitive forms, as used in "05 января 2024".
const RU_MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

impl Locale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }

    /// Column headers for a Monday-first week.
    pub fn weekday_headers(self) -> [&'static str; 7] {
        match self {
            Self::En => EN_WEEKDAYS,
            Self::Ru => RU_WEEKDAYS,
        }
    }

    pub fn month_name(self, date: NaiveDate) -> &'static str {
        let index = date.month0() as usize;
        match self {
            Self::En => EN_MONTHS[index],
            Self::Ru => RU_MONTHS[index],
        }
    }

    /// Grid title, e.g. `January 2024`.
    pub fn month_title(self, date: NaiveDate) -> String {
        format!("{} {}", self.month_name(date), date.year())
    }

    /// Diary entry heading, e.g. `05 January 2024`.
    pub fn long_date(self, date: NaiveDate) -> String {
        let month = match self {
            Self::En => EN_MONTHS[date.month0() as usize],
            Self::Ru => RU_MONTHS_GENITIVE[date.month0() as usize],
        };
        format!("{:02} {} {}", date.day(), month, date.year())
    }
}
