use crate::nav::TOTAL_ANGS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bani {
    pub name: &'static str,
    pub category: &'static str,
    pub start_ang: u32,
    pub end_ang: u32,
}

impl Bani {
    pub fn range_label(&self) -> String {
        if self.start_ang == self.end_ang {
            format!("Ang {}", self.start_ang)
        } else {
            format!("Ang {}-{}", self.start_ang, self.end_ang)
        }
    }
}

const fn bani(name: &'static str, category: &'static str, start_ang: u32, end_ang: u32) -> Bani {
    Bani {
        name,
        category,
        start_ang,
        end_ang,
    }
}

const MORNING: &str = "Morning Nitnem";
const EVENING: &str = "Evening Nitnem";
const SPECIAL: &str = "Special Banis";
const HUKAMNAMA: &str = "Daily Hukamnama";

const CATALOG: [Bani; 18] = [
    bani("Japji Sahib", MORNING, 1, 8),
    bani("Jaap Sahib", MORNING, 9, 10),
    bani("Tav Prasad Savaiye", MORNING, 11, 12),
    bani("Chaupai Sahib", MORNING, 13, 15),
    bani("Anand Sahib", MORNING, 16, 17),
    bani("Rehras Sahib", EVENING, 18, 20),
    bani("Kirtan Sohila", EVENING, 21, 22),
    bani("Sukhmani Sahib", SPECIAL, 23, 25),
    bani("Dukh Bhanjani Sahib", SPECIAL, 26, 28),
    bani("Asa Di Vaar", SPECIAL, 29, 31),
    bani("Shabad Hazare", SPECIAL, 32, 34),
    bani("Barah Maha", SPECIAL, 35, 37),
    bani("Aarti", SPECIAL, 38, 40),
    bani("Basant Ki Vaar", SPECIAL, 41, 43),
    bani("Salok Mahalla 9", SPECIAL, 44, 46),
    bani("Laavan", SPECIAL, 47, 49),
    bani("Raag Mala", SPECIAL, 50, 52),
    bani("Hukamnama", HUKAMNAMA, 1, TOTAL_ANGS),
];

/// Catalog entries in display order.
pub fn catalog() -> impl Iterator<Item = &'static Bani> {
    CATALOG.iter()
}

pub fn find_bani(name: &str) -> Option<&'static Bani> {
    let needle = name.trim();
    if needle.is_empty() {
        return None;
    }
    catalog().find(|entry| entry.name.eq_ignore_ascii_case(needle))
}
