//! Catalogue statique des loteries, pour la sélection uniquement.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayLotteries {
    pub day: &'static str,
    pub lotteries: &'static [&'static str],
}

pub const TRADITIONAL: &[WeekdayLotteries] = &[
    WeekdayLotteries { day: "Lunes", lotteries: &["Lotería de Cundinamarca", "Lotería del Tolima"] },
    WeekdayLotteries { day: "Martes", lotteries: &["Lotería de la Cruz Roja", "Lotería del Huila"] },
    WeekdayLotteries {
        day: "Miércoles",
        lotteries: &["Lotería de Manizales", "Lotería del Meta", "Lotería del Valle"],
    },
    WeekdayLotteries { day: "Jueves", lotteries: &["Lotería de Bogotá", "Lotería del Quindío"] },
    WeekdayLotteries {
        day: "Viernes",
        lotteries: &["Lotería de Medellín", "Lotería de Santander", "Lotería de Risaralda"],
    },
    WeekdayLotteries {
        day: "Sábado",
        lotteries: &["Lotería de Boyacá", "Lotería del Cauca", "Lotería del Extra Colombia"],
    },
];

pub const DAILY: &[&str] = &[
    "Astro Sol", "Astro Luna", "Dorado Mañana", "Dorado Tarde", "Dorado Noche",
    "Chontico Día", "Chontico Noche", "Paisita Día", "Paisita Noche",
    "Cafeterito Tarde", "Cafeterito Noche", "Sinuano Día", "Sinuano Noche",
    "Caribeña Día", "Caribeña Noche", "Motilón Día", "Motilón Noche",
    "Antioqueñita Día", "Antioqueñita Tarde", "Fantástica Día", "Fantástica Noche",
    "Culona Día", "Culona Noche", "Pijao de Oro", "Samán Día", "Play Four Noche",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Weekly(&'static str),
    Daily,
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Weekly(day) => write!(f, "{}", day),
            Schedule::Daily => write!(f, "Diaria"),
        }
    }
}

/// Toutes les loteries : traditionnelles (par jour) puis quotidiennes.
pub fn all_lotteries() -> impl Iterator<Item = &'static str> {
    TRADITIONAL
        .iter()
        .flat_map(|w| w.lotteries.iter().copied())
        .chain(DAILY.iter().copied())
}

/// Recherche insensible à la casse ; renvoie le nom canonique.
pub fn find_lottery(name: &str) -> Option<&'static str> {
    let needle = name.trim().to_lowercase();
    all_lotteries().find(|l| l.to_lowercase() == needle)
}

pub fn schedule_of(name: &str) -> Option<Schedule> {
    let canonical = find_lottery(name)?;
    TRADITIONAL
        .iter()
        .find(|w| w.lotteries.contains(&canonical))
        .map(|w| Schedule::Weekly(w.day))
        .or(Some(Schedule::Daily))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        let traditional: usize = TRADITIONAL.iter().map(|w| w.lotteries.len()).sum();
        assert_eq!(traditional, 15);
        assert_eq!(DAILY.len(), 26);
        assert_eq!(all_lotteries().count(), 41);
    }

    #[test]
    fn test_find_lottery_case_insensitive() {
        assert_eq!(find_lottery("astro luna"), Some("Astro Luna"));
        assert_eq!(find_lottery("  LOTERÍA DE BOGOTÁ "), Some("Lotería de Bogotá"));
        assert_eq!(find_lottery("Powerball"), None);
    }

    #[test]
    fn test_schedule_of() {
        assert_eq!(schedule_of("Lotería del Meta"), Some(Schedule::Weekly("Miércoles")));
        assert_eq!(schedule_of("Dorado Noche"), Some(Schedule::Daily));
        assert_eq!(schedule_of("inconnue"), None);
    }
}
