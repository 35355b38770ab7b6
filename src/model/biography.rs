//! Static biography lookup for providers

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

pub const BIOGRAPHY_FALLBACK: &str = "Biography not available.";

const BUILTIN: &[(&str, &str)] = &[
    (
        "muhammad-ayyub",
        "Muhammad Ayyub was a Saudi Arabian Imam, Qari, and Islamic scholar known for his recitation of the Quran. He was an Imam of Al-Masjid an-Nabawi in Medina and a faculty member at the Islamic University of Madinah.",
    ),
    (
        "nasser-al-qatami",
        "Nasser Al Qatami, born in Riyadh in 1980, is a renowned reciter in the Persian Gulf and the Arab world. He holds a bachelor's degree in Islamic studies and an honorary doctorate from Al Hayat University in Cairo. He started Imamat at 14 and is a member of the Saudi scientific association of the Quran and its sciences.",
    ),
    (
        "muhammad-al-luhaydan",
        "Muhammad Ibn Abdellah Ibn Ibrahim Ibn Muhammad Al-Luhaidan is a Judge, Quran reciter, and Imam in Saudi Arabia. He obtained certifications in Quran readings under notable scholars. Known for his voice and Quranic expertise, he has served as Imam in several mosques. He also worked as a Judge and holds a master's degree in Islamic politics. His fame spread through numerous audio and video recordings, conferences, and international appearances.",
    ),
    (
        "hamzah-elhabashy",
        "Hamzah Elhabashy from Maryland in the United States, won 2nd place in the Full Quran category at the 19th annual Dubai International Quran Competition. He completed his memorization of the Qur'an at the age of 10 and has entered numerous competitions. He studied under Shaykh Okasaha Kameny and Abdul Rashid Sufi.",
    ),
];

/// Provider name → biography text
#[derive(Clone, Debug, Default)]
pub struct Biographies {
    entries: HashMap<String, String>,
}

impl Biographies {
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, bio)| (name.to_string(), bio.to_string()))
            .collect();
        Self { entries }
    }

    /// Merge a JSON object of `{ "name": "text" }` over the current entries.
    pub fn merge_from_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading biographies from {}", path.display()))?;
        let extra: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("parsing biographies in {}", path.display()))?;
        let count = extra.len();
        self.entries.extend(extra);
        Ok(count)
    }

    pub fn insert(&mut self, name: impl Into<String>, bio: impl Into<String>) {
        self.entries.insert(name.into(), bio.into());
    }

    pub fn lookup(&self, name: &str) -> &str {
        self.entries
            .get(name)
            .map(String::as_str)
            .unwrap_or(BIOGRAPHY_FALLBACK)
    }
}
