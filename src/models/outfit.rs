use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::ToneProfile;

/// Store search page used when an item has no affiliate link
pub const STORE_SEARCH_URL: &str = "https://www.myntra.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Men, Gender::Women];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
        }
    }

    /// Normalizes a free-form gender value.
    ///
    /// Exact names and common aliases first, then a case-insensitive
    /// prefix match in either direction ("wom" and "mens" both resolve).
    pub fn from_hint(hint: &str) -> Option<Self> {
        let hint = hint.trim().to_lowercase();
        if hint.is_empty() {
            return None;
        }

        match hint.as_str() {
            "men" | "man" | "male" | "m" => return Some(Gender::Men),
            "women" | "woman" | "female" | "f" | "w" => return Some(Gender::Women),
            _ => {}
        }

        Self::ALL.into_iter().find(|gender| {
            let key = gender.as_str().to_lowercase();
            key.starts_with(&hint) || hint.starts_with(&key)
        })
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    Date,
    Marriage,
    Office,
    Casual,
    Party,
}

impl Occasion {
    pub const ALL: [Occasion; 5] = [
        Occasion::Date,
        Occasion::Marriage,
        Occasion::Office,
        Occasion::Casual,
        Occasion::Party,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Date => "Date",
            Occasion::Marriage => "Marriage",
            Occasion::Office => "Office",
            Occasion::Casual => "Casual",
            Occasion::Party => "Party",
        }
    }

    /// Case-insensitive lookup; unknown occasions yield `None`
    pub fn from_hint(hint: &str) -> Option<Self> {
        let hint = hint.trim().to_lowercase();
        match hint.as_str() {
            "wedding" => Some(Occasion::Marriage),
            "work" => Some(Occasion::Office),
            "night out" => Some(Occasion::Party),
            _ => Self::ALL
                .into_iter()
                .find(|occasion| occasion.as_str().eq_ignore_ascii_case(&hint)),
        }
    }
}

impl Display for Occasion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single garment as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitItem {
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl OutfitItem {
    /// Affiliate link if present, otherwise a store search for the item
    pub fn link(&self) -> String {
        match &self.affiliate_link {
            Some(link) => link.clone(),
            None => store_search_link(self.search_query.as_deref().unwrap_or(&self.name)),
        }
    }
}

/// An outfit as stored in one (gender, occasion) bucket of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tone_profile: ToneProfile,
    pub items: Vec<OutfitItem>,
}

/// Item as returned to the client, with its link resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedItem {
    pub name: String,
    pub image: String,
    pub link: String,
}

/// Outfit as returned to the client.
///
/// Always built fresh from a catalog record, never a view into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedOutfit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tone_profile: ToneProfile,
    pub items: Vec<RecommendedItem>,
}

impl From<&OutfitRecord> for RecommendedOutfit {
    fn from(record: &OutfitRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            tone_profile: record.tone_profile,
            items: record
                .items
                .iter()
                .map(|item| RecommendedItem {
                    name: item.name.clone(),
                    image: item.image.clone(),
                    link: item.link(),
                })
                .collect(),
        }
    }
}

/// Builds `https://www.myntra.com/<percent-encoded query>`
pub fn store_search_link(query: &str) -> String {
    let query = query.trim();
    match Url::parse(STORE_SEARCH_URL) {
        Ok(mut url) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(query);
            }
            url.into()
        }
        Err(_) => format!("{}{}", STORE_SEARCH_URL, query),
    }
}
