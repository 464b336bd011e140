use crate::{
    catalog::Catalog,
    models::{Gender, Occasion, OutfitRecord, RecommendedOutfit, ToneProfile},
};

/// Selects up to `count` outfits for a request, best tone match first.
///
/// Ordering is exact tone matches, then Neutral outfits, then the rest, each
/// group keeping catalog order. A short pool yields a short result. Unknown
/// occasions yield an empty result. Returned outfits are fresh copies with
/// links resolved.
pub fn rank(
    catalog: &Catalog,
    gender: &str,
    tone_hint: &str,
    occasion: &str,
    count: usize,
) -> Vec<RecommendedOutfit> {
    let Some(occasion) = Occasion::from_hint(occasion) else {
        tracing::debug!(occasion = %occasion, "Unknown occasion, nothing to rank");
        return Vec::new();
    };

    let pool = candidate_pool(catalog, gender, occasion);
    let ordered = order_by_tone(&pool, tone_hint);

    tracing::debug!(
        gender = %gender,
        tone = %tone_hint,
        occasion = %occasion,
        pool = pool.len(),
        count,
        "Ranked outfits"
    );

    ordered
        .into_iter()
        .take(count)
        .map(RecommendedOutfit::from)
        .collect()
}

/// Outfits for the resolved gender, or every gender's outfits for the
/// occasion when that bucket is empty or the gender is unrecognized
pub fn candidate_pool<'a>(
    catalog: &'a Catalog,
    gender: &str,
    occasion: Occasion,
) -> Vec<&'a OutfitRecord> {
    let direct = Gender::from_hint(gender)
        .map(|gender| catalog.outfits(gender, occasion))
        .unwrap_or(&[]);

    if !direct.is_empty() {
        return direct.iter().collect();
    }

    tracing::debug!(gender = %gender, occasion = %occasion, "Falling back to all genders");
    catalog
        .genders()
        .flat_map(|gender| catalog.outfits(gender, occasion))
        .collect()
}

/// Stable three-way partition: exact, Neutral, other.
///
/// An empty hint counts as Neutral.
pub fn order_by_tone<'a>(pool: &[&'a OutfitRecord], tone_hint: &str) -> Vec<&'a OutfitRecord> {
    let hint = match tone_hint.trim() {
        "" => ToneProfile::Neutral.as_str(),
        hint => hint,
    };

    let mut exact = Vec::new();
    let mut neutral = Vec::new();
    let mut other = Vec::new();

    for &record in pool {
        if record.tone_profile.matches_hint(hint) {
            exact.push(record);
        } else if record.tone_profile == ToneProfile::Neutral {
            neutral.push(record);
        } else {
            other.push(record);
        }
    }

    exact.extend(neutral);
    exact.extend(other);
    exact
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn builtin() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn first_items(outfits: &[RecommendedOutfit]) -> Vec<&str> {
        outfits.iter().map(|o| o.items[0].name.as_str()).collect()
    }

    fn tones(outfits: &[RecommendedOutfit]) -> Vec<ToneProfile> {
        outfits.iter().map(|o| o.tone_profile).collect()
    }

    #[test]
    fn test_exact_then_neutral_then_other() {
        let outfits = rank(&builtin(), "Men", "Cool", "Date", 3);
        assert_eq!(
            first_items(&outfits),
            vec!["Navy Blue Polo", "Charcoal Crew Neck Tee", "Maroon Casual Shirt"]
        );
    }

    #[test]
    fn test_exact_matches_keep_catalog_order() {
        let outfits = rank(&builtin(), "Men", "warm", "date", 4);
        assert_eq!(
            tones(&outfits),
            vec![
                ToneProfile::Warm,
                ToneProfile::Warm,
                ToneProfile::Neutral,
                ToneProfile::Cool
            ]
        );
        assert_eq!(outfits[0].items[0].name, "Maroon Casual Shirt");
        assert_eq!(outfits[1].items[0].name, "Olive Bomber Jacket");
    }

    #[test]
    fn test_length_is_min_of_count_and_pool() {
        let catalog = builtin();
        for gender in Gender::ALL {
            for occasion in Occasion::ALL {
                let pool = catalog.outfits(gender, occasion).len();
                if pool == 0 {
                    continue;
                }
                for count in 0..=6 {
                    let outfits = rank(&catalog, gender.as_str(), "Warm", occasion.as_str(), count);
                    assert_eq!(outfits.len(), count.min(pool), "{}/{}", gender, occasion);
                }
            }
        }
    }

    #[test]
    fn test_results_are_duplicate_free() {
        let catalog = builtin();
        for occasion in Occasion::ALL {
            let outfits = rank(&catalog, "nobody", "Cool", occasion.as_str(), 10);
            let names: HashSet<_> = first_items(&outfits).into_iter().collect();
            assert_eq!(names.len(), outfits.len());
        }
    }

    #[test]
    fn test_no_match_and_no_neutral_returns_others_only() {
        // Men/Marriage holds a single Warm outfit
        let outfits = rank(&builtin(), "Men", "Cool", "Marriage", 3);
        assert_eq!(tones(&outfits), vec![ToneProfile::Warm]);
    }

    #[test]
    fn test_empty_tone_hint_prefers_neutral() {
        let outfits = rank(&builtin(), "Men", "", "Office", 3);
        assert_eq!(outfits[0].tone_profile, ToneProfile::Neutral);
        assert_eq!(outfits[0].title.as_deref(), Some("Greyscale Classic"));
    }

    #[test]
    fn test_unrecognized_tone_hint_falls_to_neutral_first() {
        let outfits = rank(&builtin(), "Women", "Olive", "Date", 3);
        assert_eq!(
            tones(&outfits),
            vec![ToneProfile::Neutral, ToneProfile::Cool, ToneProfile::Warm]
        );
    }

    #[test]
    fn test_unknown_occasion_is_empty() {
        assert!(rank(&builtin(), "Men", "Warm", "Funeral", 3).is_empty());
    }

    #[test]
    fn test_gender_prefix_is_normalized() {
        let direct = rank(&builtin(), "Women", "Warm", "Marriage", 3);
        let hinted = rank(&builtin(), "wom", "Warm", "Marriage", 3);
        assert_eq!(direct, hinted);
    }

    #[test]
    fn test_empty_bucket_falls_back_to_all_genders() {
        let catalog = Catalog::from_json(
            r#"{
                "Men": {"Date": [{"tone_profile": "Cool", "items": [{"name": "Navy Polo", "image": "x"}]}]},
                "Women": {"Date": [{"tone_profile": "Warm", "items": [{"name": "Rust Dress", "image": "y"}]}],
                          "Party": [{"tone_profile": "Warm", "items": [{"name": "Gold Dress", "image": "z"}]}]}
            }"#,
        )
        .unwrap();

        // Men has no Party bucket
        let outfits = rank(&catalog, "Men", "Cool", "Party", 3);
        assert_eq!(first_items(&outfits), vec!["Gold Dress"]);

        // unknown gender unions every gender, Men first
        let outfits = rank(&catalog, "robot", "Warm", "Date", 3);
        assert_eq!(first_items(&outfits), vec!["Rust Dress", "Navy Polo"]);
    }

    #[test]
    fn test_results_are_copies_with_links() {
        let catalog = builtin();
        let mut outfits = rank(&catalog, "Men", "Warm", "Date", 1);
        assert_eq!(
            outfits[0].items[0].link,
            "https://www.myntra.com/maroon%20casual%20shirt"
        );

        outfits[0].items[0].name.push_str(" (edited)");
        let again = rank(&catalog, "Men", "Warm", "Date", 1);
        assert_eq!(again[0].items[0].name, "Maroon Casual Shirt");
        assert_eq!(
            catalog.outfits(Gender::Men, Occasion::Date)[0].items[0].name,
            "Maroon Casual Shirt"
        );
    }
}
