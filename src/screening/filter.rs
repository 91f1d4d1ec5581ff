use serde::{Deserialize, Serialize};

use crate::models::{BodyRegion, CategoryFlow};

/// Which catalog tags a body-map selection shows.
///
/// Limbs also shows systemic categories and systemic also shows chest
/// categories. The widening is deliberate and one-directional.
const REGION_MEMBERSHIP: &[(BodyRegion, &[BodyRegion])] = &[
    (BodyRegion::Head, &[BodyRegion::Head]),
    (BodyRegion::Chest, &[BodyRegion::Chest]),
    (BodyRegion::Abdomen, &[BodyRegion::Abdomen]),
    (BodyRegion::Pelvis, &[BodyRegion::Pelvis]),
    (BodyRegion::Limbs, &[BodyRegion::Limbs, BodyRegion::Systemic]),
    (BodyRegion::Systemic, &[BodyRegion::Systemic, BodyRegion::Chest]),
];

/// Category tags included when `selected` is picked on the body map.
pub fn regions_for(selected: BodyRegion) -> &'static [BodyRegion] {
    REGION_MEMBERSHIP
        .iter()
        .find(|(region, _)| *region == selected)
        .map(|(_, included)| *included)
        .unwrap_or(&[])
}

/// Current browse filter on the category grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub search_term: Option<String>,
    pub body_region: Option<BodyRegion>,
}

impl CategoryFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            body_region: None,
        }
    }

    pub fn region(region: BodyRegion) -> Self {
        Self {
            search_term: None,
            body_region: Some(region),
        }
    }

    /// Body-map click: selecting the active region again clears it.
    pub fn toggle_region(&mut self, region: BodyRegion) {
        self.body_region = if self.body_region == Some(region) {
            None
        } else {
            Some(region)
        };
    }

    fn active_search(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

/// Narrow the catalog for display, preserving catalog order.
///
/// A non-empty search term wins and the body region is ignored. Otherwise a
/// body region applies the membership table. With neither, everything shows.
pub fn filter_categories<'a>(
    catalog: &'a [CategoryFlow],
    filter: &CategoryFilter,
) -> Vec<&'a CategoryFlow> {
    if let Some(term) = filter.active_search() {
        return catalog
            .iter()
            .filter(|c| matches_search(c, &term))
            .collect();
    }

    match filter.body_region {
        Some(region) => {
            let included = regions_for(region);
            catalog
                .iter()
                .filter(|c| included.contains(&c.body_region))
                .collect()
        }
        None => catalog.iter().collect(),
    }
}

/// `term` must already be lowercase.
fn matches_search(category: &CategoryFlow, term: &str) -> bool {
    category.label.to_lowercase().contains(term)
        || category
            .keywords
            .iter()
            .any(|k| k.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATEGORY_FLOWS;

    fn ids(filter: &CategoryFilter) -> Vec<&'static str> {
        filter_categories(CATEGORY_FLOWS, filter)
            .into_iter()
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn no_filter_returns_full_catalog_in_order() {
        let all: Vec<_> = CATEGORY_FLOWS.iter().map(|c| c.id).collect();
        assert_eq!(ids(&CategoryFilter::default()), all);
    }

    #[test]
    fn head_region() {
        assert_eq!(ids(&CategoryFilter::region(BodyRegion::Head)), vec!["neurology"]);
    }

    #[test]
    fn chest_region_is_respiratory_and_cardiovascular() {
        assert_eq!(
            ids(&CategoryFilter::region(BodyRegion::Chest)),
            vec!["respiratory", "cardiovascular"]
        );
    }

    #[test]
    fn abdomen_and_pelvis_regions() {
        assert_eq!(ids(&CategoryFilter::region(BodyRegion::Abdomen)), vec!["digestive"]);
        assert_eq!(ids(&CategoryFilter::region(BodyRegion::Pelvis)), vec!["genitourinary"]);
    }

    #[test]
    fn limbs_region_pulls_in_systemic() {
        assert_eq!(
            ids(&CategoryFilter::region(BodyRegion::Limbs)),
            vec!["musculoskeletal", "endocrine", "dermatology", "hematology"]
        );
    }

    #[test]
    fn systemic_region_pulls_in_chest() {
        assert_eq!(
            ids(&CategoryFilter::region(BodyRegion::Systemic)),
            vec!["respiratory", "cardiovascular", "endocrine", "hematology"]
        );
    }

    #[test]
    fn widening_is_one_directional() {
        // chest does not pull systemic back in, systemic does not pull limbs
        let chest = ids(&CategoryFilter::region(BodyRegion::Chest));
        assert!(!chest.contains(&"endocrine"));
        let systemic = ids(&CategoryFilter::region(BodyRegion::Systemic));
        assert!(!systemic.contains(&"musculoskeletal"));
    }

    #[test]
    fn every_region_matches_membership_table() {
        for region in BodyRegion::all() {
            let included = regions_for(*region);
            let result = filter_categories(CATEGORY_FLOWS, &CategoryFilter::region(*region));
            let expected: Vec<_> = CATEGORY_FLOWS
                .iter()
                .filter(|c| included.contains(&c.body_region))
                .collect();
            assert_eq!(result, expected, "{region}");
        }
    }

    #[test]
    fn search_matches_keyword() {
        let found = ids(&CategoryFilter::search("tiểu"));
        assert!(found.contains(&"genitourinary"));
        // "tiểu đường" keyword and "tiêu hóa" label do not collide
        assert!(found.contains(&"endocrine"));
        assert!(!found.contains(&"digestive"));
    }

    #[test]
    fn search_is_case_insensitive_on_label() {
        assert_eq!(ids(&CategoryFilter::search("TIM MẠCH")), vec!["cardiovascular"]);
        assert_eq!(ids(&CategoryFilter::search("hô HẤP")), vec!["respiratory"]);
    }

    #[test]
    fn search_overrides_region() {
        let filter = CategoryFilter {
            search_term: Some("da".into()),
            body_region: Some(BodyRegion::Head),
        };
        let found = ids(&filter);
        assert!(found.contains(&"dermatology"));
        assert!(!found.contains(&"neurology"));
    }

    #[test]
    fn search_result_is_exactly_substring_matches() {
        for term in ["ho", "đau", "ngất", "máu", "xyz"] {
            let found = ids(&CategoryFilter::search(term));
            for category in CATEGORY_FLOWS {
                let expected = category.label.to_lowercase().contains(term)
                    || category.keywords.iter().any(|k| k.contains(term));
                assert_eq!(found.contains(&category.id), expected, "{term} / {}", category.id);
            }
        }
    }

    #[test]
    fn blank_search_falls_back_to_region() {
        let filter = CategoryFilter {
            search_term: Some("  ".into()),
            body_region: Some(BodyRegion::Pelvis),
        };
        assert_eq!(ids(&filter), vec!["genitourinary"]);
    }

    #[test]
    fn toggle_region_clears_on_reselect() {
        let mut filter = CategoryFilter::default();
        filter.toggle_region(BodyRegion::Chest);
        assert_eq!(filter.body_region, Some(BodyRegion::Chest));
        filter.toggle_region(BodyRegion::Head);
        assert_eq!(filter.body_region, Some(BodyRegion::Head));
        filter.toggle_region(BodyRegion::Head);
        assert_eq!(filter.body_region, None);
    }
}
