// ── Derived view projection ──
//
// Pure functions from (country list, filter) to what the list view
// shows. Nothing here holds state, so projecting on every filter change
// is always safe.

use serde::Serialize;

use crate::model::Country;

/// Transient list filter. Both predicates must hold for a country to be
/// visible; neither order of application changes the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Case-insensitive substring of the common name or first capital.
    pub search: String,
    /// Exact region name; `None` or empty keeps every region.
    pub region: Option<String>,
}

impl ViewFilter {
    pub fn new(search: impl Into<String>, region: Option<String>) -> Self {
        Self {
            search: search.into(),
            region,
        }
    }

    /// Whether either predicate would remove anything.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.region_term().is_some()
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.region = None;
    }

    fn region_term(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }
}

/// One projection of the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryView<'a> {
    /// Matching countries in directory order.
    pub visible: Vec<&'a Country>,
    /// Every region in the directory, sorted, no duplicates.
    pub regions: Vec<String>,
    /// Size of the unfiltered directory.
    pub total: usize,
}

impl CountryView<'_> {
    /// `"Showing 2 of 250 countries"`
    pub fn summary(&self) -> String {
        format!("Showing {} of {} countries", self.visible.len(), self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

pub fn project<'a>(countries: &'a [Country], filter: &ViewFilter) -> CountryView<'a> {
    let needle = search_needle(&filter.search);
    let region = filter.region_term();

    let visible = countries
        .iter()
        .filter(|c| matches_lowered(c, &needle))
        .filter(|c| region.is_none_or(|r| c.region == r))
        .collect();

    CountryView {
        visible,
        regions: regions(countries),
        total: countries.len(),
    }
}

/// Distinct regions, lexicographically sorted.
pub fn regions(countries: &[Country]) -> Vec<String> {
    let mut out: Vec<String> = countries.iter().map(|c| c.region.clone()).collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Case-insensitive substring match on the common name or first
/// capital. A blank term matches everything.
pub fn matches_search(country: &Country, term: &str) -> bool {
    matches_lowered(country, &search_needle(term))
}

/// Exact, case-sensitive region match. An empty region matches everything.
pub fn matches_region(country: &Country, region: &str) -> bool {
    region.is_empty() || country.region == region
}

/// Lowercased search term; whitespace-only terms become empty. Other
/// terms keep their surrounding spaces.
fn search_needle(term: &str) -> String {
    if term.trim().is_empty() {
        String::new()
    } else {
        term.to_lowercase()
    }
}

fn matches_lowered(country: &Country, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    country.name.common.to_lowercase().contains(needle)
        || country
            .first_capital()
            .is_some_and(|cap| cap.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::country::fixtures::{country, sample};

    fn names<'a>(view: &CountryView<'a>) -> Vec<&'a str> {
        view.visible.iter().map(|c| c.name.common.as_str()).collect()
    }

    fn directory() -> Vec<Country> {
        let mut list = sample();
        list.push(country("Brazil", "BRA", "Americas", Some("Brasília")));
        list.push(country("Antarctica", "ATA", "Antarctic", None));
        list.push(country("Bermuda", "BMU", "Americas", Some("Hamilton")));
        list.push(country("Austria", "AUT", "Europe", Some("Vienna")));
        list
    }

    #[test]
    fn empty_filter_is_identity() {
        let list = directory();
        let view = project(&list, &ViewFilter::default());
        let all: Vec<&Country> = list.iter().collect();
        assert_eq!(view.visible, all);
        assert_eq!(view.total, list.len());
    }

    #[test]
    fn search_matches_capital() {
        let list = sample();
        let view = project(&list, &ViewFilter::new("ber", None));
        assert_eq!(names(&view), vec!["Germany"]);
    }

    #[test]
    fn region_filter_is_exact() {
        let list = sample();
        let view = project(&list, &ViewFilter::new("", Some("Asia".into())));
        assert_eq!(names(&view), vec!["Japan"]);

        let view = project(&list, &ViewFilter::new("", Some("asia".into())));
        assert!(view.is_empty());
    }

    #[test]
    fn empty_region_keeps_everything() {
        let list = sample();
        let view = project(&list, &ViewFilter::new("", Some(String::new())));
        assert_eq!(names(&view), vec!["France", "Germany", "Japan"]);
    }

    #[test]
    fn blank_search_keeps_everything() {
        let list = sample();
        let filter = ViewFilter::new("   ", None);
        assert!(!filter.is_active());
        assert_eq!(project(&list, &filter).visible.len(), 3);
    }

    #[test]
    fn both_predicates_apply_and_order_is_kept() {
        let list = directory();
        let view = project(&list, &ViewFilter::new("b", Some("Americas".into())));
        assert_eq!(names(&view), vec!["Brazil", "Bermuda"]);

        // Region first then search gives the same set.
        let by_region: Vec<&Country> = list.iter().filter(|c| matches_region(c, "Americas")).collect();
        let both: Vec<&Country> = by_region.into_iter().filter(|c| matches_search(c, "b")).collect();
        assert_eq!(view.visible, both);
    }

    #[test]
    fn projection_is_idempotent() {
        let list = directory();
        let filter = ViewFilter::new("a", Some("Europe".into()));
        let once = project(&list, &filter);
        let again_input: Vec<Country> = once.visible.iter().map(|c| (*c).clone()).collect();
        let twice = project(&again_input, &filter);
        let once_names = names(&once);
        assert_eq!(names(&twice), once_names);
    }

    #[test]
    fn every_match_contains_the_term() {
        let list = directory();
        for term in ["a", "BER", "ia", "vie", "zzz"] {
            let view = project(&list, &ViewFilter::new(term, None));
            let lowered = term.to_lowercase();
            for c in &view.visible {
                let in_name = c.name.common.to_lowercase().contains(&lowered);
                let in_capital = c
                    .first_capital()
                    .is_some_and(|cap| cap.to_lowercase().contains(&lowered));
                assert!(in_name || in_capital, "{} should not match {term}", c.name.common);
            }
        }
    }

    #[test]
    fn regions_are_sorted_and_unique() {
        let list = directory();
        assert_eq!(
            regions(&list),
            vec!["Americas", "Antarctic", "Asia", "Europe"]
        );
        assert!(regions(&[]).is_empty());
    }

    #[test]
    fn no_match_gives_empty_view_with_regions() {
        let list = sample();
        let view = project(&list, &ViewFilter::new("atlantis", None));
        assert!(view.is_empty());
        assert_eq!(view.regions, vec!["Asia", "Europe"]);
        assert_eq!(view.summary(), "Showing 0 of 3 countries");
    }

    #[test]
    fn clear_resets_both_predicates() {
        let mut filter = ViewFilter::new("fr", Some("Europe".into()));
        assert!(filter.is_active());
        filter.clear();
        assert_eq!(filter, ViewFilter::default());
    }
}
