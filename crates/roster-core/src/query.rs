//! Filter and sort engine over the loaded member set.
//!
//! Pure functions of (member set, criteria) → ordered index view. The
//! member set is never mutated; callers render through the returned
//! original indices.

use std::cmp::Ordering;

use crate::member::Member;

/// Field used for ordering when the criteria name none.
pub const DEFAULT_SORT_FIELD: &str = "name";

/// Current UI-selected filter and sort state.
///
/// Selected filter values are matched case-insensitively; the "All"
/// sentinel never reaches this layer — a group with "All" checked arrives
/// here as an empty list (pass-through).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub query: String,
    pub regions: Vec<String>,
    pub pathogens: Vec<String>,
    pub settings: Vec<String>,
    /// Canonical field name; empty means [`DEFAULT_SORT_FIELD`].
    pub sort_field: String,
}

impl Criteria {
    pub fn sort_field(&self) -> &str {
        if self.sort_field.is_empty() {
            DEFAULT_SORT_FIELD
        } else {
            &self.sort_field
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.regions.is_empty()
            && self.pathogens.is_empty()
            && self.settings.is_empty()
    }
}

/// Filter `members` by `criteria` and sort the survivors by the chosen
/// field. Returns original indices in display order.
pub fn apply(members: &[Member], criteria: &Criteria) -> Vec<usize> {
    let query = criteria.query.trim().to_lowercase();
    let regions = lowercase_all(&criteria.regions);
    let pathogens = lowercase_all(&criteria.pathogens);
    let settings = lowercase_all(&criteria.settings);

    let mut view: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            matches_query(m, &query)
                && matches_region(m, &regions)
                && matches_pathogen(m, &pathogens)
                && matches_setting(m, &settings)
        })
        .map(|(i, _)| i)
        .collect();

    let field = criteria.sort_field();
    // sort_by is stable, so ties keep insertion order — reproducible for
    // identical inputs.
    view.sort_by(|&a, &b| natural_cmp(members[a].get(field).trim(), members[b].get(field).trim()));
    view
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Case-insensitive substring match against every field value.
fn matches_query(member: &Member, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    member
        .fields()
        .any(|(_, value)| value.to_lowercase().contains(query))
}

fn matches_region(member: &Member, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    let region = member.region.to_lowercase();
    let region = region.trim();
    selected.iter().any(|sel| region.contains(sel.as_str()))
}

/// Sub-values of a multi-valued field, lowercased and trimmed.
pub fn split_tokens(field: &str) -> Vec<String> {
    field
        .to_lowercase()
        .split([',', ';'])
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// The feed contains both spellings of "parasitic"; either selection must
/// match either stored form.
fn typo_equivalent(selected: &str, token: &str) -> bool {
    (selected.contains("parastic") && token.contains("parasitic"))
        || (selected.contains("parasitic") && token.contains("parastic"))
}

fn matches_pathogen(member: &Member, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    let tokens = split_tokens(&member.health_threat_category);
    selected.iter().any(|sel| {
        tokens
            .iter()
            .any(|token| token.contains(sel.as_str()) || typo_equivalent(sel, token))
    })
}

fn matches_setting(member: &Member, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    let tokens = split_tokens(&member.setting);
    selected
        .iter()
        .any(|sel| tokens.iter().any(|token| token.contains(sel.as_str())))
}

/// Case-insensitive, numeric-aware string ordering: digit runs compare as
/// numbers, so "file 9" sorts before "file 10".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0usize, 0usize);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let run_a = digit_run(&a, &mut i);
            let run_b = digit_run(&b, &mut j);
            let ord = run_a
                .len()
                .cmp(&run_b.len())
                .then_with(|| run_a.cmp(run_b));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            let ord = a[i].to_lowercase().cmp(b[j].to_lowercase());
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

/// Consume a digit run starting at `*pos`, returning it without leading
/// zeros (same-length runs then compare digit-wise).
fn digit_run<'a>(chars: &'a [char], pos: &mut usize) -> &'a [char] {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    let run = &chars[start..*pos];
    let significant = run.iter().position(|&c| c != '0').unwrap_or(run.len());
    &run[significant..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, region: &str) -> Member {
        Member {
            name: name.to_string(),
            region: region.to_string(),
            ..Default::default()
        }
    }

    fn names<'a>(members: &'a [Member], view: &[usize]) -> Vec<&'a str> {
        view.iter().map(|&i| members[i].name.as_str()).collect()
    }

    #[test]
    fn natural_ordering_is_numeric_aware() {
        assert_eq!(natural_cmp("item 9", "item 10"), Ordering::Less);
        assert_eq!(natural_cmp("item 10", "item 9"), Ordering::Greater);
        assert_eq!(natural_cmp("alice", "Bob"), Ordering::Less);
        assert_eq!(natural_cmp("Bob", "alice"), Ordering::Greater);
        assert_eq!(natural_cmp("File 007", "file 7"), Ordering::Equal);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn empty_criteria_returns_full_set_sorted_by_name() {
        let members = vec![
            member("item 10", ""),
            member("Bob", ""),
            member("item 9", ""),
            member("alice", ""),
        ];
        let view = apply(&members, &Criteria::default());
        assert_eq!(names(&members, &view), vec!["alice", "Bob", "item 9", "item 10"]);
    }

    #[test]
    fn scenario_name_sort() {
        let members = vec![member("Zoe", "West Africa"), member("Amir", "South Asia")];
        let view = apply(&members, &Criteria::default());
        assert_eq!(names(&members, &view), vec!["Amir", "Zoe"]);
    }

    #[test]
    fn scenario_region_substring() {
        let members = vec![member("Zoe", "West Africa"), member("Amir", "South Asia")];
        let criteria = Criteria {
            regions: vec!["africa".to_string()],
            ..Default::default()
        };
        let view = apply(&members, &criteria);
        assert_eq!(names(&members, &view), vec!["Zoe"]);
    }

    #[test]
    fn query_matches_any_field_case_insensitively() {
        let mut m = member("Ada", "West Africa");
        m.expertise = "Genomic Surveillance".to_string();
        let members = vec![m, member("Blank", "")];

        let criteria = Criteria {
            query: "genomic".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&members, &apply(&members, &criteria)), vec!["Ada"]);

        // Empty query includes everyone, even records with empty fields.
        let view = apply(&members, &Criteria::default());
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn query_excludes_record_with_no_matching_field() {
        let members = vec![member("", "")];
        let criteria = Criteria {
            query: "anything".to_string(),
            ..Default::default()
        };
        assert!(apply(&members, &criteria).is_empty());
    }

    #[test]
    fn pathogen_tokens_split_on_comma_and_semicolon() {
        let mut m = member("Ada", "");
        m.health_threat_category = "Viral; Bacterial, Fungal".to_string();
        let members = vec![m];

        for sel in ["viral", "bacterial", "fungal"] {
            let criteria = Criteria {
                pathogens: vec![sel.to_string()],
                ..Default::default()
            };
            assert_eq!(apply(&members, &criteria).len(), 1, "selection {sel}");
        }

        let criteria = Criteria {
            pathogens: vec!["prion".to_string()],
            ..Default::default()
        };
        assert!(apply(&members, &criteria).is_empty());
    }

    #[test]
    fn parasitic_typo_matches_both_directions() {
        let mut stored_typo = member("Typo", "");
        stored_typo.health_threat_category = "Parastic".to_string();
        let mut stored_correct = member("Correct", "");
        stored_correct.health_threat_category = "Parasitic".to_string();
        let members = vec![stored_typo, stored_correct];

        for sel in ["parasitic", "parastic"] {
            let criteria = Criteria {
                pathogens: vec![sel.to_string()],
                ..Default::default()
            };
            assert_eq!(
                apply(&members, &criteria).len(),
                2,
                "selection {sel} should match both spellings"
            );
        }
    }

    #[test]
    fn setting_filter_has_no_typo_case() {
        let mut m = member("Ada", "");
        m.setting = "Hospital, Field work".to_string();
        let members = vec![m];

        let hit = Criteria {
            settings: vec!["field".to_string()],
            ..Default::default()
        };
        assert_eq!(apply(&members, &hit).len(), 1);

        let miss = Criteria {
            settings: vec!["lab".to_string()],
            ..Default::default()
        };
        assert!(apply(&members, &miss).is_empty());
    }

    #[test]
    fn predicates_combine_with_and() {
        let mut m = member("Ada", "West Africa");
        m.health_threat_category = "Viral".to_string();
        let members = vec![m];

        let criteria = Criteria {
            regions: vec!["africa".to_string()],
            pathogens: vec!["bacterial".to_string()],
            ..Default::default()
        };
        assert!(apply(&members, &criteria).is_empty());
    }

    #[test]
    fn sort_by_missing_field_orders_as_empty() {
        let mut a = member("Ada", "");
        a.organization = "Zeta Lab".to_string();
        let b = member("Bob", "");
        let members = vec![a, b];

        let criteria = Criteria {
            sort_field: "organization".to_string(),
            ..Default::default()
        };
        // Bob has no organization, so sorts first as "".
        assert_eq!(names(&members, &apply(&members, &criteria)), vec!["Bob", "Ada"]);
    }
}
