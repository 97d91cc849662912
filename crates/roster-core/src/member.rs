//! Canonical member record and raw-payload normalization.
//!
//! The upstream feed mixes canonical keys with legacy spreadsheet-style
//! headers ("Professional (Title)", "Organization / Affiliation", …).
//! `FIELDS` maps each canonical field to its accepted aliases in resolution
//! order; `normalize` is total — any JSON value in, fully-populated record
//! out.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder used when a record carries no photo reference.
pub const DEFAULT_PHOTO: &str = "images/default.jpg";

/// One normalized directory entry. Every field is always present; absent
/// input normalizes to the empty string (photo: to [`DEFAULT_PHOTO`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub pronouns: String,
    pub professional_title: String,
    pub photo: String,
    pub organization: String,
    pub sector: String,
    pub primary_role: String,
    pub career_stage: String,
    pub country_based: String,
    pub country_work: String,
    pub region: String,
    pub language: String,
    pub health_threat_category: String,
    pub health_threat_pathogen: String,
    pub setting: String,
    pub expertise: String,
    pub laboratory_methods: String,
    pub interest_areas: String,
    pub seeking_collaborations: String,
    pub collaboration_type: String,
    pub email: String,
    pub websites: String,
}

/// Canonical field name plus the legacy keys it may arrive under.
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

/// Resolution table, in declaration order of [`Member`]. The alias lists
/// reproduce the feed's historical headers verbatim — including the
/// trailing space in "Language ".
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "name", aliases: &[] },
    FieldSpec { name: "pronouns", aliases: &[] },
    FieldSpec {
        name: "professional_title",
        aliases: &["professional_Title", "Professional (Title)"],
    },
    FieldSpec { name: "photo", aliases: &[] },
    FieldSpec {
        name: "organization",
        aliases: &["Organization / Affiliation"],
    },
    FieldSpec { name: "sector", aliases: &[] },
    FieldSpec {
        name: "primary_role",
        aliases: &["primary_Role", "Primary (Role)"],
    },
    FieldSpec {
        name: "career_stage",
        aliases: &["career_Stage", "Career (Stage)"],
    },
    FieldSpec {
        name: "country_based",
        aliases: &["Country (based)"],
    },
    FieldSpec {
        name: "country_work",
        aliases: &["Country (work)"],
    },
    FieldSpec { name: "region", aliases: &["Region"] },
    FieldSpec { name: "language", aliases: &["Language "] },
    FieldSpec {
        name: "health_threat_category",
        aliases: &["health_Threat_Category", "Health (Threats) (category)"],
    },
    FieldSpec {
        name: "health_threat_pathogen",
        aliases: &["health_Threat_Pathogen", "Health (Threats) (Pathogen/Threat)"],
    },
    FieldSpec {
        name: "setting",
        aliases: &["setting of work"],
    },
    FieldSpec { name: "expertise", aliases: &[] },
    FieldSpec {
        name: "laboratory_methods",
        aliases: &["laboratory_Methods", "Laboratory (methods)"],
    },
    FieldSpec {
        name: "interest_areas",
        aliases: &["interest_Areas", "Interest (Areas)", "Interests"],
    },
    FieldSpec {
        name: "seeking_collaborations",
        aliases: &["seeking_Collaborations", "Seeking (Collaborations)"],
    },
    FieldSpec {
        name: "collaboration_type",
        aliases: &["collaboration_Type", "Collaboration (Type)"],
    },
    FieldSpec { name: "email", aliases: &[] },
    FieldSpec {
        name: "websites",
        aliases: &["Websites / LinkedIn"],
    },
];

impl Member {
    /// Value of a canonical field by name. Unknown names read as empty —
    /// a missing sort field then orders like an empty string.
    pub fn get(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "pronouns" => &self.pronouns,
            "professional_title" => &self.professional_title,
            "photo" => &self.photo,
            "organization" => &self.organization,
            "sector" => &self.sector,
            "primary_role" => &self.primary_role,
            "career_stage" => &self.career_stage,
            "country_based" => &self.country_based,
            "country_work" => &self.country_work,
            "region" => &self.region,
            "language" => &self.language,
            "health_threat_category" => &self.health_threat_category,
            "health_threat_pathogen" => &self.health_threat_pathogen,
            "setting" => &self.setting,
            "expertise" => &self.expertise,
            "laboratory_methods" => &self.laboratory_methods,
            "interest_areas" => &self.interest_areas,
            "seeking_collaborations" => &self.seeking_collaborations,
            "collaboration_type" => &self.collaboration_type,
            "email" => &self.email,
            "websites" => &self.websites,
            _ => "",
        }
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        Some(match field {
            "name" => &mut self.name,
            "pronouns" => &mut self.pronouns,
            "professional_title" => &mut self.professional_title,
            "photo" => &mut self.photo,
            "organization" => &mut self.organization,
            "sector" => &mut self.sector,
            "primary_role" => &mut self.primary_role,
            "career_stage" => &mut self.career_stage,
            "country_based" => &mut self.country_based,
            "country_work" => &mut self.country_work,
            "region" => &mut self.region,
            "language" => &mut self.language,
            "health_threat_category" => &mut self.health_threat_category,
            "health_threat_pathogen" => &mut self.health_threat_pathogen,
            "setting" => &mut self.setting,
            "expertise" => &mut self.expertise,
            "laboratory_methods" => &mut self.laboratory_methods,
            "interest_areas" => &mut self.interest_areas,
            "seeking_collaborations" => &mut self.seeking_collaborations,
            "collaboration_type" => &mut self.collaboration_type,
            "email" => &mut self.email,
            "websites" => &mut self.websites,
            _ => return None,
        })
    }

    /// All canonical (field, value) pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        FIELDS.iter().map(|spec| (spec.name, self.get(spec.name)))
    }

    /// True when the record carries a photo other than the placeholder.
    pub fn has_photo(&self) -> bool {
        !self.photo.is_empty() && self.photo != DEFAULT_PHOTO
    }
}

/// Scalar JSON values read as text; arrays/objects/null do not resolve.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Map a raw object of unknown shape to a fully-populated [`Member`].
///
/// Per field: the canonical key wins, then aliases in table order; the
/// first non-empty scalar is taken. Never fails — a malformed or empty
/// input still yields a complete record.
pub fn normalize(raw: &Value) -> Member {
    let map = raw.as_object();
    let mut member = Member::default();

    for spec in FIELDS {
        let resolved = map.and_then(|m| {
            std::iter::once(spec.name)
                .chain(spec.aliases.iter().copied())
                .find_map(|key| {
                    m.get(key)
                        .and_then(scalar_text)
                        .filter(|text| !text.is_empty())
                })
        });
        if let (Some(slot), Some(text)) = (member.field_mut(spec.name), resolved) {
            *slot = text;
        }
    }

    if member.photo.is_empty() {
        member.photo = DEFAULT_PHOTO.to_string();
    }
    member
}

/// Human-readable field label: underscores become spaces, each word
/// capitalized ("career_stage" → "Career Stage").
pub fn display_label(field: &str) -> String {
    field
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_normalizes_to_defaults() {
        let member = normalize(&json!({}));
        assert_eq!(member.photo, DEFAULT_PHOTO);
        for (field, value) in member.fields() {
            if field == "photo" {
                continue;
            }
            assert_eq!(value, "", "field {field} should default to empty");
        }
    }

    #[test]
    fn non_object_input_still_yields_complete_record() {
        for raw in [json!(null), json!("x"), json!(42), json!([1, 2])] {
            let member = normalize(&raw);
            assert_eq!(member.photo, DEFAULT_PHOTO);
            assert_eq!(member.name, "");
        }
    }

    #[test]
    fn legacy_aliases_resolve() {
        let member = normalize(&json!({
            "name": "Ada",
            "Professional (Title)": "Epidemiologist",
            "Organization / Affiliation": "WHO",
            "Language ": "French",
            "Interests": "Surveillance",
            "Health (Threats) (category)": "Viral; Parasitic",
            "setting of work": "Hospital, Field",
            "Websites / LinkedIn": "https://example.org",
        }));
        assert_eq!(member.professional_title, "Epidemiologist");
        assert_eq!(member.organization, "WHO");
        assert_eq!(member.language, "French");
        assert_eq!(member.interest_areas, "Surveillance");
        assert_eq!(member.health_threat_category, "Viral; Parasitic");
        assert_eq!(member.setting, "Hospital, Field");
        assert_eq!(member.websites, "https://example.org");
    }

    #[test]
    fn canonical_key_wins_over_alias() {
        let member = normalize(&json!({
            "organization": "Canonical Org",
            "Organization / Affiliation": "Legacy Org",
        }));
        assert_eq!(member.organization, "Canonical Org");
    }

    #[test]
    fn empty_canonical_falls_through_to_alias() {
        let member = normalize(&json!({
            "organization": "",
            "Organization / Affiliation": "Legacy Org",
        }));
        assert_eq!(member.organization, "Legacy Org");
    }

    #[test]
    fn scalars_are_stringified() {
        let member = normalize(&json!({ "name": 7, "seeking_collaborations": true }));
        assert_eq!(member.name, "7");
        assert_eq!(member.seeking_collaborations, "true");
    }

    #[test]
    fn normalization_is_idempotent_on_canonical_records() {
        let member = normalize(&json!({
            "name": "Ada",
            "photo": "images/ada.jpg",
            "region": "West Africa",
            "email": "ada@example.org",
        }));
        let canonical = serde_json::to_value(&member).unwrap();
        assert_eq!(normalize(&canonical), member);
    }

    #[test]
    fn labels_are_humanized() {
        assert_eq!(display_label("name"), "Name");
        assert_eq!(display_label("career_stage"), "Career Stage");
        assert_eq!(
            display_label("health_threat_category"),
            "Health Threat Category"
        );
    }
}
