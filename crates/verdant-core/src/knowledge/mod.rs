//! The plant knowledge base: curated profiles, personality templates and the
//! open species catalog, indexed for name lookup.
//!
//! A [`PlantKnowledgeBase`] is built once and is read-only afterwards, so a
//! single instance can be shared (for example behind an `Arc`) between any
//! number of schedulers and interpreters.
//!
//! Name resolution stops at the first hit:
//!
//! 1. curated species keys (`"Snake Plant"` finds `snake_plant`),
//! 2. curated common names,
//! 3. open-catalog common names, exact and case-insensitive,
//! 4. open-catalog common names by substring in either direction.

pub mod catalog;
pub mod profile;
pub mod sources;

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, warn};

use crate::care::Season;
use crate::config::KnowledgeConfig;
use crate::personality::{MessageTemplates, MessageType, PersonalityArchetype};
use crate::watering::WateringHeuristics;

pub use profile::{
    GrowthMultipliers, PlantCareProfile, Provenance, SeasonalMultipliers, adjusted_frequency,
};
pub use sources::{SeasonalCalendarEntry, SourceError};

use sources::{CuratedDocument, PersonalityDocument};

static BUNDLED_CURATED: &str = include_str!("../../data/plant_care_schedules.json");
static BUNDLED_PERSONALITIES: &str = include_str!("../../data/plant_personalities.json");
static BUNDLED_CATALOG: &str = include_str!("../../data/house_plants.json");

const CURATED_SOURCE: &str = "curated care profiles";
const PERSONALITY_SOURCE: &str = "personality archetypes";
const CATALOG_SOURCE: &str = "open species catalog";

/// Canonical species key: lower-case, whitespace runs become `_`.
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Comparable display name: lower-case, `_` read as a space, whitespace
/// collapsed.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Which lookup step produced a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStep {
    CuratedKey,
    CuratedAlias,
    CatalogExact,
    CatalogSubstring,
}

/// Indexed, immutable plant knowledge.
#[derive(Debug, Clone)]
pub struct PlantKnowledgeBase {
    curated: Vec<PlantCareProfile>,
    curated_keys: HashMap<String, usize>,
    curated_aliases: HashMap<String, usize>,
    catalog: Vec<PlantCareProfile>,
    catalog_exact: HashMap<String, usize>,
    /// Every catalog name in record order, for the substring scan.
    catalog_names: Vec<(String, usize)>,
    templates: MessageTemplates,
    seasonal_calendar: BTreeMap<Season, SeasonalCalendarEntry>,
    default_profile: PlantCareProfile,
}

impl PlantKnowledgeBase {
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::default()
    }

    /// Load the sources named by `config`, or the bundled data when it names
    /// no directory. Missing or corrupt files become empty tables.
    pub fn load(config: &KnowledgeConfig) -> Self {
        let (Some(curated), Some(personalities), Some(catalog)) = (
            config.curated_path(),
            config.personalities_path(),
            config.catalog_path(),
        ) else {
            return Self::bundled();
        };

        Self::builder()
            .curated_json(sources::read_or_empty(CURATED_SOURCE, &curated))
            .personalities_json(sources::read_or_empty(PERSONALITY_SOURCE, &personalities))
            .catalog_json(sources::read_or_empty(CATALOG_SOURCE, &catalog))
            .build()
    }

    /// The data compiled into the crate.
    pub fn bundled() -> Self {
        Self::builder()
            .curated_json(BUNDLED_CURATED)
            .personalities_json(BUNDLED_PERSONALITIES)
            .catalog_json(BUNDLED_CATALOG)
            .build()
    }

    /// A knowledge base with no species and no templates. Every lookup
    /// misses.
    pub fn empty() -> Self {
        Self::builder().build()
    }

    /// Resolve a species or common name to a profile.
    pub fn lookup(&self, name: &str) -> Option<&PlantCareProfile> {
        self.lookup_with_step(name).map(|(profile, _)| profile)
    }

    /// Like [`lookup`](Self::lookup), also reporting which step matched.
    pub fn lookup_with_step(&self, name: &str) -> Option<(&PlantCareProfile, LookupStep)> {
        let key = normalize_key(name);
        let wanted = normalize_name(name);
        // Separator-only input ("_") normalizes to an empty name, which every
        // catalog name would contain.
        if key.is_empty() || wanted.is_empty() {
            return None;
        }
        if let Some(&i) = self.curated_keys.get(&key) {
            debug!(name, species_id = %self.curated[i].species_id, "curated key hit");
            return Some((&self.curated[i], LookupStep::CuratedKey));
        }

        if let Some(&i) = self.curated_aliases.get(&wanted) {
            debug!(name, species_id = %self.curated[i].species_id, "curated alias hit");
            return Some((&self.curated[i], LookupStep::CuratedAlias));
        }

        if let Some(&i) = self.catalog_exact.get(&wanted) {
            debug!(name, species_id = %self.catalog[i].species_id, "catalog name hit");
            return Some((&self.catalog[i], LookupStep::CatalogExact));
        }

        let found = self
            .catalog_names
            .iter()
            .find(|(candidate, _)| candidate.contains(&wanted) || wanted.contains(candidate.as_str()));
        if let Some(&(_, i)) = found {
            debug!(name, species_id = %self.catalog[i].species_id, "catalog substring hit");
            return Some((&self.catalog[i], LookupStep::CatalogSubstring));
        }

        debug!(name, "species not found");
        None
    }

    /// Resolve a name, falling back to the system default profile.
    pub fn resolve(&self, name: Option<&str>) -> &PlantCareProfile {
        name.and_then(|n| self.lookup(n))
            .unwrap_or(&self.default_profile)
    }

    pub fn default_profile(&self) -> &PlantCareProfile {
        &self.default_profile
    }

    pub fn templates(&self) -> &MessageTemplates {
        &self.templates
    }

    /// General care notes for a season from the curated calendar.
    pub fn seasonal_calendar(&self, season: Season) -> Option<&SeasonalCalendarEntry> {
        self.seasonal_calendar.get(&season)
    }

    /// Curated profiles in species-id order.
    pub fn curated_profiles(&self) -> &[PlantCareProfile] {
        &self.curated
    }

    /// Catalog-derived profiles in record order.
    pub fn catalog_profiles(&self) -> &[PlantCareProfile] {
        &self.catalog
    }
}

impl Default for PlantKnowledgeBase {
    fn default() -> Self {
        Self::empty()
    }
}

/// Builds a [`PlantKnowledgeBase`] from raw source documents.
///
/// Absent sources are empty. Blank or unparsable text degrades the same way
/// a missing file does.
#[derive(Debug, Default)]
pub struct KnowledgeBaseBuilder {
    curated: Option<String>,
    personalities: Option<String>,
    catalog: Option<String>,
    heuristics: Option<WateringHeuristics>,
}

impl KnowledgeBaseBuilder {
    pub fn curated_json(mut self, json: impl Into<String>) -> Self {
        self.curated = Some(json.into());
        self
    }

    pub fn personalities_json(mut self, json: impl Into<String>) -> Self {
        self.personalities = Some(json.into());
        self
    }

    pub fn catalog_json(mut self, json: impl Into<String>) -> Self {
        self.catalog = Some(json.into());
        self
    }

    /// Use a custom watering rule table for catalog derivation.
    pub fn heuristics(mut self, heuristics: WateringHeuristics) -> Self {
        self.heuristics = Some(heuristics);
        self
    }

    pub fn build(self) -> PlantKnowledgeBase {
        let heuristics = self.heuristics.unwrap_or_else(WateringHeuristics::bundled);

        let curated_doc: CuratedDocument = parse_optional(CURATED_SOURCE, self.curated.as_deref());
        let personality_doc: PersonalityDocument =
            parse_optional(PERSONALITY_SOURCE, self.personalities.as_deref());
        let records = match self.catalog.as_deref() {
            Some(text) if !text.trim().is_empty() => sources::parse_catalog(text),
            Some(_) => {
                warn!("{CATALOG_SOURCE} is empty; continuing with an empty table");
                Vec::new()
            }
            None => Vec::new(),
        };

        // Curated profiles and their indexes.
        let mut curated = Vec::new();
        let mut curated_keys = HashMap::new();
        let mut curated_aliases = HashMap::new();
        for (species_id, value) in curated_doc.plants {
            let Some(entry) = sources::decode_curated_entry(&species_id, value) else {
                continue;
            };
            let profile = catalog::profile_from_curated(&species_id, &entry);
            let index = curated.len();
            curated_keys.entry(normalize_key(&species_id)).or_insert(index);
            for alias in &profile.common_names {
                let alias = normalize_name(alias);
                if !alias.is_empty() {
                    curated_aliases.entry(alias).or_insert(index);
                }
            }
            curated.push(profile);
        }

        // Open catalog.
        let mut catalog = Vec::with_capacity(records.len());
        let mut catalog_exact = HashMap::new();
        let mut catalog_names = Vec::new();
        for record in &records {
            let index = catalog.len();
            for name in &record.common {
                let name = normalize_name(name);
                if name.is_empty() {
                    continue;
                }
                catalog_exact.entry(name.clone()).or_insert(index);
                catalog_names.push((name, index));
            }
            catalog.push(catalog::profile_from_catalog(record, &heuristics));
        }

        let templates = build_templates(personality_doc);

        let mut seasonal_calendar = BTreeMap::new();
        for (name, entry) in curated_doc.seasonal_care_calendar {
            match name.parse::<Season>() {
                Ok(season) => {
                    seasonal_calendar.insert(season, entry);
                }
                Err(e) => warn!(error = %e, "ignoring seasonal calendar entry"),
            }
        }

        info!(
            curated = curated.len(),
            catalog = catalog.len(),
            templates = templates.len(),
            "knowledge base ready"
        );

        PlantKnowledgeBase {
            curated,
            curated_keys,
            curated_aliases,
            catalog,
            catalog_exact,
            catalog_names,
            templates,
            seasonal_calendar,
            default_profile: PlantCareProfile::system_default(),
        }
    }
}

fn parse_optional<T>(source_name: &'static str, text: Option<&str>) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match text {
        Some(text) if !text.trim().is_empty() => sources::parse_or_empty(source_name, text),
        Some(_) => {
            warn!("{source_name} is empty; continuing with an empty table");
            T::default()
        }
        None => T::default(),
    }
}

fn build_templates(doc: PersonalityDocument) -> MessageTemplates {
    let mut templates = MessageTemplates::new();
    for (id, entry) in doc.personalities {
        let archetype = match id.parse::<PersonalityArchetype>() {
            Ok(a) => a,
            Err(e) => {
                warn!(error = %e, "skipping templates for unknown archetype");
                continue;
            }
        };
        for (kind, list) in entry.message_templates {
            match kind.parse::<MessageType>() {
                Ok(message_type) => templates.insert(archetype, message_type, list),
                // Other message kinds (greetings, chat openers) belong to the
                // conversational layer.
                Err(_) => debug!(archetype = %archetype, kind = %kind, "ignoring message kind"),
            }
        }
    }
    templates
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURATED: &str = r#"{
        "plants": {
            "snake_plant": {
                "common_names": ["Snake Plant", "Mother-in-law's Tongue"],
                "watering": {"frequency_days": 14},
                "personality": "sarcastic_survivor"
            },
            "pothos": {
                "common_names": ["Pothos", "Devil's Ivy"],
                "watering": {"frequency_days": 7}
            }
        },
        "seasonal_care_calendar": {
            "winter": {"general_notes": "Water less", "tasks": ["Check for drafts"]},
            "monsoon": {"tasks": ["ignored"]}
        }
    }"#;

    const CATALOG: &str = r#"[
        {"common": ["Lipstick", "Lipstick plant"], "latin": "Aeschynanthus radicans",
         "category": "Hanging", "watering": "Keep moist"},
        {"common": ["Maindenhair", "Maidenhair fern"], "latin": "Adiantum raddianum",
         "category": "Fern", "watering": "Keep moist"},
        {"common": ["Pothos"], "latin": "Epipremnum aureum", "category": "Hanging",
         "watering": "Water when half dry"}
    ]"#;

    fn kb() -> PlantKnowledgeBase {
        PlantKnowledgeBase::builder()
            .curated_json(CURATED)
            .catalog_json(CATALOG)
            .build()
    }

    #[test]
    fn normalizers() {
        assert_eq!(normalize_key("  Snake   Plant "), "snake_plant");
        assert_eq!(normalize_name("Snake_Plant"), "snake plant");
        assert_eq!(normalize_name("  ZZ   plant"), "zz plant");
    }

    #[test]
    fn curated_key_wins_first() {
        let kb = kb();
        let (profile, step) = kb.lookup_with_step("Snake Plant").unwrap();
        assert_eq!(profile.species_id, "snake_plant");
        assert_eq!(step, LookupStep::CuratedKey);
    }

    #[test]
    fn curated_alias_before_catalog() {
        let kb = kb();
        let (profile, step) = kb.lookup_with_step("devil's ivy").unwrap();
        assert_eq!(profile.species_id, "pothos");
        assert_eq!(step, LookupStep::CuratedAlias);
        // "Pothos" is also a catalog name but the curated key is tried first.
        assert_eq!(kb.lookup("POTHOS").unwrap().provenance, Provenance::Curated);
    }

    #[test]
    fn catalog_exact_and_substring() {
        let kb = kb();
        let (profile, step) = kb.lookup_with_step("lipstick plant").unwrap();
        assert_eq!(profile.provenance, Provenance::CatalogDerived);
        assert_eq!(step, LookupStep::CatalogExact);

        let (profile, step) = kb.lookup_with_step("my maindenhair").unwrap();
        assert_eq!(profile.latin_name.as_deref(), Some("Adiantum raddianum"));
        assert_eq!(step, LookupStep::CatalogSubstring);
    }

    #[test]
    fn miss_and_default() {
        let kb = kb();
        assert!(kb.lookup("Triffid").is_none());
        assert!(kb.lookup("   ").is_none());
        assert_eq!(
            kb.resolve(Some("Triffid")).provenance,
            Provenance::SystemDefault
        );
        assert_eq!(kb.resolve(None).watering_frequency_days, 7);
    }

    #[test]
    fn separator_only_names_never_match() {
        let kb = kb();
        for name in ["_", "__", " _ ", "_\t_"] {
            assert!(
                kb.lookup(name).is_none(),
                "expected no match for {name:?}, got: {:?}",
                kb.lookup(name).map(|p| &p.species_id)
            );
        }
        assert_eq!(kb.resolve(Some("_")).provenance, Provenance::SystemDefault);
    }

    #[test]
    fn seasonal_calendar_skips_unknown_seasons() {
        let kb = kb();
        let winter = kb.seasonal_calendar(Season::Winter).unwrap();
        assert_eq!(winter.general_notes.as_deref(), Some("Water less"));
        assert!(kb.seasonal_calendar(Season::Summer).is_none());
    }

    #[test]
    fn corrupt_sources_degrade_independently() {
        let kb = PlantKnowledgeBase::builder()
            .curated_json("{ not json")
            .personalities_json("")
            .catalog_json(CATALOG)
            .build();
        assert!(kb.curated_profiles().is_empty());
        assert!(kb.templates().is_empty());
        assert_eq!(kb.catalog_profiles().len(), 3);
        assert!(kb.lookup("Lipstick").is_some());
    }

    #[test]
    fn templates_skip_unknown_archetypes_and_kinds() {
        let kb = PlantKnowledgeBase::builder()
            .personalities_json(
                r#"{"personalities": {
                    "chill_friend": {"message_templates": {
                        "watering_reminder": ["Hey, {plant_name} could use a drink"],
                        "greeting": ["hi"]
                    }},
                    "grumpy_cat": {"message_templates": {
                        "watering_reminder": ["no"]
                    }}
                }}"#,
            )
            .build();
        assert_eq!(kb.templates().len(), 1);
        assert_eq!(
            kb.templates()
                .template(PersonalityArchetype::ChillFriend, MessageType::WateringReminder),
            Some("Hey, {plant_name} could use a drink")
        );
    }

    #[test]
    fn bundled_data_loads() {
        let kb = PlantKnowledgeBase::bundled();
        assert!(!kb.curated_profiles().is_empty());
        assert!(!kb.catalog_profiles().is_empty());
        assert!(!kb.templates().is_empty());
        for season in Season::ALL {
            assert!(kb.seasonal_calendar(season).is_some(), "{season}");
        }
    }

    #[test]
    fn load_without_dir_is_bundled() {
        let kb = PlantKnowledgeBase::load(&KnowledgeConfig::bundled());
        assert_eq!(
            kb.curated_profiles().len(),
            PlantKnowledgeBase::bundled().curated_profiles().len()
        );
    }
}
