//! Career map and readiness assessment
//!
//! Readiness is the share of a role's core skills found among the detected
//! skills. The growth projection then lays out what to learn over the next
//! 30, 60 and 90 days.

use anyhow::{Context, Result};
use skilltwin_types::{
    CareerReadiness, Detection, GrowthPeriod, GrowthProjection, ReadinessStatus, Timeline,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::role::RoleProfile;

/// Role used by the built-in career map
pub const DEFAULT_ROLE: &str = "backend developer";

/// Percentage points added for the 30 day window
const THIRTY_DAY_GAIN: u8 = 20;
/// Percentage points added for the 60 day window
const SIXTY_DAY_GAIN: u8 = 40;
/// Advanced skills suggested for the 60 day window
const SIXTY_DAY_ADVANCED: usize = 2;

/// Readiness and growth plan for one target role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// Readiness against the role's core skills
    pub readiness: CareerReadiness,
    /// Empty when the role is unknown
    pub growth: GrowthProjection,
}

/// Role name to profile lookup
#[derive(Debug, Clone)]
pub struct CareerMap {
    roles: HashMap<String, RoleProfile>,
}

impl CareerMap {
    /// Create an empty career map
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// Career map with the built-in backend developer profile
    pub fn builtin() -> Self {
        Self::new().with_role(
            DEFAULT_ROLE,
            RoleProfile::new(
                ["javascript", "node", "express", "mongodb"],
                ["docker", "aws", "redis"],
            ),
        )
    }

    /// Parse a YAML document mapping role names to profiles
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: BTreeMap<String, RoleProfile> =
            serde_yaml::from_str(yaml).context("Failed to parse role profiles")?;

        let map = raw
            .into_iter()
            .fold(Self::new(), |map, (role, profile)| map.with_role(&role, profile));

        Ok(map)
    }

    /// Load role profiles from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read role profiles {:?}", path))?;

        let map = Self::from_yaml(&yaml).with_context(|| format!("Invalid role file {:?}", path))?;
        info!("Loaded {} role profiles from {:?}", map.len(), path);
        Ok(map)
    }

    /// Add or replace a role
    pub fn with_role(mut self, role: &str, profile: RoleProfile) -> Self {
        let role = normalize_role(role);
        let profile = profile.normalized();

        if profile.core.is_empty() {
            warn!("Role '{}' has no core skills, readiness will stay at 0", role);
        }
        if self.roles.insert(role.clone(), profile).is_some() {
            debug!("Replaced role profile '{}'", role);
        }
        self
    }

    /// Profile for a career goal, matched case-insensitively
    pub fn get(&self, goal: &str) -> Option<&RoleProfile> {
        self.roles.get(&normalize_role(goal))
    }

    /// Known role names, sorted
    pub fn roles(&self) -> Vec<&str> {
        let mut roles: Vec<_> = self.roles.keys().map(String::as_str).collect();
        roles.sort_unstable();
        roles
    }

    /// Number of roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if the map has no roles
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Role skills rejected by `is_known`, as `(role, skill)` pairs sorted by role
    pub fn unknown_skills<F>(&self, is_known: F) -> Vec<(&str, &str)>
    where
        F: Fn(&str) -> bool,
    {
        let mut unknown: Vec<_> = self
            .roles
            .iter()
            .flat_map(|(role, profile)| profile.skills().map(move |skill| (role.as_str(), skill)))
            .filter(|(_, skill)| !is_known(*skill))
            .collect();
        unknown.sort_unstable();
        unknown
    }

    /// Assess detected skills against a career goal
    pub fn assess(&self, goal: &str, skills: &[Detection]) -> Assessment {
        let target_role = goal.trim().to_string();

        let Some(profile) = self.get(goal) else {
            debug!("No profile for career goal '{}'", target_role);
            return Assessment {
                readiness: CareerReadiness::unknown_role(target_role),
                growth: GrowthProjection::default(),
            };
        };

        let owned: HashSet<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        let percentage = core_coverage(profile, &owned);

        let readiness = CareerReadiness {
            target_role,
            percentage,
            status: status_for(percentage),
            timeline: timeline_for(percentage),
        };

        Assessment {
            growth: project_growth(profile, &owned, percentage),
            readiness,
        }
    }
}

impl Default for CareerMap {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_role(role: &str) -> String {
    role.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Rounded share of core skills owned, `0` for an empty core
fn core_coverage(profile: &RoleProfile, owned: &HashSet<&str>) -> u8 {
    if profile.core.is_empty() {
        return 0;
    }

    let matched = profile
        .core
        .iter()
        .filter(|skill| owned.contains(skill.as_str()))
        .count();

    let share = (matched as f64 / profile.core.len() as f64 * 100.0).round();
    share.clamp(0.0, 100.0) as u8
}

fn status_for(percentage: u8) -> ReadinessStatus {
    match percentage {
        85..=u8::MAX => ReadinessStatus::Ready,
        60..=84 => ReadinessStatus::AlmostThere,
        30..=59 => ReadinessStatus::HalfwayThere,
        _ => ReadinessStatus::GettingStarted,
    }
}

fn timeline_for(percentage: u8) -> Timeline {
    match percentage {
        85..=u8::MAX => Timeline::UpToOneMonth,
        60..=84 => Timeline::TwoToThreeMonths,
        _ => Timeline::FourToSixMonths,
    }
}

fn project_growth(profile: &RoleProfile, owned: &HashSet<&str>, percentage: u8) -> GrowthProjection {
    let missing_core = profile
        .core
        .iter()
        .filter(|skill| !owned.contains(skill.as_str()))
        .cloned()
        .collect();

    GrowthProjection {
        thirty_days: vec![GrowthPeriod {
            percentage: percentage.saturating_add(THIRTY_DAY_GAIN).min(100),
            skills: missing_core,
        }],
        sixty_days: vec![GrowthPeriod {
            percentage: percentage.saturating_add(SIXTY_DAY_GAIN).min(100),
            skills: profile
                .advanced
                .iter()
                .take(SIXTY_DAY_ADVANCED)
                .cloned()
                .collect(),
        }],
        ninety_days: vec![GrowthPeriod {
            percentage: 100,
            skills: profile.advanced.clone(),
        }],
    }
}
