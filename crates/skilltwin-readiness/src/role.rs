//! Role profiles: the skills a target role expects

use serde::Deserialize;

/// Skills expected for one target role
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RoleProfile {
    /// Skills that decide readiness
    #[serde(default)]
    pub core: Vec<String>,
    /// Skills suggested once the core is covered
    #[serde(default)]
    pub advanced: Vec<String>,
}

impl RoleProfile {
    /// Create a profile from core and advanced skill lists
    pub fn new<C, A>(core: C, advanced: A) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            core: normalize_list(core),
            advanced: normalize_list(advanced),
        }
    }

    /// Lowercase, trim and dedupe both lists, keeping first occurrences
    pub(crate) fn normalized(self) -> Self {
        Self::new(self.core, self.advanced)
    }

    /// All skills of the profile, core first
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.core
            .iter()
            .chain(self.advanced.iter())
            .map(String::as_str)
    }
}

fn normalize_list<I>(skills: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for skill in skills {
        let skill = skill.as_ref().trim().to_lowercase();
        if !skill.is_empty() && !out.contains(&skill) {
            out.push(skill);
        }
    }
    out
}
