use crate::config::Config;
use crate::input::ScanInput;
use anyhow::{Context, Result};
use serde::Serialize;
use skilltwin_matcher::{SkillCatalog, SkillMatcher};
use skilltwin_readiness::CareerMap;
use skilltwin_types::{Detection, SkillTwin};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outcome of scanning one input
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Skills {
        source: String,
        skills: Vec<Detection>,
    },
    Twin {
        source: String,
        #[serde(flatten)]
        twin: SkillTwin,
    },
    Failed {
        source: String,
        error: String,
    },
}

impl Report {
    pub fn is_failure(&self) -> bool {
        matches!(self, Report::Failed { .. })
    }
}

/// Career goal plus the profiles it is assessed against
struct RoleTarget {
    goal: String,
    career_map: CareerMap,
}

/// Scan service - loads the catalog once and scans every input concurrently
pub struct ScanService {
    config: Config,
}

impl ScanService {
    /// Create a new scan service
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan all inputs, returning one report per input in input order
    ///
    /// Fails only when the skill catalog cannot be loaded.
    pub async fn run(self, inputs: Vec<ScanInput>, role: Option<String>) -> Result<Vec<Report>> {
        info!("Starting SkillTwin scan of {} inputs", inputs.len());

        let matcher = Arc::new(self.build_matcher()?);

        let target = role.map(|goal| {
            Arc::new(RoleTarget {
                career_map: self.load_career_map(matcher.catalog()),
                goal,
            })
        });

        let reports = scan_all(matcher, target, inputs).await;

        let failed = reports.iter().filter(|r| r.is_failure()).count();
        info!(
            "Scan finished: {} succeeded, {} failed",
            reports.len() - failed,
            failed
        );
        Ok(reports)
    }

    /// Load the catalog; any failure here is fatal
    fn build_matcher(&self) -> Result<SkillMatcher> {
        let paths = self.config.data.catalog_paths();
        let catalog = SkillCatalog::load(&paths).with_context(|| {
            format!(
                "Cannot load skill catalog from {:?}",
                self.config.data.dir
            )
        })?;

        Ok(SkillMatcher::new(catalog).with_section_phrases(&self.config.matcher.section_phrases))
    }

    /// Load role profiles, falling back to the built-in map
    fn load_career_map(&self, catalog: &SkillCatalog) -> CareerMap {
        let path = self.config.data.roles_path();
        let career_map = match CareerMap::load(&path) {
            Ok(map) => map,
            Err(e) => {
                warn!("Using built-in role profiles: {:#}", e);
                CareerMap::builtin()
            }
        };

        for (role, skill) in career_map.unknown_skills(|skill| catalog.contains(skill)) {
            warn!(
                "Role '{}' expects '{}', which the vocabulary cannot detect",
                role, skill
            );
        }

        career_map
    }
}

async fn scan_all(
    matcher: Arc<SkillMatcher>,
    target: Option<Arc<RoleTarget>>,
    inputs: Vec<ScanInput>,
) -> Vec<Report> {
    let handles: Vec<_> = inputs
        .into_iter()
        .map(|input| {
            let source = input.label();
            let task = tokio::spawn(scan_one(Arc::clone(&matcher), target.clone(), input));
            (source, task)
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for (source, task) in handles {
        let report = match task.await {
            Ok(report) => report,
            Err(e) => {
                error!("Scan task for {} failed: {}", source, e);
                Report::Failed {
                    source,
                    error: e.to_string(),
                }
            }
        };
        reports.push(report);
    }

    reports
}

async fn scan_one(
    matcher: Arc<SkillMatcher>,
    target: Option<Arc<RoleTarget>>,
    input: ScanInput,
) -> Report {
    let source = input.label();

    let text = match input.read().await {
        Ok(text) => text,
        Err(e) => {
            error!("Skipping {}: {:#}", source, e);
            return Report::Failed {
                source,
                error: format!("{:#}", e),
            };
        }
    };

    // Matching is CPU bound, keep it off the async workers
    let matched = tokio::task::spawn_blocking(move || {
        let skills = matcher.match_skills(&text);
        (text, skills)
    })
    .await;

    let (text, skills) = match matched {
        Ok(result) => result,
        Err(e) => {
            error!("Matching {} failed: {}", source, e);
            return Report::Failed {
                source,
                error: e.to_string(),
            };
        }
    };

    info!("Detected {} skills in {}", skills.len(), source);
    debug!(
        "Skills in {}: {:?}",
        source,
        skills.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
    );

    match target {
        Some(target) => {
            let assessment = target.career_map.assess(&target.goal, &skills);
            Report::Twin {
                source,
                twin: SkillTwin::new(
                    input.proof_source(),
                    &text,
                    skills,
                    assessment.readiness,
                    assessment.growth,
                ),
            }
        }
        None => Report::Skills { source, skills },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skilltwin_types::{ProofSource, ReadinessStatus};
    use std::path::PathBuf;

    fn matcher() -> Arc<SkillMatcher> {
        let catalog = SkillCatalog::from_sources(
            "javascript\nnode\nexpress\nmongodb\nredis\n",
            r#"{"node.js": "node", "mongoose": "mongodb"}"#,
            r#"{"database": ["mongodb", "redis"]}"#,
        )
        .unwrap();
        Arc::new(SkillMatcher::new(catalog))
    }

    #[tokio::test]
    async fn test_scan_all_keeps_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let readme = dir.path().join("README.md");
        std::fs::write(&readme, "# Tech Stack\nRedis and Node.js").unwrap();

        let inputs = vec![
            ScanInput::Inline("Express with mongoose".to_string()),
            ScanInput::File(dir.path().join("missing.txt")),
            ScanInput::File(readme),
            ScanInput::File(PathBuf::from("photo.png")),
        ];

        let reports = scan_all(matcher(), None, inputs).await;
        assert_eq!(reports.len(), 4);

        match &reports[0] {
            Report::Skills { source, skills } => {
                assert_eq!(source, "<content>");
                let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["express", "mongodb"]);
            }
            other => panic!("unexpected report: {other:?}"),
        }

        assert!(reports[1].is_failure());

        match &reports[2] {
            Report::Skills { skills, .. } => {
                assert_eq!(skills.len(), 2);
                assert!(skills.iter().all(|s| s.important));
            }
            other => panic!("unexpected report: {other:?}"),
        }

        assert!(reports[3].is_failure());
    }

    #[tokio::test]
    async fn test_scan_with_role_builds_twin() {
        let target = Arc::new(RoleTarget {
            goal: "Backend Developer".to_string(),
            career_map: CareerMap::builtin(),
        });
        let inputs = vec![ScanInput::Inline(
            "JavaScript, Node.js, Express and MongoDB".to_string(),
        )];

        let reports = scan_all(matcher(), Some(target), inputs).await;
        let Report::Twin { twin, .. } = &reports[0] else {
            panic!("expected a skill twin, got {:?}", reports[0]);
        };

        assert_eq!(twin.proof_source, ProofSource::Text);
        assert_eq!(twin.career_readiness.percentage, 100);
        assert_eq!(twin.career_readiness.status, ReadinessStatus::Ready);
        assert_eq!(twin.skills.len(), 4);

        let json = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(json["source"], "<content>");
        assert_eq!(json["careerReadiness"]["percentage"], 100);
    }

    #[test]
    fn test_failed_report_serialization() {
        let report = Report::Failed {
            source: "a.txt".to_string(),
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({"source": "a.txt", "error": "boom"}));
    }
}
