//! Role profiles shipped in `data/` against the bundled vocabulary

use skilltwin_matcher::{CatalogPaths, SkillCatalog, SkillMatcher};
use skilltwin_readiness::CareerMap;
use skilltwin_types::ReadinessStatus;
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

#[test]
fn test_bundled_roles_use_vocabulary_skills() {
    let catalog = SkillCatalog::load(&CatalogPaths::in_dir(data_dir())).unwrap();
    let roles = CareerMap::load(&data_dir().join("roles.yaml")).unwrap();

    assert!(roles.len() >= 4);
    let unknown = roles.unknown_skills(|skill| catalog.contains(skill));
    assert!(unknown.is_empty(), "role skills outside the vocabulary: {unknown:?}");
}

#[test]
fn test_readme_to_readiness() {
    let catalog = SkillCatalog::load(&CatalogPaths::in_dir(data_dir())).unwrap();
    let matcher = SkillMatcher::new(catalog);
    let roles = CareerMap::load(&data_dir().join("roles.yaml")).unwrap();

    let skills = matcher.match_skills("## Built with\nNode.js, Express and MongoDB (mongoose).");
    let assessment = roles.assess("backend developer", &skills);

    assert_eq!(assessment.readiness.percentage, 75);
    assert_eq!(assessment.readiness.status, ReadinessStatus::AlmostThere);
    assert_eq!(assessment.growth.thirty_days[0].skills, vec!["javascript"]);
}
