//! Matching against the catalog shipped in `data/`

use skilltwin_matcher::{CatalogPaths, SkillCatalog, SkillMatcher};
use skilltwin_types::Tier;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

fn bundled_matcher() -> SkillMatcher {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let catalog =
        SkillCatalog::load(&CatalogPaths::in_dir(&data_dir)).expect("bundled catalog loads");
    SkillMatcher::new(catalog)
}

const README: &str = "\
# Campus Connect

A mentoring platform for students.

## Tech Stack

- React and Tailwind on the frontend
- Node.js with Express
- MongoDB through Mongoose
- JWT auth, passwords hashed with bcrypt

## Getting started

Run `npm install` and start the dev server.
";

#[test]
fn test_readme_detection() {
    let detections = bundled_matcher().match_skills(README);
    let names: Vec<_> = detections.iter().map(|d| d.name.as_str()).collect();

    for expected in ["react", "tailwind", "node", "express", "mongodb", "jwt", "bcrypt"] {
        assert!(names.contains(&expected), "{expected} missing from {names:?}");
    }

    // Every skill sits under a heading, so all of them are boosted
    assert!(detections.iter().all(|d| d.important));

    let mongodb = detections.iter().find(|d| d.name == "mongodb").unwrap();
    assert_eq!(mongodb.category, "database");
    assert_eq!(mongodb.tier, Tier::High);
}

#[test]
fn test_results_are_vocabulary_entries() {
    let matcher = bundled_matcher();
    let text = "Golang, k8s, sklearn and some Agile ceremonies; also ml with py";
    let detections = matcher.match_skills(text);

    assert!(!detections.is_empty());
    for detection in &detections {
        assert!(matcher.catalog().contains(&detection.name));
    }

    let names: Vec<_> = detections.iter().map(|d| d.name.as_str()).collect();
    assert!(names.contains(&"kubernetes"));
    assert!(names.contains(&"scikit learn"));
    assert!(names.contains(&"machine learning"));
    assert!(names.contains(&"python"));

    let agile = detections.iter().find(|d| d.name == "agile").unwrap();
    assert_eq!(agile.category, "other");
}

#[test]
fn test_pair_beats_single_word() {
    let detections = bundled_matcher().match_skills("Shipped two apps in React Native");
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].name, "react native");
}

#[test]
fn test_concurrent_matching() {
    let matcher = Arc::new(bundled_matcher());
    let expected = matcher.match_skills(README);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || matcher.match_skills(README))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
