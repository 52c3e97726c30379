//! Regression fixtures pinning each exclusion policy's offsets.

use std::collections::HashMap;

use serde::Deserialize;
use tsx_error::TsError;
use tsx_ext_matchlocs::{ExclusionPolicy, ExtractorConfig, MatchStream, collect_matches};
use tsx_types::{MatchLocation, WordEntry};

#[derive(Debug, Deserialize)]
struct FixtureFile {
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    words: Vec<WordEntry>,
    expected: HashMap<String, Vec<(i32, i32)>>,
    /// Policies under which the words are malformed.
    #[serde(default)]
    rejected: Vec<ExclusionPolicy>,
}

impl Case {
    fn accepted_policies(&self) -> impl Iterator<Item = ExclusionPolicy> + '_ {
        ExclusionPolicy::ALL
            .into_iter()
            .filter(|p| !self.rejected.contains(p))
    }
}

fn load_cases() -> Vec<Case> {
    let raw = include_str!("fixtures/exclusion_policy.json");
    let file: FixtureFile = serde_json::from_str(raw).expect("fixture parses");
    file.cases
}

fn expected_for(case: &Case, policy: ExclusionPolicy) -> Vec<MatchLocation> {
    case.expected
        .get(policy.name())
        .unwrap_or_else(|| panic!("case '{}' has no expectation for {policy}", case.name))
        .iter()
        .copied()
        .map(MatchLocation::from)
        .collect()
}

#[test]
fn fixtures_cover_every_policy() {
    for case in load_cases() {
        for key in case.expected.keys() {
            assert!(
                key.parse::<ExclusionPolicy>().is_ok(),
                "case '{}' names unknown policy {key}",
                case.name
            );
        }
        for policy in &case.rejected {
            assert!(!case.expected.contains_key(policy.name()), "{}", case.name);
        }
        assert_eq!(
            case.expected.len() + case.rejected.len(),
            ExclusionPolicy::ALL.len(),
            "{}",
            case.name
        );
    }
}

#[test]
fn batch_matches_fixtures() {
    for case in load_cases() {
        for policy in case.accepted_policies() {
            let config = ExtractorConfig::new(policy);
            let got = collect_matches(&case.words, &config).unwrap();
            assert_eq!(got, expected_for(&case, policy), "{} under {policy}", case.name);
        }
    }
}

#[test]
fn streaming_matches_fixtures() {
    for case in load_cases() {
        for policy in case.accepted_policies() {
            let stream = MatchStream::new(case.words.clone(), policy).unwrap();
            let got: Vec<MatchLocation> = stream.collect();
            assert_eq!(got, expected_for(&case, policy), "{} under {policy}", case.name);
        }
    }
}

#[test]
fn rejected_fixtures_fail_in_both_modes() {
    for case in load_cases() {
        for &policy in &case.rejected {
            let err = collect_matches(&case.words, &ExtractorConfig::new(policy)).unwrap_err();
            assert!(matches!(err, TsError::MalformedWord { .. }), "{}", case.name);
            assert!(MatchStream::new(case.words.clone(), policy).is_err(), "{}", case.name);
        }
    }
}

#[test]
fn default_policy_is_canonical() {
    let case = load_cases()
        .into_iter()
        .next()
        .expect("at least one fixture");
    let got = collect_matches(&case.words, &ExtractorConfig::default()).unwrap();
    assert_eq!(
        got,
        vec![MatchLocation::new(5, 3), MatchLocation::new(12, 6)]
    );
}

#[test]
fn policy_from_control_string() {
    let case = load_cases()
        .into_iter()
        .next()
        .expect("at least one fixture");
    let config = ExtractorConfig::parse("policy=hold-repeated, initial_capacity=1").unwrap();
    let got = collect_matches(&case.words, &config).unwrap();
    assert_eq!(got, expected_for(&case, ExclusionPolicy::HoldRepeated));
}
