//! Pure statistics derived from one fetched resource bundle.
//!
//! Nothing here performs I/O or keeps state between calls; every value is
//! recomputed from its inputs on each request.

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::github::models::{Issue, Repository, WeeklyCommits};

pub const TOP_LANGUAGES_LIMIT: usize = 5;
pub const RECENT_ACTIVITY_LIMIT: usize = 10;
pub const COMMIT_ACTIVITY_WEEKS: usize = 12;
pub const ISSUE_SAMPLE_LIMIT: usize = 100;

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("Language byte counts sum to zero across {languages} languages")]
    ZeroByteTotal { languages: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

/// Percentage of repository bytes per language, in upstream order.
/// Serializes as a JSON object `{language: percent}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageShares(pub Vec<(String, f64)>);

impl Serialize for LanguageShares {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(language, pct)| (language, pct)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekActivity {
    pub week: String,
    pub commits: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueCounts {
    pub open: usize,
    pub closed: usize,
}

pub fn total_stars(repos: &[Repository]) -> u64 {
    repos.iter().map(|r| r.stargazers_count).sum()
}

/// Counts repositories per primary language and keeps the five most common.
///
/// Repositories without a language are skipped. Ties keep the order in which a
/// language first appeared in `repos`.
pub fn top_languages(repos: &[Repository]) -> Vec<LanguageCount> {
    let mut counts: Vec<LanguageCount> = Vec::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        match counts.iter_mut().find(|c| c.language == language) {
            Some(entry) => entry.count += 1,
            None => counts.push(LanguageCount {
                language: language.to_string(),
                count: 1,
            }),
        }
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_LANGUAGES_LIMIT);
    counts
}

/// `round(bytes / total * 100, 2)` per language.
///
/// An empty map yields no shares. A non-empty map whose byte total is zero is an
/// error rather than a row of zero percentages.
pub fn language_shares(byte_counts: &[(String, u64)]) -> Result<LanguageShares, AggregateError> {
    if byte_counts.is_empty() {
        return Ok(LanguageShares::default());
    }
    let total: u64 = byte_counts.iter().map(|(_, bytes)| bytes).sum();
    if total == 0 {
        return Err(AggregateError::ZeroByteTotal {
            languages: byte_counts.len(),
        });
    }
    Ok(LanguageShares(
        byte_counts
            .iter()
            .map(|(language, bytes)| {
                let pct = *bytes as f64 / total as f64 * 100.0;
                (language.clone(), round2(pct))
            })
            .collect(),
    ))
}

/// The last twelve weeks of the series, oldest first, relabeled `Week 1..Week n`.
pub fn commit_activity(series: &[WeeklyCommits]) -> Vec<WeekActivity> {
    let start = series.len().saturating_sub(COMMIT_ACTIVITY_WEEKS);
    series[start..]
        .iter()
        .enumerate()
        .map(|(i, w)| WeekActivity {
            week: format!("Week {}", i + 1),
            commits: w.total,
        })
        .collect()
}

/// Open/closed partition over the first hundred issues.
pub fn issue_counts(issues: &[Issue]) -> IssueCounts {
    issues
        .iter()
        .take(ISSUE_SAMPLE_LIMIT)
        .fold(IssueCounts::default(), |mut acc, issue| {
            match issue.state.as_str() {
                "open" => acc.open += 1,
                "closed" => acc.closed += 1,
                _ => {}
            }
            acc
        })
}

/// The ten most recent events, untouched.
pub fn recent_activity(events: &[Value]) -> Vec<Value> {
    events.iter().take(RECENT_ACTIVITY_LIMIT).cloned().collect()
}

/// Two-place rounding with exact ties going to the even neighbour.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo(stars: u64, language: Option<&str>) -> Repository {
        Repository {
            stargazers_count: stars,
            language: language.map(String::from),
            ..Default::default()
        }
    }

    fn weeks(totals: impl IntoIterator<Item = u64>) -> Vec<WeeklyCommits> {
        totals
            .into_iter()
            .map(|total| WeeklyCommits { total })
            .collect()
    }

    fn issue(state: &str) -> Issue {
        Issue {
            state: state.to_string(),
        }
    }

    #[test]
    fn test_total_stars_sums_all_repositories() {
        let repos = vec![repo(5, None), repo(3, Some("Go")), repo(0, Some("Rust"))];
        assert_eq!(total_stars(&repos), 8);
    }

    #[test]
    fn test_total_stars_empty_is_zero() {
        assert_eq!(total_stars(&[]), 0);
    }

    #[test]
    fn test_top_languages_ranked_and_skips_missing() {
        let repos = vec![
            repo(5, Some("Python")),
            repo(3, Some("Go")),
            repo(0, Some("Python")),
            repo(1, None),
        ];
        let top = top_languages(&repos);
        assert_eq!(
            top,
            vec![
                LanguageCount { language: "Python".into(), count: 2 },
                LanguageCount { language: "Go".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_top_languages_ties_keep_first_appearance() {
        let repos = vec![
            repo(0, Some("Ruby")),
            repo(0, Some("Go")),
            repo(0, Some("Rust")),
            repo(0, Some("Go")),
            repo(0, Some("Ruby")),
        ];
        let names: Vec<_> = top_languages(&repos).into_iter().map(|c| c.language).collect();
        assert_eq!(names, vec!["Ruby", "Go", "Rust"]);
    }

    #[test]
    fn test_top_languages_capped_at_five_and_non_increasing() {
        let langs = ["A", "B", "B", "C", "D", "E", "F", "F", "F", "G"];
        let repos: Vec<_> = langs.iter().map(|l| repo(0, Some(*l))).collect();
        let top = top_languages(&repos);
        assert_eq!(top.len(), TOP_LANGUAGES_LIMIT);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(top[0].language, "F");
        assert_eq!(top[1].language, "B");
    }

    #[test]
    fn test_language_shares_round_to_two_places() {
        let shares = language_shares(&[
            ("Rust".into(), 2),
            ("Python".into(), 1),
        ])
        .unwrap();
        assert_eq!(
            shares.0,
            vec![("Rust".to_string(), 66.67), ("Python".to_string(), 33.33)]
        );
    }

    #[test]
    fn test_language_shares_exact_ties_round_to_even() {
        // 1/32 is exactly 3.125%, 31/32 exactly 96.875%
        let shares = language_shares(&[("A".into(), 1), ("B".into(), 31)]).unwrap();
        assert_eq!(
            shares.0,
            vec![("A".to_string(), 3.12), ("B".to_string(), 96.88)]
        );
    }

    #[test]
    fn test_language_shares_sum_close_to_hundred() {
        let counts = vec![
            ("Rust".to_string(), 123_457),
            ("Shell".to_string(), 9_871),
            ("Dockerfile".to_string(), 333),
            ("Makefile".to_string(), 77),
            ("TypeScript".to_string(), 45_012),
        ];
        let shares = language_shares(&counts).unwrap();
        let sum: f64 = shares.0.iter().map(|(_, pct)| pct).sum();
        assert!((sum - 100.0).abs() <= 0.1, "sum was {sum}");
    }

    #[test]
    fn test_language_shares_zero_total_fails() {
        let err = language_shares(&[("Rust".into(), 0), ("C".into(), 0)]).unwrap_err();
        assert_eq!(err, AggregateError::ZeroByteTotal { languages: 2 });
    }

    #[test]
    fn test_language_shares_empty_map_is_empty() {
        assert!(language_shares(&[]).unwrap().0.is_empty());
    }

    #[test]
    fn test_language_shares_serialize_as_ordered_object() {
        let shares = language_shares(&[("Zig".into(), 1), ("Ada".into(), 3)]).unwrap();
        let value = serde_json::to_value(&shares).unwrap();
        assert_eq!(value, json!({ "Zig": 25.0, "Ada": 75.0 }));
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Zig", "Ada"]);
    }

    #[test]
    fn test_commit_activity_keeps_last_twelve_weeks() {
        let series = weeks(1..=52);
        let activity = commit_activity(&series);
        assert_eq!(activity.len(), COMMIT_ACTIVITY_WEEKS);
        for (i, week) in activity.iter().enumerate() {
            assert_eq!(week.week, format!("Week {}", i + 1));
        }
        assert_eq!(activity[0].commits, 41);
        assert_eq!(activity[11].commits, 52);
    }

    #[test]
    fn test_commit_activity_short_series_relabeled_in_full() {
        let activity = commit_activity(&weeks([4, 0, 7]));
        assert_eq!(
            activity,
            vec![
                WeekActivity { week: "Week 1".into(), commits: 4 },
                WeekActivity { week: "Week 2".into(), commits: 0 },
                WeekActivity { week: "Week 3".into(), commits: 7 },
            ]
        );
        assert!(commit_activity(&[]).is_empty());
    }

    #[test]
    fn test_issue_counts_partition() {
        let issues = vec![issue("open"), issue("closed"), issue("open")];
        assert_eq!(issue_counts(&issues), IssueCounts { open: 2, closed: 1 });
        assert_eq!(issue_counts(&[]), IssueCounts::default());
    }

    #[test]
    fn test_issue_counts_capped_at_first_hundred() {
        let mut issues: Vec<_> = (0..100).map(|_| issue("closed")).collect();
        issues.extend((0..20).map(|_| issue("open")));
        assert_eq!(issue_counts(&issues), IssueCounts { open: 0, closed: 100 });
    }

    #[test]
    fn test_recent_activity_first_ten_unmodified() {
        let events: Vec<Value> = (0..15).map(|i| json!({ "id": i.to_string() })).collect();
        let recent = recent_activity(&events);
        assert_eq!(recent.len(), RECENT_ACTIVITY_LIMIT);
        assert_eq!(recent[0], json!({ "id": "0" }));
        assert_eq!(recent[9], json!({ "id": "9" }));
    }
}
