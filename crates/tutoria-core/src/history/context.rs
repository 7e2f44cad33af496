//! Read-only analytics over a learner's recent sessions.

use serde::Serialize;

use super::model::SessionRecord;

/// Sessions scoring strictly below this percentage mark a weakness.
pub const WEAKNESS_THRESHOLD: f64 = 60.0;
/// Sessions scoring at or above this percentage mark a strength.
pub const STRENGTH_THRESHOLD: f64 = 80.0;

/// Normalized view over historical sessions.
///
/// The derived views are computed once in [`SessionContext::new`] and never
/// change afterwards. Each view is deduplicated and keeps first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionContext {
    sessions: Vec<SessionRecord>,
    topics: Vec<String>,
    weaknesses: Vec<String>,
    strengths: Vec<String>,
}

impl SessionContext {
    pub fn new(sessions: Vec<SessionRecord>) -> Self {
        let topics = unique(sessions.iter().map(|s| s.topic.as_str()));
        let weaknesses = unique(
            sessions
                .iter()
                .filter(|s| s.percentage().is_some_and(|p| p < WEAKNESS_THRESHOLD))
                .map(|s| s.topic.as_str()),
        );
        let strengths = unique(
            sessions
                .iter()
                .filter(|s| s.percentage().is_some_and(|p| p >= STRENGTH_THRESHOLD))
                .map(|s| s.topic.as_str()),
        );

        Self {
            sessions,
            topics,
            weaknesses,
            strengths,
        }
    }

    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn weaknesses(&self) -> &[String] {
        &self.weaknesses
    }

    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    pub fn has_weaknesses(&self) -> bool {
        !self.weaknesses.is_empty()
    }

    pub fn is_strength(&self, topic: &str) -> bool {
        self.strengths.iter().any(|s| s == topic)
    }

    /// The `count` most recent sessions, newest first.
    ///
    /// Equal timestamps keep their input order.
    pub fn recent(&self, count: usize) -> Vec<&SessionRecord> {
        let mut ordered: Vec<&SessionRecord> = self.sessions.iter().collect();
        ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        ordered.truncate(count);
        ordered
    }

    /// Known topics containing at least one whitespace token of `topic`.
    ///
    /// A blank topic has no tokens and therefore relates to nothing.
    pub fn find_related_topics(&self, topic: &str) -> Vec<String> {
        let tokens: Vec<String> = topic.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        self.topics
            .iter()
            .filter(|known| {
                let known = known.to_lowercase();
                tokens.iter().any(|token| known.contains(token.as_str()))
            })
            .cloned()
            .collect()
    }
}

fn unique<'a>(topics: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for topic in topics {
        if !seen.iter().any(|t| t == topic) {
            seen.push(topic.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::collections::BTreeSet;

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn as_set(items: &[String]) -> BTreeSet<String> {
        items.iter().cloned().collect()
    }

    #[test]
    fn test_weaknesses_and_strengths() {
        let context = SessionContext::new(vec![
            SessionRecord::new("algebra", 50.0, at(0)),
            SessionRecord::new("geometry", 90.0, at(1)),
        ]);

        assert_eq!(context.weaknesses(), ["algebra".to_string()]);
        assert_eq!(context.strengths(), ["geometry".to_string()]);
        assert_eq!(context.topics().len(), 2);
    }

    #[test]
    fn test_thresholds_are_exclusive_and_inclusive() {
        let context = SessionContext::new(vec![
            SessionRecord::new("a", 60.0, at(0)),
            SessionRecord::new("b", 59.9, at(1)),
            SessionRecord::new("c", 80.0, at(2)),
            SessionRecord::new("d", 79.9, at(3)),
        ]);

        assert_eq!(context.weaknesses(), ["b".to_string()]);
        assert_eq!(context.strengths(), ["c".to_string()]);
    }

    #[test]
    fn test_derived_views_are_subsets_and_disjoint() {
        let context = SessionContext::new(vec![
            SessionRecord::new("algebra", 30.0, at(0)),
            SessionRecord::new("algebra", 45.0, at(1)),
            SessionRecord::new("optics", 85.0, at(2)),
            SessionRecord::new("waves", 70.0, at(3)),
        ]);

        let topics = as_set(context.topics());
        assert!(as_set(context.weaknesses()).is_subset(&topics));
        assert!(as_set(context.strengths()).is_subset(&topics));
        assert!(
            as_set(context.weaknesses())
                .intersection(&as_set(context.strengths()))
                .next()
                .is_none()
        );
        // Duplicated weak topic is reported once
        assert_eq!(context.weaknesses().len(), 1);
    }

    #[test]
    fn test_derived_sets_ignore_input_order() {
        let sessions = vec![
            SessionRecord::new("algebra", 30.0, at(0)),
            SessionRecord::new("optics", 85.0, at(1)),
            SessionRecord::new("waves", 70.0, at(2)),
        ];
        let mut reversed = sessions.clone();
        reversed.reverse();

        let forward = SessionContext::new(sessions);
        let backward = SessionContext::new(reversed);

        assert_eq!(as_set(forward.topics()), as_set(backward.topics()));
        assert_eq!(as_set(forward.weaknesses()), as_set(backward.weaknesses()));
        assert_eq!(as_set(forward.strengths()), as_set(backward.strengths()));
    }

    #[test]
    fn test_unscored_sessions_count_as_topics_only() {
        let mut record = SessionRecord::new("vectors", 0.0, at(0));
        record.score = None;
        let context = SessionContext::new(vec![record]);

        assert_eq!(context.topics(), ["vectors".to_string()]);
        assert!(context.weaknesses().is_empty());
    }

    #[test]
    fn test_recent_sorted_newest_first_and_bounded() {
        let context = SessionContext::new(vec![
            SessionRecord::new("old", 50.0, at(0)),
            SessionRecord::new("newest", 50.0, at(10)),
            SessionRecord::new("middle", 50.0, at(5)),
        ]);

        let recent = context.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].topic, "newest");
        assert_eq!(recent[1].topic, "middle");

        assert!(context.recent(0).is_empty());
        assert_eq!(context.recent(10).len(), 3);
        // The stored order is untouched
        assert_eq!(context.sessions()[0].topic, "old");
    }

    #[test]
    fn test_recent_ties_keep_input_order() {
        let context = SessionContext::new(vec![
            SessionRecord::new("first", 50.0, at(3)),
            SessionRecord::new("second", 50.0, at(3)),
            SessionRecord::new("third", 50.0, at(3)),
        ]);

        let topics: Vec<_> = context.recent(3).iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(topics, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_find_related_topics_by_token() {
        let context = SessionContext::new(vec![
            SessionRecord::new("Linear equations", 70.0, at(0)),
            SessionRecord::new("quadratic functions", 70.0, at(1)),
            SessionRecord::new("Newton's laws", 70.0, at(2)),
        ]);

        assert_eq!(
            context.find_related_topics("systems of linear EQUATIONS"),
            vec!["Linear equations".to_string()]
        );
        assert_eq!(
            context.find_related_topics("function composition"),
            vec!["quadratic functions".to_string()]
        );
    }

    #[test]
    fn test_find_related_topics_blank_matches_nothing() {
        let context = SessionContext::new(vec![SessionRecord::new("algebra", 70.0, at(0))]);

        assert!(context.find_related_topics("").is_empty());
        assert!(context.find_related_topics("   \t ").is_empty());
    }
}
