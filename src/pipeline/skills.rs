use std::collections::HashMap;

use super::{CleaningStep, StepResult};
use crate::constants::{REQUIRED_SKILLS, SKILLS_LIST, SKILL_COLUMN_PREFIX};
use crate::domain::{Cell, Dataset};

/// Split raw skills text into trimmed, non-empty tokens. `|` is treated as a
/// comma; order and duplicates are preserved.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.replace('|', ",")
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Indicator column name for a skill: lower-cased, spaces to underscores,
/// `+` spelled out, prefixed with `skill_`.
pub fn skill_column_name(skill: &str) -> String {
    format!(
        "{}{}",
        SKILL_COLUMN_PREFIX,
        skill.to_lowercase().replace(' ', "_").replace('+', "plus")
    )
}

/// Derives `skills_list` from `required_skills`
pub struct SkillListStep;

impl CleaningStep for SkillListStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        let source_present = dataset.has_column(REQUIRED_SKILLS);
        let lists: Vec<Cell> = match dataset.column(REQUIRED_SKILLS) {
            Some(raw) => raw
                .map(|cell| Cell::List(cell.as_text().map(parse_skills).unwrap_or_default()))
                .collect(),
            None => vec![Cell::List(Vec::new()); dataset.len()],
        };

        let tokens: usize = lists
            .iter()
            .filter_map(Cell::as_list)
            .map(<[String]>::len)
            .sum();
        dataset.set_column(SKILLS_LIST, lists);

        let result = StepResult::new(format!("extracted {} skill tokens", tokens));
        if source_present {
            result
        } else {
            result.with_metadata("note", format!("column '{}' not present", REQUIRED_SKILLS))
        }
    }

    fn step_name(&self) -> &'static str {
        "skill_extraction"
    }
}

/// Skill frequencies across the whole dataset, most frequent first. Equal
/// counts keep the order in which the skills were first encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRanking {
    ranked: Vec<(String, usize)>,
}

impl SkillRanking {
    /// Aggregate pass: count every token of every list.
    pub fn from_lists<'a>(lists: impl IntoIterator<Item = &'a [String]>) -> Self {
        let mut position: HashMap<&'a str, usize> = HashMap::new();
        let mut counts: Vec<(&'a str, usize)> = Vec::new();

        for list in lists {
            for skill in list {
                match position.get(skill.as_str()) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        position.insert(skill.as_str(), counts.len());
                        counts.push((skill.as_str(), 1));
                    }
                }
            }
        }

        // Stable sort keeps first-seen order among ties
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            ranked: counts
                .into_iter()
                .map(|(skill, count)| (skill.to_string(), count))
                .collect(),
        }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        match dataset.column(SKILLS_LIST) {
            Some(cells) => Self::from_lists(cells.filter_map(Cell::as_list)),
            None => Self { ranked: Vec::new() },
        }
    }

    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Adds a 0/1 indicator column for each of the globally most frequent skills
pub struct SkillIndicatorStep {
    top_n: usize,
}

impl SkillIndicatorStep {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl CleaningStep for SkillIndicatorStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        if !dataset.has_column(SKILLS_LIST) {
            return StepResult::skipped(SKILLS_LIST);
        }

        let ranking = SkillRanking::from_dataset(dataset);
        let top = ranking.top(self.top_n);
        let mut result = StepResult::new(format!(
            "derived {} indicator columns from {} distinct skills",
            top.len(),
            ranking.len()
        ));

        for (rank, (skill, count)) in top.iter().enumerate() {
            let indicators: Vec<Cell> = dataset
                .column(SKILLS_LIST)
                .map(|cells| {
                    cells
                        .map(|cell| {
                            let present = cell
                                .as_list()
                                .is_some_and(|list| list.iter().any(|s| s == skill));
                            Cell::Integer(i64::from(present))
                        })
                        .collect()
                })
                .unwrap_or_default();

            dataset.set_column(&skill_column_name(skill), indicators);
            result = result.with_metadata(format!("rank_{}", rank + 1), format!("{} ({})", skill, count));
        }

        result
    }

    fn step_name(&self) -> &'static str {
        "skill_indicators"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_skills_treats_pipe_as_comma() {
        assert_eq!(parse_skills("Python, SQL|Excel"), skills(&["Python", "SQL", "Excel"]));
        assert_eq!(parse_skills(" , Python,,|  "), skills(&["Python"]));
        assert_eq!(parse_skills("SQL, SQL"), skills(&["SQL", "SQL"]));
        assert!(parse_skills("").is_empty());
    }

    #[test]
    fn test_skill_column_name() {
        assert_eq!(skill_column_name("C++"), "skill_cplusplus");
        assert_eq!(skill_column_name("Machine Learning"), "skill_machine_learning");
        assert_eq!(skill_column_name("UX/UI Design"), "skill_ux/ui_design");
    }

    #[test]
    fn test_ranking_breaks_ties_by_first_appearance() {
        let lists = vec![
            skills(&["Go", "Rust"]),
            skills(&["Python", "Rust"]),
            skills(&["Python", "Go"]),
            skills(&["Java"]),
        ];
        let ranking = SkillRanking::from_lists(lists.iter().map(Vec::as_slice));

        let names: Vec<&str> = ranking.top(10).iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["Go", "Rust", "Python", "Java"]);
        assert_eq!(ranking.top(2).len(), 2);
    }

    #[test]
    fn test_missing_skills_yield_empty_list() {
        let mut dataset = Dataset::from_rows(
            vec!["required_skills".into()],
            vec![vec![Cell::from("Python|SQL")], vec![Cell::Missing]],
        );
        SkillListStep.apply(&mut dataset);

        assert_eq!(
            dataset.get(0, "skills_list"),
            Some(&Cell::List(skills(&["Python", "SQL"])))
        );
        assert_eq!(dataset.get(1, "skills_list"), Some(&Cell::List(Vec::new())));
    }

    #[test]
    fn test_indicators_are_case_sensitive() {
        let mut dataset = Dataset::from_rows(
            vec!["required_skills".into()],
            vec![
                vec![Cell::from("Python")],
                vec![Cell::from("Python, python")],
                vec![Cell::from("SQL")],
            ],
        );
        SkillListStep.apply(&mut dataset);
        SkillIndicatorStep::new(1).apply(&mut dataset);

        assert_eq!(
            dataset.columns(),
            &["required_skills", "skills_list", "skill_python"]
        );
        let values: Vec<&Cell> = dataset.column("skill_python").unwrap().collect();
        assert_eq!(
            values,
            vec![&Cell::Integer(1), &Cell::Integer(1), &Cell::Integer(0)]
        );
    }
}
