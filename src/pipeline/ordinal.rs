use super::{CleaningStep, StepResult};
use crate::constants::{
    ADOPTION_SCORE, AI_ADOPTION_LEVEL, AUTOMATION_RISK, GROWTH_SCORE, JOB_GROWTH_PROJECTION,
    RISK_SCORE,
};
use crate::domain::{Cell, Dataset};

/// Maps one categorical column onto a 1-based rank in a derived column
#[derive(Debug, Clone)]
pub struct OrdinalScale {
    pub source: &'static str,
    pub target: &'static str,
    /// Labels in ascending rank order; the first scores 1
    pub labels: &'static [&'static str],
}

impl OrdinalScale {
    /// Exact, case-sensitive lookup. Unknown labels have no score.
    pub fn score(&self, label: &str) -> Option<i64> {
        self.labels
            .iter()
            .position(|l| *l == label)
            .map(|i| i as i64 + 1)
    }
}

pub const ADOPTION_SCALE: OrdinalScale = OrdinalScale {
    source: AI_ADOPTION_LEVEL,
    target: ADOPTION_SCORE,
    labels: &["Low", "Medium", "High"],
};

pub const RISK_SCALE: OrdinalScale = OrdinalScale {
    source: AUTOMATION_RISK,
    target: RISK_SCORE,
    labels: &["Low", "Medium", "High"],
};

pub const GROWTH_SCALE: OrdinalScale = OrdinalScale {
    source: JOB_GROWTH_PROJECTION,
    target: GROWTH_SCORE,
    labels: &["Declining", "Stable", "Growing"],
};

/// Derives numeric scores from ranked categorical columns
pub struct OrdinalScoreStep {
    scales: Vec<OrdinalScale>,
}

impl OrdinalScoreStep {
    pub fn new(scales: Vec<OrdinalScale>) -> Self {
        Self { scales }
    }

    pub fn standard() -> Self {
        Self::new(vec![ADOPTION_SCALE, RISK_SCALE, GROWTH_SCALE])
    }
}

impl CleaningStep for OrdinalScoreStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        let mut result = StepResult::default();
        let mut derived = 0;

        for scale in &self.scales {
            let Some(values) = dataset.column(scale.source) else {
                continue;
            };
            let mut unscored = 0usize;
            let scores: Vec<Cell> = values
                .map(|cell| match cell.as_text().and_then(|label| scale.score(label)) {
                    Some(score) => Cell::Integer(score),
                    None => {
                        unscored += 1;
                        Cell::Missing
                    }
                })
                .collect();

            dataset.set_column(scale.target, scores);
            derived += 1;
            result = result.with_metadata(scale.target, format!("{} without score", unscored));
        }

        result.message = format!("derived {} score columns", derived);
        result
    }

    fn step_name(&self) -> &'static str {
        "ordinal_scores"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_lookup() {
        assert_eq!(ADOPTION_SCALE.score("Low"), Some(1));
        assert_eq!(RISK_SCALE.score("High"), Some(3));
        assert_eq!(GROWTH_SCALE.score("Stable"), Some(2));
        assert_eq!(GROWTH_SCALE.score("stable"), None);
    }

    #[test]
    fn test_unmapped_category_yields_missing_score() {
        let mut dataset = Dataset::from_rows(
            vec!["ai_adoption_level".into(), "job_growth_projection".into()],
            vec![
                vec![Cell::from("High"), Cell::from("Growing")],
                vec![Cell::from("Experimental"), Cell::Missing],
            ],
        );

        OrdinalScoreStep::standard().apply(&mut dataset);

        // risk_score is absent because automation_risk is
        assert_eq!(
            dataset.columns(),
            &["ai_adoption_level", "job_growth_projection", "adoption_score", "growth_score"]
        );
        assert_eq!(dataset.get(0, "adoption_score"), Some(&Cell::Integer(3)));
        assert_eq!(dataset.get(0, "growth_score"), Some(&Cell::Integer(3)));
        assert_eq!(dataset.get(1, "adoption_score"), Some(&Cell::Missing));
        assert_eq!(dataset.get(1, "growth_score"), Some(&Cell::Missing));
    }
}
