//! Column names and fixed parameters shared by the pipeline and the dashboard.

pub const RAW_DATASET_PATH: &str = "data/ai_job_market_insights.csv";
pub const CLEAN_DATASET_PATH: &str = "data/ai_job_market_clean.csv";

// Source columns (after name normalization)
pub const JOB_TITLE: &str = "job_title";
pub const INDUSTRY: &str = "industry";
pub const COMPANY_SIZE: &str = "company_size";
pub const LOCATION: &str = "location";
pub const AI_ADOPTION_LEVEL: &str = "ai_adoption_level";
pub const AUTOMATION_RISK: &str = "automation_risk";
pub const REQUIRED_SKILLS: &str = "required_skills";
pub const REMOTE_FRIENDLY: &str = "remote_friendly";
pub const JOB_GROWTH_PROJECTION: &str = "job_growth_projection";
pub const SALARY_USD: &str = "salary_usd";

// Derived columns
pub const SKILLS_LIST: &str = "skills_list";
pub const ADOPTION_SCORE: &str = "adoption_score";
pub const RISK_SCORE: &str = "risk_score";
pub const GROWTH_SCORE: &str = "growth_score";
pub const SALARY_BAND: &str = "salary_band";
pub const SKILL_COLUMN_PREFIX: &str = "skill_";

/// Columns whose text is trimmed before any other processing
pub const STRING_COLUMNS: [&str; 9] = [
    JOB_TITLE,
    INDUSTRY,
    COMPANY_SIZE,
    LOCATION,
    AI_ADOPTION_LEVEL,
    AUTOMATION_RISK,
    REQUIRED_SKILLS,
    REMOTE_FRIENDLY,
    JOB_GROWTH_PROJECTION,
];

pub const SALARY_MIN: f64 = 10_000.0;
pub const SALARY_MAX: f64 = 500_000.0;
pub const TOP_SKILL_COUNT: usize = 25;

/// Canonical three-level labels, in rank order
pub const LEVELS: [&str; 3] = ["Low", "Medium", "High"];
