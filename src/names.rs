use std::time::Duration;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Cache-hit augmentation: how many live bank questions get attached to a
// cached lesson response.
pub const EXTRA_QUESTION_COUNT: usize = 3;

// Seed practice problems bundled into a freshly generated lesson.
pub const SEED_QUESTION_COUNT: usize = 3;

// Question bank maintenance.
pub const DEFAULT_BANK_TARGET: usize = 10;
pub const ENHANCE_BATCH_LIMIT: usize = 5;
pub const ENHANCE_QUALITY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_ENHANCED_QUALITY: f64 = 0.8;

// "Needs attention" rollup threshold. Distinct from the enhancement
// threshold on purpose.
pub const ATTENTION_QUALITY_THRESHOLD: f64 = 0.7;

// Quality assigned to content reviewed against an empty pool and to fresh
// questions that carry no score of their own.
pub const UNSCORED_QUALITY: f64 = 0.5;

// Bound on persistent-store reads in the request path; past this the read
// degrades to an in-memory default instead of hanging the response.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

// Sampling temperature for generation. Top-up slots step up from the base
// so repeated requests against one backend don't collapse into duplicates.
pub const BASE_TEMPERATURE: f64 = 0.7;
pub const TEMPERATURE_STEP: f64 = 0.05;
pub const MAX_TEMPERATURE: f64 = 1.2;

// A topic counts as completed once mastery reaches this level over at
// least this many attempts.
pub const MASTERY_COMPLETED_LEVEL: i64 = 80;
pub const MASTERY_MIN_ATTEMPTS: i64 = 10;

pub const DEFAULT_MARKS: u32 = 5;
