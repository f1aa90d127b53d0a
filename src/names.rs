pub const ROOT_URL: &str = "/";
pub const GENERATE_QUESTIONS_URL: &str = "/api/generate/questions";
pub const GENERATE_STATUS_URL: &str = "/api/generate/status";
pub const SAMPLE_QUESTIONS_URL: &str = "/api/quiz/questions";
pub const SUBMIT_QUIZ_URL: &str = "/api/quiz/submit";

// Quiz batch sizes
pub const MIN_QUESTION_COUNT: i64 = 1;
pub const MAX_QUESTION_COUNT: i64 = 20;
pub const DEFAULT_QUESTION_COUNT: i64 = 10;

// Generation provider defaults
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";
