//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! Attribute names follow the OTel GenAI conventions so spans from every
//! generation step line up in a trace viewer. `tracing` field names must be
//! literals, so the span macros spell these out; the constants document the
//! vocabulary and carry the operation-name values.

// --- Required attributes ---

/// The name of the operation being performed (e.g., "refine_idea").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The GenAI system (provider) handling the request (e.g., "groq").
pub const GEN_AI_SYSTEM: &str = "gen_ai.system";

// --- Recommended attributes ---

/// The model ID requested (e.g., "llama-3.3-70b-versatile").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The sampling temperature for the request.
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

/// The maximum number of output tokens requested.
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// The finish reason reported by the provider (e.g., "end_turn").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

// --- Operation name values (one per generation step) ---

/// Idea to structured refinement.
pub const OP_REFINE_IDEA: &str = "refine_idea";

/// Three targeted mentor questions.
pub const OP_MENTOR_QUESTIONS: &str = "mentor_questions";

/// Three-sentence feedback on one answer.
pub const OP_MENTOR_FEEDBACK: &str = "mentor_feedback";

/// Four-dimension readiness score.
pub const OP_READINESS_SCORE: &str = "readiness_score";

/// Mentor-informed improved blueprint.
pub const OP_IMPROVED_BLUEPRINT: &str = "improved_blueprint";

/// Prototype artifact for the idea type.
pub const OP_GENERATE_PROTOTYPE: &str = "generate_prototype";

// --- Provider name values ---

/// Groq (OpenAI-compatible) provider identifier.
pub const PROVIDER_GROQ: &str = "groq";

/// Every generation operation, in wizard order.
pub const GENERATION_OPERATIONS: [&str; 6] = [
    OP_REFINE_IDEA,
    OP_MENTOR_QUESTIONS,
    OP_MENTOR_FEEDBACK,
    OP_READINESS_SCORE,
    OP_IMPROVED_BLUEPRINT,
    OP_GENERATE_PROTOTYPE,
];
