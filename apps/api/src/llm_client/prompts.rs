// Shared prompt fragments. Each feature that calls the model defines its own
// prompts.rs alongside it and reuses these.

/// Instruction that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST output a single, valid JSON object \
    (no explanation, no extra text) that matches the EXACT schema provided below. \
    Use only the keys shown and valid JSON types.";

/// Fallback rule for fields the model cannot fill.
pub const EMPTY_DEFAULTS_INSTRUCTION: &str = "If information is unavailable, return an empty \
    array or reasonable default (e.g. 0 for match_score).";
