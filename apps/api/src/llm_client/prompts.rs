// Shared prompt fragments.
// Each feature module keeps its own prompts.rs; only cross-cutting text lives here.

/// Instruction that pins the reply to a single JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with one valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies. \
    Write URLs as plain strings, never as markdown links.";

/// Instruction against invented facts about the applicant.
pub const NO_FABRICATION_INSTRUCTION: &str = "Use only the information supplied below. \
    Do NOT invent employers, dates, degrees, grades or achievements. \
    Omit anything the supplied information does not support.";

/// Instruction against inline reference markers in free text.
pub const NO_CITATIONS_INSTRUCTION: &str =
    "Do NOT add citation markers such as [1] or a list of sources.";
