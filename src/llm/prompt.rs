/// System prompt: conservative, safety-first framing.
pub const SYSTEM_PROMPT: &str =
    "You are a conservative, safety-first medical assistant for educational purposes.";

/// Build the user prompt requesting structured JSON for a symptom description.
pub fn triage_prompt(symptoms: &str) -> String {
    format!(
        r#"The user gave these symptoms:
"""{symptoms}"""

1) Provide the top 3 possible conditions (non-diagnostic), each with name, confidence 0-1, and urgency (low/medium/high).
2) Provide next steps, including urgent red-flag instructions where relevant.
3) Return ONLY valid JSON with keys: conditions, next_steps, disclaimer.

Each entry of "conditions" must be an object with keys: name, confidence, urgency."#
    )
}
