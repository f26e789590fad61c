//! Prompt builders for the mentor endpoints. Every prompt that expects
//! structured output spells out the exact JSON shape; the response is then
//! schema-validated by serde. Model output is never evaluated as code.

/// Instruction appended to every prompt that must yield machine-readable output.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do not include any text outside the JSON value. \
    Do not use markdown code fences. \
    Do not include explanations or apologies.";

pub fn suggest_fields(interests: &str) -> String {
    format!(
        "Based on the user's interest in '{interests}', suggest 4 specific and \
         diverse career fields. Answer with a JSON array of exactly 4 strings, \
         each a career field name. {JSON_ONLY_INSTRUCTION}"
    )
}

pub fn guidance(interests: &str, field: &str) -> String {
    format!(
        "You are 'Mentor', an expert career AI. Generate an inspiring and \
         detailed career guide for a student interested in '{field}', with \
         interests in '{interests}'. Use markdown and emojis. Include these \
         sections: 🚀 Why Your Interests Are a Perfect Match, 🗺️ Your 6-Month \
         Kickstart Roadmap, 🌟 A Word of Encouragement."
    )
}

pub fn roadmap(field: &str) -> String {
    format!(
        "Create a detailed, step-by-step career roadmap for a '{field}'. The \
         tone must be encouraging, professional, and clear for a student. \
         Structure the roadmap as exactly 4 phases. Answer with a JSON object \
         of the shape {{\"phases\": [{{\"title\": string, \"timeline\": string, \
         \"skills\": [string], \"projects\": [string], \"networking\": \
         [string]}}]}} where `timeline` is a duration such as '6-12 Months', \
         `skills` lists essential technical and soft skills, `projects` lists \
         1-2 portfolio project ideas, and `networking` lists community and \
         mentorship tips. {JSON_ONLY_INSTRUCTION}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_the_inputs() {
        assert!(suggest_fields("marine biology").contains("marine biology"));
        let g = guidance("robots", "Robotics Engineer");
        assert!(g.contains("robots") && g.contains("Robotics Engineer"));
        assert!(roadmap("Data Scientist").contains("Data Scientist"));
    }

    #[test]
    fn structured_prompts_demand_json_only() {
        assert!(suggest_fields("x").contains("JSON"));
        assert!(roadmap("x").contains("\"phases\""));
        assert!(!guidance("x", "y").contains(JSON_ONLY_INSTRUCTION));
    }
}
